//! Footer command implementation.

use anyhow::Result;

use gaussholder::config::FooterConfig;
use gaussholder::footer::{SharedHeader, load_script, render};

/// Execute footer command
pub fn run_footer(config: &FooterConfig) -> Result<()> {
    let header = SharedHeader::from_config(config)?;
    let script = load_script(config)?;
    println!("{}", render(&header, &script));
    Ok(())
}
