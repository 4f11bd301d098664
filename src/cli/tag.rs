//! Tag command implementation.

use anyhow::Result;

use gaussholder::{AttrMap, SizeCatalog, debug, tag};

use super::args::TagArgs;

/// Execute tag command
pub fn run_tag(args: &TagArgs, catalog: &dyn SizeCatalog) -> Result<()> {
    println!("{}", render_tag(args, catalog)?);
    Ok(())
}

/// Tagged attributes as pretty JSON, or as an `<img>` tag with `--html`.
fn render_tag(args: &TagArgs, catalog: &dyn SizeCatalog) -> Result<String> {
    if !catalog.is_enabled(&args.size) {
        debug!("tag"; "size `{}` is not enabled, attributes left as-is", args.size);
    }

    let mut attrs = args
        .markup
        .as_deref()
        .map(AttrMap::parse)
        .unwrap_or_default();
    for (name, value) in &args.attrs {
        attrs.set(name, value);
    }
    let tagged = tag(attrs, args.id, &args.size, catalog);

    if args.html {
        Ok(format!("<img {} />", tagged.to_html()))
    } else {
        Ok(serde_json::to_string_pretty(&tagged.to_json())?)
    }
}
