//! Gaussholder - blurred image placeholders for rendered HTML.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use gaussholder::logger::set_verbose;
use gaussholder::{GaussholderConfig, Library, Mangler};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    set_verbose(cli.verbose);

    let config = GaussholderConfig::load(&cli.config)?;
    let library = Library::from_config(&config);

    match &cli.command {
        Commands::Mangle { args } => {
            cli::mangle::run_mangle(args, &Mangler::new(&library, &library))
        }
        Commands::Tag { args } => cli::tag::run_tag(args, &library),
        Commands::Footer => cli::footer::run_footer(&config.footer),
    }
}
