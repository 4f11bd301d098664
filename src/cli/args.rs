//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Gaussholder image placeholder CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: gaussholder.toml)
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = "gaussholder.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Print skipped images and other details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite images in HTML to use placeholders
    #[command(visible_alias = "m")]
    Mangle {
        #[command(flatten)]
        args: MangleArgs,
    },

    /// Print image attributes annotated with the attachment marker
    #[command(visible_alias = "t")]
    Tag {
        #[command(flatten)]
        args: TagArgs,
    },

    /// Print the page footer (header global, runtime, clip path)
    #[command(visible_alias = "f")]
    Footer,
}

/// Mangle command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct MangleArgs {
    /// HTML files to rewrite. If omitted, reads stdin and writes stdout.
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Write rewritten files into this directory
    #[arg(short, long, conflicts_with = "in_place", value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Overwrite input files
    #[arg(short, long)]
    pub in_place: bool,
}

/// Tag command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct TagArgs {
    /// Attachment id
    #[arg(long)]
    pub id: u64,

    /// Display size the attributes are for
    #[arg(short, long)]
    pub size: String,

    /// Existing attributes as markup, e.g. `class="a b" alt='x'`
    #[arg(short, long, value_name = "ATTRS")]
    pub markup: Option<String>,

    /// Existing attribute as `name=value` (repeatable, order kept)
    #[arg(short, long = "attr", value_name = "NAME=VALUE", value_parser = parse_attr)]
    pub attrs: Vec<(String, String)>,

    /// Print an `<img>` tag instead of JSON
    #[arg(long)]
    pub html: bool,
}

fn parse_attr(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    if name.is_empty() {
        return Err(format!("empty attribute name in `{s}`"));
    }
    Ok((name.to_owned(), value.to_owned()))
}
