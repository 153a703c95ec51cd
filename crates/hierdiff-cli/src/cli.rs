use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use hierdiff_mark::ExtractSide;
use hierdiff_types::EditKind;

#[derive(Parser)]
#[command(
    name = "hierdiff",
    about = "Compare two object hierarchies by name",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the edit records between two hierarchies
    Diff(DiffArgs),
    /// Suffix the names of deleted or inserted objects
    Mark(MarkArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Base hierarchy (JSON)
    pub base: PathBuf,
    /// Target hierarchy (JSON)
    pub target: PathBuf,
    /// Only show records of this kind: insert, delete or change (repeatable)
    #[arg(long = "kind", value_parser = EditKind::from_str)]
    pub kinds: Vec<EditKind>,
}

#[derive(Args)]
pub struct MarkArgs {
    /// Base hierarchy (JSON)
    pub base: PathBuf,
    /// Target hierarchy (JSON)
    pub target: PathBuf,
    /// Hierarchy to mark: base marks deletions, target marks additions
    #[arg(long, value_parser = ExtractSide::from_str)]
    pub side: Option<ExtractSide>,
    /// Suffix to append, overriding the configured one for the side
    #[arg(long)]
    pub suffix: Option<String>,
    /// Write the marked hierarchy here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
