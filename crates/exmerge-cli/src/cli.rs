use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "exmerge",
    about = "Merge edited copies of an element tree back into their baseline",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge modified documents into their baseline
    Merge(MergeArgs),
    /// Show leaf values that differ between a baseline and one modified document
    Diff(DiffArgs),
    /// List every leaf path of a document
    Paths(PathsArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// The unmodified baseline document
    pub baseline: PathBuf,
    /// Modified documents, in the order their candidates are listed
    #[arg(required = true, num_args = 1..)]
    pub modified: Vec<PathBuf>,
    /// Where to write the merged document
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Fail path resolution as soon as a segment is missing
    #[arg(long)]
    pub strict_paths: bool,
    /// Treat identical edits from several documents as one candidate
    #[arg(long)]
    pub collapse_identical: bool,
    /// Keep the baseline value for every contested leaf instead of prompting
    #[arg(long)]
    pub keep_baseline: bool,
    /// Give up after this many out-of-range answers to one prompt
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

#[derive(Args)]
pub struct DiffArgs {
    pub baseline: PathBuf,
    pub modified: PathBuf,
    #[arg(long)]
    pub strict_paths: bool,
}

#[derive(Args)]
pub struct PathsArgs {
    pub file: PathBuf,
    /// Only list leaves carrying this attribute (template, value, comment)
    #[arg(long)]
    pub kind: Option<String>,
}
