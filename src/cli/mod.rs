use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::graph::RelationMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RelationModeArg {
    /// One edge per referenced struct, labelled with the field count
    Count,
    /// One edge per referencing field
    PerField,
}

impl From<RelationModeArg> for RelationMode {
    fn from(arg: RelationModeArg) -> Self {
        match arg {
            RelationModeArg::Count => RelationMode::Count,
            RelationModeArg::PerField => RelationMode::PerField,
        }
    }
}

#[derive(Debug, Parser, Default)]
#[command(
    name = "visgostruct",
    version,
    about = "Extract structs in Go sources and draw relations in PlantUML format.",
    long_about = "Extract struct declarations from Go source files and draw their has-a relations as a PlantUML class diagram, or list them as CSV, TSV or JSON. Directories are searched for *.go files, honoring .gitignore and .ignore."
)]
pub struct Cli {
    /// Go source files or directories to scan
    #[arg(value_name = "PATH", required_unless_present = "completions")]
    pub paths: Vec<PathBuf>,

    /// Pattern of struct names to keep
    #[arg(short, long, value_name = "REGEX")]
    pub include: Option<String>,

    /// Pattern of struct names to drop
    #[arg(short, long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Include field definitions in the diagram
    #[arg(short, long)]
    pub fields: bool,

    /// Include field comments
    #[arg(short, long)]
    pub comment: bool,

    /// Include field tags
    #[arg(short, long)]
    pub tag: bool,

    /// Show comments and tags in a note instead of inline
    #[arg(short, long)]
    pub note: bool,

    /// Only output this struct and the structs reachable from it
    #[arg(short, long, value_name = "NAME")]
    pub root: Option<String>,

    /// Print definitions as comma-separated values
    #[arg(long, conflicts_with_all = ["tsv", "json"])]
    pub csv: bool,

    /// Print definitions as tab-separated values
    #[arg(long, conflicts_with = "json")]
    pub tsv: bool,

    /// Print structs and relations as JSON
    #[arg(long)]
    pub json: bool,

    /// How fields referencing the same struct become relations
    #[arg(long, value_enum, value_name = "MODE")]
    pub relations: Option<RelationModeArg>,

    /// Fail if any input cannot be read or parsed
    #[arg(long)]
    pub strict: bool,

    /// Also scan *_test.go files when searching directories
    #[arg(long)]
    pub include_tests: bool,

    /// Path to a TOML configuration file (default: ./visgostruct.toml when present)
    #[arg(long, value_name = "FILE", env = "VISGOSTRUCT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors on stderr
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
