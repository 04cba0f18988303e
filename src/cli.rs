use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and reformat Firefox user.js settings files
#[derive(Parser, Debug)]
#[command(name = "userjs", version)]
#[command(about = "Check, view and reformat Firefox user.js settings")]
pub struct Cli {
    /// Let later declarations of a key override earlier ones instead of failing
    #[arg(long, global = true)]
    pub allow_duplicates: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a settings file and report problems
    Check(Source),

    /// Print settings as JSON
    Show {
        #[command(flatten)]
        source: Source,

        /// Only show keys matching this glob pattern (repeatable, OR logic)
        #[arg(short, long = "query", value_name = "PATTERN")]
        queries: Vec<String>,

        /// Output layout
        #[arg(short, long, value_enum, default_value_t = OutputType::JsonObject)]
        output: OutputType,
    },

    /// Print the raw value of one setting
    Get {
        /// Preference name
        key: String,

        #[command(flatten)]
        source: Source,
    },

    /// Rewrite settings in canonical form
    Fmt {
        #[command(flatten)]
        source: Source,

        /// Rewrite the file in place instead of printing
        #[arg(short, long, requires = "file")]
        write: bool,
    },
}

#[derive(Args, Debug)]
pub struct Source {
    /// Settings file to read (default: the bundled user.js)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputType {
    /// `{"key": value, ...}`
    JsonObject,
    /// `[{"key": ..., "value": ..., "kind": ..., "line": ...}, ...]`
    JsonArray,
}
