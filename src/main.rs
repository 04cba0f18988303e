mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;
use userjs::{DuplicatePolicy, ParseOptions};

fn init_logging() {
    // stderr keeps stdout clean for JSON and fmt output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let options = ParseOptions {
        duplicates: if cli.allow_duplicates {
            DuplicatePolicy::LastWins
        } else {
            DuplicatePolicy::Reject
        },
    };

    match cli.command {
        Commands::Check(source) => commands::check(&source, &options),
        Commands::Show {
            source,
            queries,
            output,
        } => commands::show(&source, &options, &queries, output),
        Commands::Get { key, source } => commands::get(&source, &options, &key),
        Commands::Fmt { source, write } => commands::fmt(&source, &options, write),
    }
}
