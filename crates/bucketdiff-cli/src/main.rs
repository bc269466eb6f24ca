//! bucketdiff CLI
//!
//! Command-line interface for grouped bucket diffs

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "bucketdiff")]
#[command(about = "bucketdiff - Reconciled diffs of grouped bucket snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two bucket snapshots group by group
    Diff(commands::diff::DiffArgs),
    /// Validate a group schema against a bucket snapshot
    Groups(commands::groups::GroupsArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Groups(args) => commands::groups::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
