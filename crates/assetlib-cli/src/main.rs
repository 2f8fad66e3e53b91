//! assetlib CLI
//!
//! Command-line interface for asset-library reconciliation

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "assetlib")]
#[command(about = "assetlib - Asset library and rendition reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two snapshot manifests and print the delta
    Diff(commands::diff::DiffArgs),
    /// Print the rendition paths expected for an asset
    Renditions(commands::renditions::RenditionsArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Renditions(args) => commands::renditions::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
