use anyhow::Result;
use clap::{Parser, Subcommand};
use wos_collab::{aggregate, extract};

#[derive(Parser)]
#[command(name = "wos-collab")]
#[command(about = "Find international collaborators of home-institution authors in BibTeX exports")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse .bib files and write the collaboration and collaborator tables
    Extract(extract::ExtractArgs),
    /// Rebuild the collaborator table from an instance table
    Aggregate(aggregate::AggregateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    match cli.command {
        Commands::Extract(args) => extract::run(args),
        Commands::Aggregate(args) => aggregate::run(args),
    }
}
