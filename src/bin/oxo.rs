//! oxo CLI - play perfect Tic-Tac-Toe or analyze its game tree

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Unbeatable Tic-Tac-Toe with an exhaustive minimax engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the AI
    Play,

    /// Analyze positions and export the AI policy
    Analyze(oxo::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play => oxo::cli::commands::play::execute(),
        Commands::Analyze(args) => oxo::cli::commands::analyze::execute(args),
    }
}
