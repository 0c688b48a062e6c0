//! qoxo CLI - tabular Q-learning for tic-tac-toe
//!
//! Two subcommands:
//! - `train`: run self-play training and report win/draw percentages
//! - `play`: train an agent, then play an interactive game against it

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qoxo")]
#[command(version, about = "Tabular Q-learning tic-tac-toe agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent through self-play
    Train(qoxo::cli::commands::train::TrainArgs),

    /// Train the agent, then play an interactive game against it
    Play(qoxo::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => qoxo::cli::commands::train::execute(args),
        Commands::Play(args) => qoxo::cli::commands::play::execute(args),
    }
}
