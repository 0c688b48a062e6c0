//! Train command - self-play training with a run summary

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{ArgAction, Args, Parser};

use crate::{
    pipeline::{ProgressObserver, Trainer, TrainingConfig, TrainingResult},
    q_learning::QLearningAgent,
    tictactoe::Mark,
};

/// Learning hyperparameters shared by the train and play commands
#[derive(Args, Debug, Clone)]
pub struct HyperParams {
    /// Number of self-play training episodes
    #[arg(long, short = 'e', default_value_t = 10_000)]
    pub episodes: usize,

    /// Learning rate α (0.0-1.0)
    #[arg(long, default_value_t = 0.001)]
    pub learning_rate: f64,

    /// Discount factor γ (0.0-1.0)
    #[arg(long, default_value_t = 0.9)]
    pub discount: f64,

    /// Initial exploration rate ε
    #[arg(long, default_value_t = 0.5)]
    pub epsilon: f64,

    /// Multiplicative ε decay per episode
    #[arg(long, default_value_t = 0.99)]
    pub epsilon_decay: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bar (`--progress false` to disable)
    #[arg(long, default_value_t = true, action = ArgAction::Set, num_args = 1)]
    pub progress: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Train the agent through self-play")]
pub struct TrainArgs {
    #[command(flatten)]
    pub hyper: HyperParams,

    /// Which mark the agent's summary counts wins for (`x` or `o`)
    #[arg(long, default_value = "o")]
    pub agent_mark: String,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub(crate) fn parse_mark_token(value: &str, flag: &str) -> Result<Mark> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" => Ok(Mark::X),
        "o" | "0" => Ok(Mark::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

pub(crate) fn config_from(hyper: &HyperParams, agent_mark: Mark) -> TrainingConfig {
    TrainingConfig {
        num_episodes: hyper.episodes,
        learning_rate: hyper.learning_rate,
        discount_factor: hyper.discount,
        exploration_rate: hyper.epsilon,
        exploration_decay: hyper.epsilon_decay,
        agent_mark,
        seed: hyper.seed,
    }
}

/// Train a fresh agent and return it together with the run result
pub(crate) fn train_agent(
    config: TrainingConfig,
    progress: bool,
) -> Result<(QLearningAgent, TrainingResult)> {
    let mut agent = config.build_agent();

    let mut trainer = Trainer::new(config.clone());
    if progress {
        trainer = trainer.with_observer(Box::new(ProgressObserver::new(config.agent_mark)));
    }

    let result = trainer.run(&mut agent)?;
    Ok((agent, result))
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let agent_mark = parse_mark_token(&args.agent_mark, "--agent-mark")?;
    let config = config_from(&args.hyper, agent_mark);

    let (agent, result) = train_agent(config, args.hyper.progress)?;

    println!("\n=== Training Complete ===");
    println!("Episodes: {}", result.total_episodes);
    println!("States learned: {}", agent.table().len());
    println!("Agent win percentage: {:.2}%", result.win_percentage);
    println!("Draw percentage: {:.2}%", result.draw_percentage);

    if let Some(summary_path) = args.summary {
        if let Some(parent) = summary_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        result.save(&summary_path)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mark_token() {
        assert_eq!(parse_mark_token("x", "--agent-mark").unwrap(), Mark::X);
        assert_eq!(parse_mark_token("O", "--agent-mark").unwrap(), Mark::O);
        // '0' is accepted as an alias for the O mark
        assert_eq!(parse_mark_token("0", "--agent-mark").unwrap(), Mark::O);
        assert!(parse_mark_token("z", "--agent-mark").is_err());
    }

    #[test]
    fn test_config_from_args() {
        let args = TrainArgs::parse_from([
            "qoxo-train",
            "--episodes",
            "250",
            "--epsilon",
            "0.8",
            "--seed",
            "9",
        ]);
        let config = config_from(&args.hyper, Mark::O);

        assert_eq!(config.num_episodes, 250);
        assert_eq!(config.exploration_rate, 0.8);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.learning_rate, 0.001);
    }

    #[test]
    fn test_progress_flag_takes_an_explicit_value() {
        let args = TrainArgs::parse_from(["qoxo-train"]);
        assert!(args.hyper.progress);

        let args = TrainArgs::parse_from(["qoxo-train", "--progress", "false"]);
        assert!(!args.hyper.progress);

        let args = TrainArgs::parse_from(["qoxo-train", "--progress", "true"]);
        assert!(args.hyper.progress);
    }
}
