//! Self-play training loop

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{episode, observers::Observer};
use crate::{
    Result,
    q_learning::{QLearningAgent, decay_exploration},
    tictactoe::{GameStatus, Mark},
};

/// Training configuration
///
/// Defaults follow the reference hyperparameters: 10000 episodes, α = 0.001,
/// γ = 0.9, initial ε = 0.5 decayed by 0.99 per episode, agent mark O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub num_episodes: usize,

    /// Learning rate α
    pub learning_rate: f64,

    /// Discount factor γ
    pub discount_factor: f64,

    /// Initial exploration rate ε
    pub exploration_rate: f64,

    /// Multiplicative ε decay applied after every episode
    pub exploration_decay: f64,

    /// Mark whose wins are counted in the run summary
    pub agent_mark: Mark,

    /// Random seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 10_000,
            learning_rate: 0.001,
            discount_factor: 0.9,
            exploration_rate: 0.5,
            exploration_decay: 0.99,
            agent_mark: Mark::O,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Build an agent with this configuration's hyperparameters and seed
    pub fn build_agent(&self) -> QLearningAgent {
        let agent = QLearningAgent::new(self.learning_rate, self.discount_factor);
        match self.seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Wins for the designated agent mark
    pub agent_wins: usize,

    /// Drawn episodes
    pub draws: usize,

    /// Agent win share, as a percentage of total episodes
    pub win_percentage: f64,

    /// Draw share, as a percentage of total episodes
    pub draw_percentage: f64,

    /// Exploration rate after the final decay step
    pub final_exploration_rate: f64,
}

impl TrainingResult {
    /// Create a new training result; percentages are 0.00 for an empty run
    pub fn new(
        total_episodes: usize,
        agent_wins: usize,
        draws: usize,
        final_exploration_rate: f64,
    ) -> Self {
        let percentage = |count: usize| {
            if total_episodes > 0 {
                count as f64 / total_episodes as f64 * 100.0
            } else {
                0.0
            }
        };

        Self {
            total_episodes,
            agent_wins,
            draws,
            win_percentage: percentage(agent_wins),
            draw_percentage: percentage(draws),
            final_exploration_rate,
        }
    }

    /// Save the result to a JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Sequential self-play trainer.
///
/// Owns the process-wide exploration schedule: the rate starts at the
/// configured value and is decayed multiplicatively after every completed
/// episode. Episodes run strictly one after another because the value table
/// is mutated in place with no synchronization.
pub struct Trainer {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl Trainer {
    /// Create a new trainer
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the trainer
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of self-play episodes
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        let mut rng = match self.config.seed {
            // Offset so the trainer's start-mark draws never mirror the
            // agent's exploration draws under a shared seed.
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut exploration = self.config.exploration_rate;
        let mut agent_wins = 0;
        let mut draws = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        for episode_num in 0..self.config.num_episodes {
            let status = episode::run_self_play(agent, exploration, &mut rng)?;

            match status {
                GameStatus::Won(mark) if mark == self.config.agent_mark => agent_wins += 1,
                GameStatus::Draw => draws += 1,
                _ => {}
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode_num, status)?;
            }

            exploration = decay_exploration(exploration, self.config.exploration_decay);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.num_episodes,
            agent_wins,
            draws,
            exploration,
        ))
    }
}
