//! Tabular Q-learning tic-tac-toe agent
//!
//! This crate provides:
//! - Complete tic-tac-toe game implementation with validation
//! - A tabular Q-learning agent with ε-greedy action selection
//! - A sequential self-play training loop with progress reporting
//! - An interactive mode for playing against the trained agent

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use pipeline::{Trainer, TrainingConfig, TrainingResult};
pub use q_learning::{QLearningAgent, ValueTable, decay_exploration};
pub use tictactoe::{Action, Board, Cell, GameStatus, Mark};
pub use types::StateKey;
