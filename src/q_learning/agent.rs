//! Tabular Q-learning agent
//!
//! Owns the value table and the epsilon-greedy policy. Depends on the board
//! engine only for legal-action enumeration and next-state keys; it knows
//! nothing about turn order or rewards, which belong to the episode runner.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::Result,
    q_learning::value_table::ValueTable,
    tictactoe::{Action, Board},
    types::StateKey,
};

/// Multiplicative exploration-rate decay, applied between episodes.
///
/// Pure: the caller owns the mutable rate across the run.
pub fn decay_exploration(rate: f64, factor: f64) -> f64 {
    rate * factor
}

/// Q-learning agent: value table plus epsilon-greedy action selection.
///
/// The exploration rate is injected per call rather than stored, so the
/// trainer can own the decay schedule and interactive play can force it to 0.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    table: ValueTable,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create a new agent with an empty value table
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter in (0, 1]
    /// * `discount_factor` - γ parameter in (0, 1]
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            table: ValueTable::new(learning_rate, discount_factor),
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Seed the agent's RNG for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Read access to the learned value table
    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// ε-greedy action selection.
    ///
    /// With probability `exploration_rate`, a uniformly random legal action;
    /// otherwise the legal action with the maximum score, ties broken by the
    /// first such action in row-major order (deterministic for testing).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalActions`] on a full board. The episode
    /// state machine never reaches this; it signals an orchestration bug.
    pub fn select_action(&mut self, board: &Board, exploration_rate: f64) -> Result<Action> {
        let legal = board.legal_actions();
        if legal.is_empty() {
            return Err(crate::Error::NoLegalActions);
        }

        if self.rng.random::<f64>() < exploration_rate {
            // Explore: uniform over legal actions
            Ok(*legal.choose(&mut self.rng).expect("legal set is non-empty"))
        } else {
            Ok(self.greedy_action(&board.state_key(), &legal))
        }
    }

    /// Highest-scoring legal action, first-in-row-major-order on ties
    fn greedy_action(&self, key: &StateKey, legal: &[Action]) -> Action {
        let grid = self.table.grid(key);
        let mut best = legal[0];
        let mut best_score = grid[best.index()];

        for &action in &legal[1..] {
            let score = grid[action.index()];
            if score > best_score {
                best = action;
                best_score = score;
            }
        }

        best
    }

    /// Apply the TD update for one move.
    ///
    /// `state_key` is the key of the board *before* the move and `next_board`
    /// is either the real resulting board (terminal moves) or the synthetic
    /// bootstrap state built by [`Board::hypothetical`] (non-terminal moves).
    pub fn update(&mut self, state_key: &StateKey, action: Action, next_board: &Board, reward: f64) {
        self.table
            .update(state_key, action, &next_board.state_key(), reward);
    }
}
