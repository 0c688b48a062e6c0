//! Tabular Q-learning engine
//!
//! Off-policy TD control over explicit state keys: a value table maps each
//! board serialization to a 3x3 grid of action scores, updated with
//!
//! `Q[s][a] += α · (reward + γ · max(Q[s']) − Q[s][a])`
//!
//! and read through an epsilon-greedy policy. The exploration rate and its
//! decay schedule are owned by the caller, not the engine.

pub mod agent;
pub mod value_table;

pub use agent::{QLearningAgent, decay_exploration};
pub use value_table::{ValueGrid, ValueTable};
