//! Episode orchestration and the self-play training loop
//!
//! The board engine and the Q-learning engine are glued together here: one
//! module runs individual episodes (and carries the reward-assignment
//! contract), one runs the sequential training loop, and one provides
//! composable progress observers.

pub mod episode;
pub mod observers;
pub mod training;

pub use episode::{random_first_mark, run_self_play, step};
pub use observers::{Observer, ProgressObserver};
pub use training::{Trainer, TrainingConfig, TrainingResult};
