//! Tic-Tac-Toe board engine
//!
//! Owns the board representation and the pure state-transition and
//! terminal-detection logic. Has no knowledge of learning.

pub mod board;
pub mod lines;

pub use board::{Action, Board, Cell, GameStatus, Mark};
pub use lines::WINNING_LINES;
