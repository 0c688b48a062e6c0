//! Episode state machine
//!
//! Drives one full game: alternating turns, board transitions, terminal
//! checks, and the reward wiring into the Q-learning engine. Both self-play
//! training and interactive play funnel every move through [`step`], so each
//! move triggers exactly one value-table update.

use rand::{rngs::StdRng, seq::IndexedRandom};

use crate::{
    error::Result,
    q_learning::QLearningAgent,
    tictactoe::{Action, Board, GameStatus, Mark},
};

/// Terminal reward for the mover whose move ended the game with their win.
pub const REWARD_WIN: f64 = 1.0;
/// Terminal reward when the final move fills the board with no winner.
pub const REWARD_DRAW: f64 = 0.5;
/// Reward for non-terminal moves (and for the losing side's last move).
pub const REWARD_NONE: f64 = 0.0;

/// Apply one move and perform its TD update.
///
/// The update is keyed on the board *before* the move. Terminal moves use the
/// real resulting board as the next state; non-terminal moves bootstrap from
/// a synthetic state in which the opponent's mark overwrites the cell just
/// played (see [`Board::hypothetical`]).
///
/// # Errors
///
/// Returns [`crate::Error::OccupiedCell`] if the action targets a non-empty
/// cell; the board and table are left untouched so the caller can re-prompt.
pub fn step(
    agent: &mut QLearningAgent,
    board: &mut Board,
    action: Action,
    mover: Mark,
) -> Result<GameStatus> {
    let key = board.state_key();
    let next = board.apply(action, mover)?;

    let status = next.status();
    match status {
        GameStatus::Won(winner) => {
            let reward = if winner == mover { REWARD_WIN } else { REWARD_NONE };
            agent.update(&key, action, &next, reward);
        }
        GameStatus::Draw => {
            agent.update(&key, action, &next, REWARD_DRAW);
        }
        GameStatus::Ongoing => {
            let bootstrap = next.hypothetical(action, mover.opponent());
            agent.update(&key, action, &bootstrap, REWARD_NONE);
        }
    }

    *board = next;
    Ok(status)
}

/// Choose the starting mark uniformly at random
pub fn random_first_mark(rng: &mut StdRng) -> Mark {
    *[Mark::X, Mark::O]
        .choose(rng)
        .expect("mark set is non-empty")
}

/// Run one self-play training episode.
///
/// Both sides select epsilon-greedy moves from the shared value table at the
/// given exploration rate; the starting mark is chosen uniformly at random.
/// Returns the terminal status of the finished game.
pub fn run_self_play(
    agent: &mut QLearningAgent,
    exploration_rate: f64,
    rng: &mut StdRng,
) -> Result<GameStatus> {
    let mut board = Board::new();
    let mut mover = random_first_mark(rng);

    loop {
        let action = agent.select_action(&board, exploration_rate)?;
        let status = step(agent, &mut board, action, mover)?;
        if status.is_terminal() {
            return Ok(status);
        }
        mover = mover.opponent();
    }
}
