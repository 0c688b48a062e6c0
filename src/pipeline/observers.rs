//! Observer pattern for the training loop
//!
//! Observers allow composable progress reporting without coupling the
//! training loop to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    tictactoe::{GameStatus, Mark},
};

/// Hooks invoked by the trainer as episodes complete
pub trait Observer {
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _status: GameStatus) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Progress bar observer - shows training progress with running W/D/L counts
/// from the designated agent mark's perspective
pub struct ProgressObserver {
    agent_mark: Mark,
    progress_bar: Option<ProgressBar>,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer counting wins for `agent_mark`
    pub fn new(agent_mark: Mark) -> Self {
        Self {
            agent_mark,
            progress_bar: None,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, status: GameStatus) -> Result<()> {
        match status {
            GameStatus::Won(mark) if mark == self.agent_mark => self.wins += 1,
            GameStatus::Won(_) => self.losses += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::Ongoing => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{} D:{} L:{}", self.wins, self.draws, self.losses));
        }
        Ok(())
    }
}
