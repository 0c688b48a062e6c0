//! Play command - train in-process, then play against the agent
//!
//! The value table lives only in process memory (there is no save/load
//! format), so an interactive game always starts with a training run.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use super::train::{HyperParams, config_from, parse_mark_token, train_agent};
use crate::{
    pipeline::episode::{random_first_mark, step},
    q_learning::QLearningAgent,
    tictactoe::{Action, Board, GameStatus, Mark},
};

#[derive(Parser, Debug)]
#[command(about = "Train the agent, then play an interactive game against it")]
pub struct PlayArgs {
    #[command(flatten)]
    pub hyper: HyperParams,

    /// Which mark the human controls (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub human_mark: String,
}

/// Parse a single board coordinate; `None` for non-integers or values > 2
pub(crate) fn parse_index(input: &str) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(value) if value < 3 => Some(value),
        _ => None,
    }
}

fn prompt_index<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<usize> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        let bytes = input.read_line(&mut line)?;
        if bytes == 0 {
            return Err(anyhow!("input stream closed while waiting for a move"));
        }

        match parse_index(&line) {
            Some(value) => return Ok(value),
            None => writeln!(output, "Please enter a number between 0 and 2.")?,
        }
    }
}

/// Prompt for a (row, column) pair until it names an empty cell.
///
/// Out-of-range and occupied coordinates are rejected with a message and a
/// re-prompt; they never abort the episode.
fn prompt_action<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    board: &Board,
) -> Result<Action> {
    loop {
        let row = prompt_index(input, output, "Enter the row (0-2): ")?;
        let col = prompt_index(input, output, "Enter the column (0-2): ")?;

        // prompt_index keeps both coordinates in range
        let action = Action::new(row, col).context("coordinate out of range")?;
        if board.is_empty_cell(action) {
            return Ok(action);
        }
        writeln!(output, "Cell ({row}, {col}) is already occupied. Try again.")?;
    }
}

/// Run one interactive episode: human vs. trained agent.
///
/// The agent plays greedily (exploration rate forced to 0); every move, by
/// either side, still flows through the TD update in [`step`].
fn run_interactive<R: BufRead, W: Write>(
    agent: &mut QLearningAgent,
    human_mark: Mark,
    rng: &mut StdRng,
    input: &mut R,
    output: &mut W,
) -> Result<GameStatus> {
    let mut board = Board::new();
    let mut mover = random_first_mark(rng);

    loop {
        let action = if mover == human_mark {
            writeln!(output, "\n{board}")?;
            prompt_action(input, output, &board)?
        } else {
            agent.select_action(&board, 0.0)?
        };

        let status = step(agent, &mut board, action, mover)?;
        if status.is_terminal() {
            writeln!(output, "\n{board}")?;
            match status {
                GameStatus::Won(winner) if winner == human_mark => {
                    writeln!(output, "Human player wins!")?
                }
                GameStatus::Won(_) => writeln!(output, "Agent wins!")?,
                _ => writeln!(output, "It's a draw!")?,
            }
            return Ok(status);
        }
        mover = mover.opponent();
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human_mark = parse_mark_token(&args.human_mark, "--human-mark")?;
    let agent_mark = human_mark.opponent();
    let config = config_from(&args.hyper, agent_mark);

    println!("Training for {} episodes...", config.num_episodes);
    let (mut agent, result) = train_agent(config.clone(), args.hyper.progress)?;
    println!("Agent win percentage: {:.2}%", result.win_percentage);
    println!("Draw percentage: {:.2}%", result.draw_percentage);

    println!("\nYou play {human_mark}; the agent plays {agent_mark}.");

    let mut rng = match config.seed {
        // Offset past the trainer's derived RNG stream
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(2)),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_interactive(&mut agent, human_mark, &mut rng, &mut input, &mut output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index(" 2 \n"), Some(2));
        assert_eq!(parse_index("3"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("abc"), None);
        assert_eq!(parse_index(""), None);
    }

    #[test]
    fn test_prompt_action_reprompts_until_valid() {
        // "5" is out of range, then (1, 1) is occupied, then (0, 0) is fine.
        let board = Board::new()
            .apply(Action::new(1, 1).unwrap(), Mark::X)
            .unwrap();
        let mut input = b"5\n1\n1\n0\n0\n".as_slice();
        let mut output = Vec::new();

        let action = prompt_action(&mut input, &mut output, &board).unwrap();
        assert_eq!(action, Action::new(0, 0).unwrap());

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Please enter a number between 0 and 2."));
        assert!(transcript.contains("already occupied"));
    }

    #[test]
    fn test_prompt_action_fails_on_closed_input() {
        let board = Board::new();
        let mut input = b"".as_slice();
        let mut output = Vec::new();
        assert!(prompt_action(&mut input, &mut output, &board).is_err());
    }

    #[test]
    fn test_interactive_episode_completes_with_scripted_moves() {
        let mut agent = QLearningAgent::new(0.001, 0.9).with_seed(4);
        let mut rng = StdRng::seed_from_u64(0);

        // Enough scripted human moves to finish any game: walk the cells in
        // row-major order; occupied ones are rejected and re-prompted.
        let script: String = (0..9)
            .map(|i: usize| format!("{}\n{}\n", i / 3, i % 3))
            .collect::<Vec<_>>()
            .concat()
            .repeat(3);
        let mut input = script.as_bytes();
        let mut output = Vec::new();

        let status =
            run_interactive(&mut agent, Mark::X, &mut rng, &mut input, &mut output).unwrap();
        assert!(status.is_terminal());

        let transcript = String::from_utf8(output).unwrap();
        assert!(
            transcript.contains("wins!") || transcript.contains("draw"),
            "missing outcome line in: {transcript}"
        );
    }
}
