//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{BOARD_CELLS, StateKey};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' => Some(Cell::Empty),
            'X' => Some(Cell::X),
            'O' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_mark(self) -> Option<Mark> {
        match self {
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
            Cell::Empty => None,
        }
    }
}

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert mark to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A (row, column) coordinate identifying a cell on the board.
///
/// Valid only relative to a specific board: the cell must still be empty when
/// the action is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    row: usize,
    col: usize,
}

impl Action {
    /// Create a new action, validating both coordinates are within [0, 2].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if either coordinate is >= 3.
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < 3 && col < 3 {
            Ok(Action { row, col })
        } else {
            Err(crate::Error::OutOfBounds { row, col })
        }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major cell index (0-8)
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < BOARD_CELLS);
        Action {
            row: index / 3,
            col: index % 3,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Terminal status of a board, recomputed from cell contents on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Won(Mark),
    Draw,
    Ongoing,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// A 3x3 Tic-Tac-Toe board.
///
/// Implements `Copy` since it is only 9 bytes; `apply` returns a fresh board
/// so that states memoized in the value table are never aliased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    /// Get cell at a (row, col) coordinate
    pub fn get(&self, action: Action) -> Cell {
        self.cells[action.index()]
    }

    /// Check if a cell is empty
    pub fn is_empty_cell(&self, action: Action) -> bool {
        self.get(action) == Cell::Empty
    }

    /// Check if no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// All actions targeting an empty cell, in row-major order.
    ///
    /// The ordering doubles as the tie-break order for greedy action
    /// selection, so it must stay deterministic.
    pub fn legal_actions(&self) -> Vec<Action> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Action::from_index(i))
            .collect()
    }

    /// Place a mark and return the new board state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OccupiedCell`] if the cell is not empty. Policy
    /// code never produces such an action; the check guards against corrupting
    /// the value table through an invalid human move.
    #[must_use = "apply returns a new board; the original is unchanged"]
    pub fn apply(&self, action: Action, mark: Mark) -> Result<Board, crate::Error> {
        if !self.is_empty_cell(action) {
            return Err(crate::Error::OccupiedCell {
                row: action.row(),
                col: action.col(),
            });
        }

        let mut next = *self;
        next.cells[action.index()] = mark.to_cell();
        Ok(next)
    }

    /// Overwrite a cell with a mark, regardless of occupancy.
    ///
    /// Used only to build the synthetic bootstrap state for non-terminal TD
    /// updates: the opponent's mark is written over the cell just played.
    /// Not a legal game transition.
    #[must_use = "hypothetical returns a new board; the original is unchanged"]
    pub fn hypothetical(&self, action: Action, mark: Mark) -> Board {
        let mut next = *self;
        next.cells[action.index()] = mark.to_cell();
        next
    }

    /// Determine the terminal status of the board.
    ///
    /// Checks all 3 rows, 3 columns, and 2 diagonals for three identical
    /// non-empty cells; with no completed line, a full board is a draw and
    /// anything else is ongoing.
    pub fn status(&self) -> GameStatus {
        if let Some(winner) = super::lines::completed_line(&self.cells) {
            GameStatus::Won(winner)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }

    /// Canonical serialization of the cells for value-table lookups
    pub fn state_key(&self) -> StateKey {
        StateKey::from_cells(&self.cells)
    }

    /// Create a board from a state-key string (mostly for tests).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateKey`] on malformed input.
    pub fn from_state_key(key: &str) -> Result<Self, crate::Error> {
        let parsed = StateKey::parse(key)?;
        let mut cells = [Cell::Empty; BOARD_CELLS];
        for (i, c) in parsed.as_str().chars().enumerate() {
            // parse() guarantees every character maps to a cell
            cells[i] = Cell::from_char(c).unwrap_or(Cell::Empty);
        }
        Ok(Board { cells })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let rendered: Vec<String> = (0..3)
                .map(|col| self.cells[row * 3 + col].to_char().to_string())
                .collect();
            writeln!(f, "{}", rendered.join(" | "))?;
        }
        Ok(())
    }
}
