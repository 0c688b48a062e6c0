//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Cell;

/// Number of cells on the 3x3 board.
pub const BOARD_CELLS: usize = 9;

/// A validated value-table key: the canonical serialization of a board.
///
/// The key is nine characters long, one per cell in row-major order, using
/// `X`, `O`, and `-` for empty. Two boards with identical cell contents always
/// produce the same key, which is what makes value-table entries reusable
/// across episodes.
///
/// # Examples
///
/// ```
/// use qoxo::tictactoe::{Action, Board, Mark};
///
/// let board = Board::new().apply(Action::new(0, 0).unwrap(), Mark::X).unwrap();
/// assert_eq!(board.state_key().as_str(), "X--------");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Parse and validate a state key from a string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateKey`] if the string is not exactly
    /// nine cells of `X`, `O`, or `-`.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        if s.chars().count() != BOARD_CELLS {
            return Err(crate::Error::InvalidStateKey {
                key: s.to_string(),
                reason: format!("expected {BOARD_CELLS} characters, got {}", s.chars().count()),
            });
        }

        for (i, c) in s.chars().enumerate() {
            if Cell::from_char(c).is_none() {
                return Err(crate::Error::InvalidStateKey {
                    key: s.to_string(),
                    reason: format!("invalid cell character '{c}' at position {i}"),
                });
            }
        }

        Ok(StateKey(s.to_string()))
    }

    /// Create from board cells (unchecked, for internal use).
    ///
    /// Safe because cell characters are produced by [`Cell::to_char`].
    pub(crate) fn from_cells(cells: &[Cell; BOARD_CELLS]) -> Self {
        StateKey(cells.iter().map(|&c| c.to_char()).collect())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_key() {
        let key = StateKey::parse("XO-------").unwrap();
        assert_eq!(key.as_str(), "XO-------");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(StateKey::parse("XO-").is_err());
        assert!(StateKey::parse("XO--------X").is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_characters() {
        assert!(StateKey::parse("XOZ------").is_err());
        assert!(StateKey::parse("xo-------").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        let key = StateKey::parse("---X-O---").unwrap();
        assert_eq!(key.to_string(), "---X-O---");
    }
}
