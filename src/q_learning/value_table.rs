//! Value table for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    tictactoe::Action,
    types::{BOARD_CELLS, StateKey},
};

/// Per-state grid of action scores, one per cell in row-major order.
///
/// Scores are meaningful only for cells that are legal actions in that state;
/// positions occupied in the state stay at zero and are read only through
/// [`ValueTable::max_value`].
pub type ValueGrid = [f64; BOARD_CELLS];

/// Mapping from state key to a grid of action scores.
///
/// Missing keys default to the all-zero grid; entries are created lazily on
/// first write (`update` is the get-or-insert point) and never deleted. The
/// table is mutated in place with no synchronization, so updates must be
/// serialized externally — episodes run strictly sequentially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueTable {
    grids: HashMap<String, ValueGrid>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl ValueTable {
    /// Create a new empty value table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            grids: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Get the score grid for a state, defaulting to all zeros.
    ///
    /// Read-only: a missing key is not inserted.
    pub fn grid(&self, key: &StateKey) -> ValueGrid {
        self.grids
            .get(key.as_str())
            .copied()
            .unwrap_or([0.0; BOARD_CELLS])
    }

    /// Get the score for a single state-action pair
    pub fn value(&self, key: &StateKey, action: Action) -> f64 {
        self.grid(key)[action.index()]
    }

    /// Maximum score over the *entire* grid for a state.
    ///
    /// Deliberately includes positions that are occupied (illegal) in that
    /// state: the TD target bootstraps from the whole grid, not just the
    /// legal actions.
    pub fn max_value(&self, key: &StateKey) -> f64 {
        self.grid(key)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Get-or-insert the grid for a state, creating an all-zero entry.
    fn grid_entry(&mut self, key: &StateKey) -> &mut ValueGrid {
        self.grids
            .entry(key.as_str().to_string())
            .or_insert([0.0; BOARD_CELLS])
    }

    /// Temporal-difference update:
    ///
    /// `Q[key][a] += α · (reward + γ · max(Q[next_key]) − Q[key][a])`
    ///
    /// Both `key` and `next_key` are created with zero grids if absent, so a
    /// single update on a fresh table produces entries for both states.
    pub fn update(&mut self, key: &StateKey, action: Action, next_key: &StateKey, reward: f64) {
        self.grid_entry(next_key);
        let max_next = self.max_value(next_key);
        let alpha = self.learning_rate;
        let gamma = self.discount_factor;

        let grid = self.grid_entry(key);
        let current = grid[action.index()];
        grid[action.index()] = current + alpha * (reward + gamma * max_next - current);
    }

    /// Number of states with a stored grid
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Check whether a state has a stored grid
    pub fn contains(&self, key: &StateKey) -> bool {
        self.grids.contains_key(key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    fn act(row: usize, col: usize) -> Action {
        Action::new(row, col).unwrap()
    }

    #[test]
    fn test_missing_key_defaults_to_zero_grid() {
        let table = ValueTable::new(0.1, 0.9);
        let state = key("---------");
        assert_eq!(table.grid(&state), [0.0; BOARD_CELLS]);
        assert_eq!(table.value(&state, act(1, 1)), 0.0);
        // Reads do not insert
        assert!(!table.contains(&state));
    }

    #[test]
    fn test_update_creates_both_entries() {
        let mut table = ValueTable::new(0.1, 0.9);
        let state = key("---------");
        let next = key("X--------");

        table.update(&state, act(0, 0), &next, 0.0);

        assert_eq!(table.len(), 2);
        assert!(table.contains(&state));
        assert!(table.contains(&next));
    }

    #[test]
    fn test_update_arithmetic_exact() {
        // Q[s][a] = 0.5, max(Q[s']) = 2.0, reward = 1, alpha = 0.1, gamma = 0.9
        // target: 0.5 + 0.1 * (1 + 0.9 * 2.0 - 0.5) = 0.73
        let mut table = ValueTable::new(0.1, 0.9);
        let state = key("---------");
        let next = key("X--------");

        table.grid_entry(&state)[act(0, 0).index()] = 0.5;
        table.grid_entry(&next)[act(2, 2).index()] = 2.0;

        table.update(&state, act(0, 0), &next, 1.0);

        let updated = table.value(&state, act(0, 0));
        assert!((updated - 0.73).abs() < 1e-12, "got {updated}");
    }

    #[test]
    fn test_max_value_spans_entire_grid() {
        // The maximum lives at position (0, 0), which is occupied in the
        // state "X--------"; it must still drive the bootstrap.
        let mut table = ValueTable::new(0.5, 1.0);
        let state = key("---------");
        let next = key("X--------");

        table.grid_entry(&next)[act(0, 0).index()] = 3.0;
        assert_eq!(table.max_value(&next), 3.0);

        table.update(&state, act(0, 0), &next, 0.0);
        // 0 + 0.5 * (0 + 1.0 * 3.0 - 0) = 1.5
        assert!((table.value(&state, act(0, 0)) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_terminal_self_update() {
        // Terminal moves pass the resulting board as its own next state.
        let mut table = ValueTable::new(0.1, 0.9);
        let state = key("XX-OO----");
        let next = key("XXXOO----");

        table.update(&state, act(0, 2), &next, 1.0);

        // 0 + 0.1 * (1 + 0.9 * 0 - 0) = 0.1
        assert!((table.value(&state, act(0, 2)) - 0.1).abs() < 1e-12);
    }
}
