//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Mark};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Find the mark holding a completed line, if any.
///
/// Every line is inspected in table order (rows, columns, diagonals); a line
/// counts only when all three cells hold the same non-empty mark. A reachable
/// board can contain at most one completed line, so the order is not
/// observable, but no line is skipped.
pub fn completed_line(cells: &[Cell; 9]) -> Option<Mark> {
    WINNING_LINES.iter().find_map(|line| {
        let first = cells[line[0]];
        if first != Cell::Empty && line.iter().all(|&idx| cells[idx] == first) {
            first.to_mark()
        } else {
            None
        }
    })
}

/// Check if a mark has three in a row
pub fn has_won(cells: &[Cell; 9], mark: Mark) -> bool {
    completed_line(cells) == Some(mark)
}
