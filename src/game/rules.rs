//! Legality, win and draw checks on top of [`Board`].

use super::board::{
    playable_squares, Board, Cell, Direction, Square, COLS, EAST, NORTH, NORTH_EAST,
    NORTH_WEST, SOUTH, SOUTH_EAST, SOUTH_WEST, WEST,
};

pub const MIN_COLUMN: i64 = 1;
pub const MAX_COLUMN: i64 = COLS as i64;

/// Number of pieces in a row needed to win.
pub const WIN_LENGTH: usize = 4;

/// The four lines through a square, each as a pair of opposite directions.
const AXES: [(Direction, Direction); 4] = [
    (NORTH, SOUTH),
    (EAST, WEST),
    (NORTH_EAST, SOUTH_WEST),
    (SOUTH_EAST, NORTH_WEST),
];

/// True if `column` names one of the board's columns.
pub fn is_valid_column_number(column: i64) -> bool {
    (MIN_COLUMN..=MAX_COLUMN).contains(&column)
}

/// True if `column` is valid and still has room on `board`.
pub fn is_legal(column: i64, board: &Board) -> bool {
    is_valid_column_number(column) && board.landing_square(column as usize).is_some()
}

/// Columns that can currently be played, in ascending order.
pub fn legal_columns(board: &Board) -> Vec<usize> {
    (1..=COLS).filter(|&c| !board.is_column_full(c)).collect()
}

/// Check whether the piece on `square` is part of four in a row.
///
/// Only lines through `square` are inspected, so this must be called with the
/// square that was just played.
pub fn is_four_in_a_row(square: Square, board: &Board) -> bool {
    let cell = board.get(square);
    if cell.owner().is_none() {
        return false;
    }

    AXES.iter().any(|&(forward, backward)| {
        run_length(board, square, forward, cell) + run_length(board, square, backward, cell)
            >= WIN_LENGTH - 1
    })
}

/// Count consecutive `cell` pieces stepping away from `square`, not counting
/// `square` itself. The scan stops at the first mismatch, which is at the
/// latest the sentinel ring.
fn run_length(board: &Board, square: Square, direction: Direction, cell: Cell) -> usize {
    let mut count = 0;
    let mut s = Board::neighbour(square, direction);
    while board.get(s) == cell {
        count += 1;
        s = Board::neighbour(s, direction);
    }
    count
}

/// True if some four in a row exists anywhere on the board.
pub fn has_four_in_a_row(board: &Board) -> bool {
    playable_squares().any(|s| is_four_in_a_row(s, board))
}

/// No moves left and nobody has won.
pub fn is_draw(board: &Board) -> bool {
    !board.has_any_legal_move() && !has_four_in_a_row(board)
}
