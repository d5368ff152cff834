use std::fmt;
use std::str::FromStr;

use super::player::Player;
use crate::error::ParseBoardError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Width of a padded row: one sentinel column on each side.
pub const STRIDE: usize = COLS + 2;
/// Total number of squares including the sentinel ring.
pub const SQUARES: usize = (ROWS + 2) * STRIDE;
/// Number of characters in a serialized board.
pub const WIRE_LEN: usize = ROWS * COLS;

/// Index into the padded grid: `row * STRIDE + column`.
pub type Square = usize;

/// Signed step between neighbouring squares.
pub type Direction = isize;

pub const NORTH: Direction = -(STRIDE as isize);
pub const SOUTH: Direction = STRIDE as isize;
pub const WEST: Direction = -1;
pub const EAST: Direction = 1;
pub const NORTH_WEST: Direction = NORTH + WEST;
pub const NORTH_EAST: Direction = NORTH + EAST;
pub const SOUTH_WEST: Direction = SOUTH + WEST;
pub const SOUTH_EAST: Direction = SOUTH + EAST;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    First,
    Second,
    /// Sentinel padding around the playable area.
    Outer,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::First => Player::First.symbol(),
            Cell::Second => Player::Second.symbol(),
            Cell::Outer => '?',
        }
    }

    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::First => Some(Player::First),
            Cell::Second => Some(Player::Second),
            Cell::Empty | Cell::Outer => None,
        }
    }
}

/// A 6x7 board surrounded by a ring of [`Cell::Outer`] sentinels.
///
/// Boards are plain values: [`Board::drop_piece`] returns a new board and
/// leaves the receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; SQUARES],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        let mut cells = [Cell::Outer; SQUARES];
        for square in playable_squares() {
            cells[square] = Cell::Empty;
        }
        Board { cells }
    }

    /// Address of a playable square. Rows and columns are 1-based, row 1 is
    /// the top.
    pub fn square(row: usize, column: usize) -> Square {
        row * STRIDE + column
    }

    /// Address of the top square of `column` (1..=7).
    pub fn column_top_square(column: usize) -> Square {
        Self::square(1, column)
    }

    /// Address of the bottom square of `column` (1..=7).
    pub fn column_bottom_square(column: usize) -> Square {
        Self::square(ROWS, column)
    }

    /// Cell at `square`. Addresses past the grid read as [`Cell::Outer`].
    pub fn get(&self, square: Square) -> Cell {
        self.cells.get(square).copied().unwrap_or(Cell::Outer)
    }

    /// Cell reached by taking one step from `square` in `direction`.
    ///
    /// Only meaningful for playable squares; the sentinel ring guarantees the
    /// result stays inside the grid.
    pub(crate) fn neighbour(square: Square, direction: Direction) -> Square {
        square.wrapping_add_signed(direction)
    }

    /// Check if a column is full. Columns outside 1..=7 count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        if !(1..=COLS).contains(&column) {
            return true;
        }
        self.cells[Self::column_top_square(column)] != Cell::Empty
    }

    /// Lowest empty square of `column`, scanning north from the bottom until
    /// the sentinel row.
    pub fn landing_square(&self, column: usize) -> Option<Square> {
        if !(1..=COLS).contains(&column) {
            return None;
        }
        let mut square = Self::column_bottom_square(column);
        loop {
            match self.cells[square] {
                Cell::Empty => return Some(square),
                Cell::Outer => return None,
                Cell::First | Cell::Second => square = Self::neighbour(square, NORTH),
            }
        }
    }

    /// Drop a piece for `player` in `column`.
    ///
    /// Returns the resulting board and the square the piece landed on, or
    /// `None` if the column is full or not a column at all.
    pub fn drop_piece(&self, column: usize, player: Player) -> Option<(Board, Square)> {
        let square = self.landing_square(column)?;
        let mut next = *self;
        next.cells[square] = player.to_cell();
        Some((next, square))
    }

    /// True if at least one column still has room.
    pub fn has_any_legal_move(&self) -> bool {
        (1..=COLS).any(|column| self.cells[Self::column_top_square(column)] == Cell::Empty)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        !self.has_any_legal_move()
    }

    /// Number of pieces in `column`. Columns outside 1..=7 hold none.
    pub fn column_height(&self, column: usize) -> usize {
        if !(1..=COLS).contains(&column) {
            return 0;
        }
        (1..=ROWS)
            .filter(|&row| self.cells[Self::square(row, column)].owner().is_some())
            .count()
    }

    /// The 42 playable cells, top-left to bottom-right, in wire notation.
    pub fn serialize(&self) -> String {
        playable_squares().map(|s| self.cells[s].symbol()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parse the 42-character wire notation produced by [`Board::serialize`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != WIRE_LEN {
            return Err(ParseBoardError::Length(len));
        }

        let mut board = Board::new();
        for (square, ch) in playable_squares().zip(s.chars()) {
            board.cells[square] = match ch {
                '.' => Cell::Empty,
                c if c == Player::First.symbol() => Cell::First,
                c if c == Player::Second.symbol() => Cell::Second,
                other => return Err(ParseBoardError::Symbol(other)),
            };
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (1..=COLS).map(|c| c.to_string()).collect();
        writeln!(f, "{}", header.join(" "))?;
        for row in 1..=ROWS {
            for column in 1..=COLS {
                write!(f, "{} ", self.cells[Self::square(row, column)].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Playable squares in row-major order from the top-left corner.
pub fn playable_squares() -> impl Iterator<Item = Square> {
    (1..=ROWS).flat_map(|row| (1..=COLS).map(move |column| Board::square(row, column)))
}
