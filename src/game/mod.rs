//! Core four-in-a-row game logic: the sentinel-padded board, player identity,
//! and the rules that adjudicate moves.

mod board;
mod player;
pub mod rules;

pub use board::{playable_squares, Board, Cell, Square, COLS, ROWS, WIRE_LEN};
pub use player::Player;
