use std::fmt;

use crate::game::{Board, Player, Square};

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
    /// The player ran out of attempts to send a legal move.
    Forfeit(Player),
}

impl Outcome {
    /// The player credited with the win, if any.
    pub fn winner(&self) -> Option<Player> {
        match *self {
            Outcome::Winner(player) => Some(player),
            Outcome::Forfeit(offender) => Some(offender.other()),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {player} wins."),
            Outcome::Draw => write!(f, "Draw."),
            Outcome::Forfeit(offender) => write!(
                f,
                "Player {offender} forfeits. Player {} wins.",
                offender.other()
            ),
        }
    }
}

/// An accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub player: Player,
    pub column: usize,
    pub square: Square,
}

/// Everything a finished match produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub outcome: Outcome,
    pub board: Board,
    /// Accepted moves in the order they were played.
    pub moves: Vec<Move>,
    /// Replies turned down as malformed, out of range, or into a full column.
    pub rejected: usize,
}
