//! Strategies supply moves to the referee. The production implementation is
//! [`ProcessStrategy`], an external program driven over its standard streams.

mod process;

pub use process::{ProcessOptions, ProcessStrategy};

use crate::error::StrategyError;
use crate::game::{Board, Player};

/// Anything that can be asked for a move.
pub trait Strategy {
    /// Display name used in logs and errors.
    fn name(&self) -> &str;

    /// Ask for the column `player` wants to play on `board`.
    ///
    /// The returned number is unchecked: range and legality are the
    /// referee's business. A reply that is not a number at all comes back as
    /// [`StrategyError::MalformedReply`].
    fn request_move(&mut self, player: Player, board: &Board) -> Result<i64, StrategyError>;
}
