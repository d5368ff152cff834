//! Line protocol spoken between the referee and a strategy.
//!
//! Referee to strategy: `"<player> <board>\n"`, where `<player>` is `@` or
//! `O` and `<board>` is the 42-character notation of [`Board::serialize`].
//!
//! Strategy to referee: one decimal column number per line.

use crate::error::ParseRequestError;
use crate::game::{Board, Player};

/// Build the request line for `player` to move on `board`, newline included.
pub fn encode_request(player: Player, board: &Board) -> String {
    format!("{} {}\n", player.symbol(), board.serialize())
}

/// Parse a request line as received by a strategy.
pub fn decode_request(line: &str) -> Result<(Player, Board), ParseRequestError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (symbol, board) = line
        .split_once(' ')
        .ok_or_else(|| ParseRequestError::MissingSeparator(line.to_string()))?;

    let mut chars = symbol.chars();
    let player = match (chars.next(), chars.next()) {
        (Some(c), None) => Player::from_symbol(c),
        _ => None,
    }
    .ok_or_else(|| ParseRequestError::Player(symbol.to_string()))?;

    Ok((player, board.parse()?))
}

/// Build a reply line for `column`, newline included.
pub fn encode_reply(column: usize) -> String {
    format!("{column}\n")
}

/// Parse a strategy's reply. Surrounding whitespace is ignored; anything that
/// is not a single decimal integer yields `None`.
pub fn decode_reply(line: &str) -> Option<i64> {
    line.trim().parse().ok()
}
