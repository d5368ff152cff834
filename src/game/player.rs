use std::fmt;

use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first, shown as `@`.
    First,
    /// Moves second, shown as `O`.
    Second,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::First => Cell::First,
            Player::Second => Cell::Second,
        }
    }

    /// Symbol used on the wire and on printed boards.
    pub fn symbol(self) -> char {
        match self {
            Player::First => '@',
            Player::Second => 'O',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Player> {
        match symbol {
            '@' => Some(Player::First),
            'O' => Some(Player::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(Player::First.other(), Player::Second);
        assert_eq!(Player::Second.other(), Player::First);
    }

    #[test]
    fn test_player_symbol() {
        assert_eq!(Player::First.symbol(), '@');
        assert_eq!(Player::Second.symbol(), 'O');
        assert_eq!(Player::from_symbol('@'), Some(Player::First));
        assert_eq!(Player::from_symbol('O'), Some(Player::Second));
        assert_eq!(Player::from_symbol('.'), None);
        assert_eq!(Player::Second.to_string(), "O");
    }
}
