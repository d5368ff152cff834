use tracing::{debug, info, warn};

use super::report::{MatchReport, Move, Outcome};
use crate::config::{RefereeConfig, DEFAULT_MAX_ILLEGAL_MOVES};
use crate::error::MatchError;
use crate::game::{rules, Board, Player};
use crate::strategy::Strategy;

enum State {
    AwaitingMove { player: Player, board: Board },
    GameOver { outcome: Outcome, board: Board },
}

/// A single match between two strategies.
///
/// `@` moves first. Each turn the active strategy is asked for a column until
/// it names a legal one; the move is applied to a fresh board and checked for
/// a win through the landed square. Malformed and illegal replies never touch
/// the board or pass the turn. After `max_illegal_moves` consecutive
/// rejections the player forfeits; with no limit the referee keeps asking.
pub struct Match<'a> {
    first: &'a mut dyn Strategy,
    second: &'a mut dyn Strategy,
    max_illegal_moves: Option<u32>,
    observer: Option<Box<dyn FnMut(&Board) + 'a>>,
    moves: Vec<Move>,
    rejected: usize,
}

impl<'a> Match<'a> {
    pub fn new(first: &'a mut dyn Strategy, second: &'a mut dyn Strategy) -> Self {
        Match {
            first,
            second,
            max_illegal_moves: Some(DEFAULT_MAX_ILLEGAL_MOVES),
            observer: None,
            moves: Vec::new(),
            rejected: 0,
        }
    }

    /// Apply the referee section of the configuration.
    pub fn with_config(self, config: &RefereeConfig) -> Self {
        self.max_illegal_moves(config.illegal_move_limit())
    }

    /// Consecutive rejected replies allowed before a forfeit. `None` never
    /// gives up.
    pub fn max_illegal_moves(mut self, limit: Option<u32>) -> Self {
        self.max_illegal_moves = limit;
        self
    }

    /// Call `observer` with the board before every request and once with the
    /// final board.
    pub fn on_board(mut self, observer: impl FnMut(&Board) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Play from the empty board with `@` to move.
    pub fn play(self) -> Result<MatchReport, MatchError> {
        self.play_from(Board::new(), Player::First)
    }

    /// Play from an arbitrary position.
    pub fn play_from(mut self, board: Board, player: Player) -> Result<MatchReport, MatchError> {
        let mut state = State::AwaitingMove { player, board };
        loop {
            state = match state {
                State::AwaitingMove { player, board } => self.turn(player, board)?,
                State::GameOver { outcome, board } => {
                    self.observe(&board);
                    info!(
                        %outcome,
                        moves = self.moves.len(),
                        rejected = self.rejected,
                        "match over"
                    );
                    return Ok(MatchReport {
                        outcome,
                        board,
                        moves: self.moves,
                        rejected: self.rejected,
                    });
                }
            };
        }
    }

    fn turn(&mut self, player: Player, board: Board) -> Result<State, MatchError> {
        if !board.has_any_legal_move() {
            return Ok(State::GameOver {
                outcome: Outcome::Draw,
                board,
            });
        }

        let mut strikes = 0;
        loop {
            self.observe(&board);
            let reply = self.request(player, &board)?;
            let landed = match reply {
                Some(column) if rules::is_legal(column, &board) => board
                    .drop_piece(column as usize, player)
                    .map(|(next, square)| (column as usize, next, square)),
                _ => None,
            };

            let Some((column, next, square)) = landed else {
                strikes += 1;
                self.rejected += 1;
                warn!(%player, ?reply, strikes, "rejected move");
                if self.max_illegal_moves.is_some_and(|limit| strikes >= limit) {
                    return Ok(State::GameOver {
                        outcome: Outcome::Forfeit(player),
                        board,
                    });
                }
                continue;
            };

            debug!(%player, column, square, "move accepted");
            self.moves.push(Move {
                player,
                column,
                square,
            });

            return Ok(if rules::is_four_in_a_row(square, &next) {
                State::GameOver {
                    outcome: Outcome::Winner(player),
                    board: next,
                }
            } else {
                State::AwaitingMove {
                    player: player.other(),
                    board: next,
                }
            });
        }
    }

    /// Ask `player`'s strategy for a column. `None` means the reply was not a
    /// number.
    fn request(&mut self, player: Player, board: &Board) -> Result<Option<i64>, MatchError> {
        let strategy = match player {
            Player::First => &mut *self.first,
            Player::Second => &mut *self.second,
        };
        match strategy.request_move(player, board) {
            Ok(column) => Ok(Some(column)),
            Err(e) if !e.is_fatal() => {
                debug!(%player, strategy = strategy.name(), error = %e, "malformed reply");
                Ok(None)
            }
            Err(source) => Err(MatchError::Strategy { player, source }),
        }
    }

    fn observe(&mut self, board: &Board) {
        if let Some(observer) = self.observer.as_mut() {
            observer(board);
        }
    }
}
