//! Core game logic: board representation, moves, the shared line scanner, and
//! the game state machine with its legality, gravity drop and end-of-game
//! rules.

mod board;
pub mod lines;
mod moves;
mod observer;
mod player;
pub mod save;
mod state;

pub use board::{row_label, Board, Cell, COLS, ROWS};
pub use moves::Move;
pub use observer::{ChannelObserver, LoggingObserver, MoveEvent, MoveObserver};
pub use player::Player;
pub use state::{five_in_a_row, GameOutcome, GameState, GameStatus, WIN_LENGTH};

#[cfg(test)]
pub(crate) use state::tests::{black_about_to_win, board_from, full_board_without_five};
