use std::fmt;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lines::{self, COMPASS};
use super::observer::{ChannelObserver, MoveEvent, MoveObserver};
use super::{Board, Cell, Move, Player};
use crate::error::GameError;

/// Pieces in a row needed to win.
pub const WIN_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress { to_move: Player },
    Finished(GameOutcome),
}

/// A live game: the board, whose turn it is, and the registered listeners.
///
/// Cloning copies the board and status only. A clone never notifies the
/// listeners of the game it was taken from.
pub struct GameState {
    board: Board,
    status: GameStatus,
    observers: Vec<Box<dyn MoveObserver>>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            status: GameStatus::InProgress {
                to_move: Player::Black, // Black starts
            },
            observers: Vec::new(),
        }
    }

    /// Build a state around an existing position and settle whether it is
    /// already decided.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut state = GameState {
            board,
            status: GameStatus::InProgress { to_move },
            observers: Vec::new(),
        };
        state.verify_end_game();
        state
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Player to move, or `None` once the game is over
    pub fn current_player(&self) -> Option<Player> {
        match self.status {
            GameStatus::InProgress { to_move } => Some(to_move),
            GameStatus::Finished(_) => None,
        }
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.status {
            GameStatus::InProgress { .. } => None,
            GameStatus::Finished(outcome) => Some(outcome),
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished(_))
    }

    /// Register a listener for moves applied to this state.
    pub fn subscribe(&mut self, observer: impl MoveObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Register a channel-backed listener and hand back its receiving end.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<MoveEvent> {
        let (observer, rx) = ChannelObserver::channel();
        self.subscribe(observer);
        rx
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Whether the player to move may target `mv`.
    ///
    /// The target cell must be empty and, along at least one of the eight
    /// compass directions, touch a run of opponent pieces capped by one of the
    /// mover's own pieces. A player with no piece on the board yet may target
    /// any empty cell.
    pub fn is_valid_move(&self, mv: Move) -> bool {
        let GameStatus::InProgress { to_move } = self.status else {
            return false;
        };
        if !mv.is_valid() || self.board.get(mv.row, mv.col) != Cell::Empty {
            return false;
        }

        let own = to_move.to_cell();
        if self.board.count(own) == 0 {
            return true;
        }
        let opponent = to_move.other().to_cell();

        COMPASS.iter().any(|&step| {
            let mut cells = lines::ray(&self.board, mv.row, mv.col, step);
            cells.next() == Some(opponent) && cells.find(|&c| c != opponent) == Some(own)
        })
    }

    /// Every legal target in row-major order
    pub fn possible_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        all_cells().filter(|&mv| self.is_valid_move(mv)).collect()
    }

    pub fn has_possible_move(&self) -> bool {
        all_cells().any(|mv| self.is_valid_move(mv))
    }

    /// Drop the mover's piece into `mv.col` and advance the game.
    ///
    /// Returns the move as it landed (gravity row). Listeners are told about
    /// the landed move and, if this move ended the game, about the outcome,
    /// after which they are unsubscribed.
    pub fn make_move(&mut self, mv: Move) -> Result<Move, GameError> {
        if !self.is_valid_move(mv) {
            return Err(GameError::InvalidMove(mv));
        }
        let GameStatus::InProgress { to_move } = self.status else {
            return Err(GameError::InvalidMove(mv));
        };

        let row = self
            .board
            .drop_piece(mv.col, to_move.to_cell())
            .ok_or(GameError::InvalidMove(mv))?;
        let landed = Move::new(mv.col, row);

        self.status = GameStatus::InProgress {
            to_move: to_move.other(),
        };
        self.verify_end_game();
        debug!(player = %to_move, target = %mv, landed = %landed, status = ?self.status, "applied move");

        for observer in &mut self.observers {
            observer.on_move(to_move, landed);
        }
        if let GameStatus::Finished(outcome) = self.status {
            for mut observer in self.observers.drain(..) {
                observer.on_game_end(outcome);
            }
        }

        Ok(landed)
    }

    /// Settle the status after the board changed: five in a row wins,
    /// otherwise a mover without any legal target means a draw.
    fn verify_end_game(&mut self) {
        if self.is_game_over() {
            return;
        }

        if let Some(winner) = five_in_a_row(&self.board) {
            debug!(winner = %winner, "five in a row");
            self.status = GameStatus::Finished(GameOutcome::Winner(winner));
        } else if !self.has_possible_move() {
            debug!("no legal move left");
            self.status = GameStatus::Finished(GameOutcome::Draw);
        }
    }
}

/// First player found owning a full winning window, scanning rows, columns,
/// down-right diagonals then up-right diagonals.
pub fn five_in_a_row(board: &Board) -> Option<Player> {
    lines::all_windows(board, WIN_LENGTH).find_map(|window| {
        if window.black == WIN_LENGTH {
            Some(Player::Black)
        } else if window.white == WIN_LENGTH {
            Some(Player::White)
        } else {
            None
        }
    })
}

fn all_cells() -> impl Iterator<Item = Move> {
    (0..super::ROWS).flat_map(|row| (0..super::COLS).map(move |col| Move::new(col, row)))
}

impl Clone for GameState {
    fn clone(&self) -> Self {
        GameState {
            board: self.board,
            status: self.status,
            observers: Vec::new(),
        }
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board && self.status == other.status
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("board", &self.board)
            .field("status", &self.status)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        match self.status {
            GameStatus::InProgress { to_move } => writeln!(f, "{to_move} to move."),
            GameStatus::Finished(GameOutcome::Winner(player)) => {
                writeln!(f, "Game over - {player} won!")
            }
            GameStatus::Finished(GameOutcome::Draw) => writeln!(f, "Game over - draw!"),
        }
    }
}
