//! Static evaluation of a position for a fixed target player.
//!
//! [`ViabilityHeuristic`] scores in three stages, stopping at the first that
//! applies:
//!
//! 1. **Terminal**: draw is `0.0`, a win for the target is `1.0`, a loss `-1.0`.
//! 2. **Immediate opportunity**: every column's landing cell is checked for a
//!    drop that would give the mover a run of four or more. If the target is to
//!    move and has one, the score is `0.99`. If the opponent is to move, each
//!    opportunity adds a large penalty to the opponent's viability.
//! 3. **Viability**: every 3-cell window holding pieces of only one player adds
//!    1, 5 or 20 (for 1, 2 or 3 pieces) to that player's total. Diagonals of
//!    length 3 are not scanned. The score is
//!    `(black - white) / (1000 + black + white)`, negated for White.

use crate::game::lines::{self, Direction};
use crate::game::{GameOutcome, GameState, GameStatus, Player, COLS};

/// Trait for evaluating a game state from a fixed player's perspective.
pub trait Heuristic: Send {
    /// Score in `[-1, 1]`; higher is better for the target player.
    fn evaluate(&self, state: &GameState) -> f64;
}

/// Score returned when the target player can complete a run on this ply.
pub const OPPORTUNITY_SCORE: f64 = 0.99;
/// Viability added to the opponent per immediate opportunity it holds.
pub const OPPORTUNITY_PENALTY: i64 = 10_000;
/// Added to the denominator to damp scores toward zero.
pub const DAMPING: i64 = 1_000;

/// Run length (landing piece included) treated as an immediate opportunity.
const OPPORTUNITY_RUN: usize = 4;
const CLUSTER_WIDTH: usize = 3;
/// Shortest line the viability scan visits. Rows and columns always qualify;
/// the length-3 corner diagonals do not.
const VIABILITY_MIN_LINE: usize = CLUSTER_WIDTH + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViabilityHeuristic {
    target: Player,
}

impl ViabilityHeuristic {
    pub fn new(target: Player) -> Self {
        ViabilityHeuristic { target }
    }
}

/// Running viability totals for both players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viability {
    pub black: i64,
    pub white: i64,
}

impl Viability {
    fn add(self, player: Player, amount: i64) -> Viability {
        match player {
            Player::Black => Viability {
                black: self.black + amount,
                ..self
            },
            Player::White => Viability {
                white: self.white + amount,
                ..self
            },
        }
    }

    /// Fold one window into the totals. Only windows free of the other
    /// player's pieces count.
    fn with_window(self, black: usize, white: usize) -> Viability {
        match (black, white) {
            (n, 0) if n > 0 => self.add(Player::Black, cluster_weight(n)),
            (0, n) if n > 0 => self.add(Player::White, cluster_weight(n)),
            _ => self,
        }
    }
}

fn cluster_weight(pieces: usize) -> i64 {
    match pieces {
        1 => 1,
        2 => 5,
        3 => 20,
        _ => 0,
    }
}

/// Columns where the mover's drop would land next to enough of its own
/// pieces to form a run of four along some direction. Each column counts once.
pub fn immediate_opportunities(state: &GameState, mover: Player) -> usize {
    let board = state.board();
    let own = mover.to_cell();

    (0..COLS)
        .filter_map(|col| board.landing_row(col).map(|row| (row, col)))
        .filter(|&(row, col)| {
            Direction::ALL.iter().any(|direction| {
                let (dr, dc) = direction.step();
                let forward = lines::run_length(board, row, col, (dr, dc), own);
                let backward = lines::run_length(board, row, col, (-dr, -dc), own);
                forward + backward + 1 >= OPPORTUNITY_RUN
            })
        })
        .count()
}

/// Viability of both players summed over every 3-cell window of each row,
/// column and diagonal of length 4 or more.
pub fn viability(state: &GameState) -> Viability {
    let board = state.board();
    lines::lines(VIABILITY_MIN_LINE)
        .flat_map(|line| lines::windows(board, line, CLUSTER_WIDTH))
        .fold(Viability::default(), |acc, window| {
            acc.with_window(window.black, window.white)
        })
}

impl Heuristic for ViabilityHeuristic {
    fn evaluate(&self, state: &GameState) -> f64 {
        let mover = match state.status() {
            GameStatus::Finished(GameOutcome::Draw) => return 0.0,
            GameStatus::Finished(GameOutcome::Winner(winner)) => {
                return if winner == self.target { 1.0 } else { -1.0 };
            }
            GameStatus::InProgress { to_move } => to_move,
        };

        let opportunities = immediate_opportunities(state, mover) as i64;
        let mut totals = Viability::default();
        if mover == self.target {
            if opportunities > 0 {
                return OPPORTUNITY_SCORE;
            }
        } else {
            totals = totals.add(mover, OPPORTUNITY_PENALTY * opportunities);
        }

        let board_totals = viability(state);
        let black = totals.black + board_totals.black;
        let white = totals.white + board_totals.white;

        let score = (black - white) as f64 / (DAMPING + black + white) as f64;
        match self.target {
            Player::Black => score,
            Player::White => -score,
        }
    }
}
