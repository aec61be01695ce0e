//! # Flank Five
//!
//! A two-player drop game on a fixed 8x8 grid. Pieces fall to the lowest empty
//! cell of a column, a drop is only legal when its target cell flanks an
//! opponent run Reversi-style, and five in a row (horizontal, vertical or
//! diagonal) wins. Running out of legal moves is a draw.
//!
//! ## Modules
//!
//! - [`game`] — Board, moves, the shared line scanner, the game state machine,
//!   move observers and the textual save format
//! - [`ai`] — Viability heuristic and the agents built on it
//! - [`play`] — Match driver producing serializable match records
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod play;
