//! Textual save format.
//!
//! A saved game is the bordered grid produced by `GameState`'s `Display`
//! impl. Only the eight `| <row letter> | ...` lines carry data; the header,
//! rules and status line are ignored on the way back in, and the turn is
//! recovered from piece-count parity.

use std::path::Path;

use tracing::debug;

use super::{row_label, Board, Cell, GameState, Player, COLS, ROWS};
use crate::error::GameError;

/// Render a state in the save format.
pub fn render(state: &GameState) -> String {
    state.to_string()
}

/// Parse a saved game. End-of-game detection is re-run, so a decided position
/// comes back finished.
pub fn parse(text: &str) -> Result<GameState, GameError> {
    let mut board = Board::new();
    let mut row = 0;

    for line in text.lines() {
        if row == ROWS {
            break;
        }
        let Some((label, cells)) = split_row(line) else {
            continue;
        };
        if label != row_label(row).to_string() {
            return Err(parse_error(line, "board rows must run A to H"));
        }
        if cells.len() < COLS {
            return Err(parse_error(line, "row has fewer than 8 cells"));
        }
        for (col, raw) in cells.iter().take(COLS).enumerate() {
            let cell = parse_cell(raw).ok_or_else(|| parse_error(line, "unknown cell marker"))?;
            board.set(row, col, cell);
        }
        row += 1;
    }

    if row < ROWS {
        return Err(parse_error(text, "expected 8 board rows"));
    }

    let black = board.count(Cell::Black);
    let white = board.count(Cell::White);
    let to_move = if black == white {
        Player::Black
    } else if black == white + 1 {
        Player::White
    } else {
        return Err(GameError::Format { black, white });
    };

    let state = GameState::from_board(board, to_move);
    debug!(black, white, status = ?state.status(), "parsed saved game");
    Ok(state)
}

/// Read and parse a saved game from disk.
pub fn load(path: &Path) -> Result<GameState, GameError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Write a state to disk in the save format.
pub fn save(state: &GameState, path: &Path) -> Result<(), GameError> {
    std::fs::write(path, render(state))?;
    Ok(())
}

/// Split `| A | B |   | ...` into its row label and raw cell texts. Lines
/// that are not board rows (rules, column header, status) yield `None`.
fn split_row(line: &str) -> Option<(String, Vec<&str>)> {
    let line = line.trim();
    if !line.starts_with('|') {
        return None;
    }
    let mut parts = line.split('|').skip(1);
    let label = parts.next()?.trim();
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => {}
        _ => return None,
    }
    let cells: Vec<&str> = parts.collect();
    Some((label.to_string(), cells))
}

fn parse_cell(raw: &str) -> Option<Cell> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Cell::Empty);
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(marker), None) => Cell::from_marker(marker),
        _ => None,
    }
}

fn parse_error(input: &str, reason: &'static str) -> GameError {
    GameError::Parse {
        input: input.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{black_about_to_win, board_from, GameOutcome, Move};

    #[test]
    fn test_round_trip_in_progress() {
        let mut state = GameState::initial();
        state.make_move(Move::new(3, 7)).unwrap();
        state.make_move(Move::new(4, 7)).unwrap();
        state.make_move(Move::new(5, 7)).unwrap();

        let parsed = parse(&render(&state)).unwrap();
        assert_eq!(parsed.board(), state.board());
        assert_eq!(parsed.status(), state.status());
        assert_eq!(parsed.current_player(), Some(Player::White));
    }

    #[test]
    fn test_round_trip_richer_position() {
        let state = black_about_to_win();
        let parsed = parse(&render(&state)).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_parse_recovers_finished_game() {
        let mut state = black_about_to_win();
        state.make_move(Move::new(4, 7)).unwrap();

        let parsed = parse(&render(&state)).unwrap();
        assert_eq!(parsed.outcome(), Some(GameOutcome::Winner(Player::Black)));
    }

    #[test]
    fn test_parse_bare_rows_without_decorations() {
        let empty = "|   |   |   |   |   |   |   |   |";
        let bottom = "| B |   |   |   |   |   |   |   |";
        let mut text = String::new();
        for row in 0..ROWS {
            let cells = if row == ROWS - 1 { bottom } else { empty };
            text.push_str(&format!("| {} {}\n", row_label(row), cells));
        }
        let state = parse(&text).unwrap();
        assert_eq!(state.board().get(7, 0), Cell::Black);
        assert_eq!(state.current_player(), Some(Player::White));
    }

    #[test]
    fn test_parity_mismatch_is_format_error() {
        let board = board_from([
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "BBW.....",
        ]);
        // Two black, one white: fine, White to move.
        let ok = GameState::from_board(board, Player::White);
        assert!(parse(&render(&ok)).is_ok());

        let board = board_from([
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "BBB.W...",
        ]);
        let err = parse(&render(&GameState::from_board(board, Player::White))).unwrap_err();
        assert!(matches!(err, GameError::Format { black: 3, white: 1 }));

        let board = board_from([
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "B.WW....",
        ]);
        let err = parse(&render(&GameState::from_board(board, Player::Black))).unwrap_err();
        assert!(matches!(err, GameError::Format { black: 1, white: 2 }));
    }

    #[test]
    fn test_unknown_marker_is_parse_error() {
        let text = render(&GameState::initial()).replacen("| H |   |", "| H | X |", 1);
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, GameError::Parse { reason: "unknown cell marker", .. }));
    }

    #[test]
    fn test_missing_rows_is_parse_error() {
        let text: String = render(&GameState::initial())
            .lines()
            .filter(|l| !l.starts_with("| H"))
            .map(|l| format!("{l}\n"))
            .collect();
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, GameError::Parse { reason: "expected 8 board rows", .. }));
    }

    #[test]
    fn test_rows_out_of_order_is_parse_error() {
        let text = render(&GameState::initial()).replacen("| B |", "| C |", 1);
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, GameError::Parse { reason: "board rows must run A to H", .. }));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.txt");

        let mut state = GameState::initial();
        state.make_move(Move::new(2, 7)).unwrap();
        save(&state, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, GameError::Io(_)));
    }
}
