use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::board::{COLS, ROWS};
use crate::error::GameError;

/// A target cell. The column picks where the piece is dropped; the row names
/// the cell the flank rule is checked against, while the piece itself lands on
/// the lowest empty row of the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub col: usize,
    pub row: usize,
}

impl Move {
    pub fn new(col: usize, row: usize) -> Self {
        Move { col, row }
    }

    /// Bounds check only; does not consult any board.
    pub fn is_valid(&self) -> bool {
        self.col < COLS && self.row < ROWS
    }

    /// Parse free text containing a parenthesized pair such as `(3, 5)`.
    ///
    /// The first parenthesized group holding exactly two comma-separated
    /// integers is used; earlier groups that don't are skipped.
    pub fn parse(text: &str) -> Result<Move, GameError> {
        let mut reason = "expected a coordinate pair like (3, 5)";

        for (open, _) in text.match_indices('(') {
            let rest = &text[open + 1..];
            let Some(close) = rest.find(')') else {
                break;
            };

            let mut parts = rest[..close].split(',');
            let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next())
            else {
                continue;
            };

            match (first.trim().parse::<i64>(), second.trim().parse::<i64>()) {
                (Ok(col), Ok(row)) => return Move::checked(col, row),
                _ => reason = "coordinates must be integers",
            }
        }

        Err(GameError::Parse {
            input: text.to_string(),
            reason,
        })
    }

    fn checked(col: i64, row: i64) -> Result<Move, GameError> {
        let in_range = |v: i64, limit: usize| v >= 0 && (v as u64) < limit as u64;
        if !in_range(col, COLS) || !in_range(row, ROWS) {
            return Err(GameError::OutOfRange { col, row });
        }
        Ok(Move::new(col as usize, row as usize))
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::parse(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_bounds() {
        assert!(Move::new(0, 0).is_valid());
        assert!(Move::new(7, 7).is_valid());
        assert!(!Move::new(8, 0).is_valid());
        assert!(!Move::new(0, 8).is_valid());
    }

    #[test]
    fn test_parse_plain_pair() {
        assert_eq!(Move::parse("(3, 5)").unwrap(), Move::new(3, 5));
        assert_eq!("(0,7)".parse::<Move>().unwrap(), Move::new(0, 7));
    }

    #[test]
    fn test_parse_embedded_in_text() {
        let mv = Move::parse("I'll play ( 4 ,  2 ) please").unwrap();
        assert_eq!(mv, Move::new(4, 2));
    }

    #[test]
    fn test_parse_skips_groups_without_a_pair() {
        assert_eq!(Move::parse("(x) then (3, 5)").unwrap(), Move::new(3, 5));
        assert_eq!(Move::parse("((2, 6))").unwrap(), Move::new(2, 6));
        assert_eq!(Move::parse("(a, b) or (1, 4)").unwrap(), Move::new(1, 4));
        assert_eq!(Move::parse("(1, 4) or (2, 5)").unwrap(), Move::new(1, 4));
    }

    #[test]
    fn test_parse_missing_pattern() {
        for input in ["", "3, 5", "(3 5)", "(3, 5", "(1, 2, 3)"] {
            let err = Move::parse(input).unwrap_err();
            assert!(
                matches!(&err, GameError::Parse { input: got, .. } if got == input),
                "expected parse error for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_non_numeric() {
        let err = Move::parse("(a, 2)").unwrap_err();
        assert!(matches!(err, GameError::Parse { .. }));
        let err = Move::parse("(99999999999999999999, 2)").unwrap_err();
        assert!(matches!(err, GameError::Parse { .. }));
    }

    #[test]
    fn test_parse_out_of_range() {
        let err = Move::parse("(8, 0)").unwrap_err();
        assert!(matches!(err, GameError::OutOfRange { col: 8, row: 0 }));
        let err = Move::parse("(-1, 3)").unwrap_err();
        assert!(matches!(err, GameError::OutOfRange { col: -1, row: 3 }));
    }

    #[test]
    fn test_display_matches_parse_format() {
        let mv = Move::new(6, 1);
        assert_eq!(mv.to_string(), "(6, 1)");
        assert_eq!(mv.to_string().parse::<Move>().unwrap(), mv);
    }
}
