use std::io::{BufRead, Write};

use tracing::warn;

use super::agent::Agent;
use crate::game::{GameState, Move};

/// Reads moves as text such as `(3, 7)` from an input stream, re-prompting
/// until a legal one arrives. End of input or `quit` abandons the game.
pub struct HumanAgent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanAgent { input, output }
    }

    fn prompt(&mut self, state: &GameState) -> std::io::Result<Option<Move>> {
        let Some(player) = state.current_player() else {
            return Ok(None);
        };

        loop {
            write!(self.output, "{player}, enter a move as (column, row): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            match line.parse::<Move>() {
                Ok(mv) if state.is_valid_move(mv) => return Ok(Some(mv)),
                Ok(mv) => writeln!(self.output, "{mv} is not a legal move.")?,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Agent for HumanAgent<R, W> {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        match self.prompt(state) {
            Ok(mv) => mv,
            Err(e) => {
                warn!(error = %e, "failed to read move");
                None
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }
}
