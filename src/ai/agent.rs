use crate::game::{GameState, Move};

/// Universal interface for everything that can take a turn.
pub trait Agent {
    /// Choose a move for the player to move in `state`, or `None` to abandon
    /// the game (no legal move, or the input source ran dry).
    fn select_move(&mut self, state: &GameState) -> Option<Move>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
