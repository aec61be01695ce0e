use super::agent::Agent;
use super::heuristic::{Heuristic, ViabilityHeuristic};
use crate::game::{GameState, Move};

/// Plays the possible move whose successor scores best for the mover.
///
/// Each candidate is applied to a clone, so the live game's listeners never
/// see the trial moves. Ties go to the earliest move in row-major order.
pub struct GreedyAgent;

impl GreedyAgent {
    /// Score and order every possible move, best first.
    pub fn ranked_moves(state: &GameState) -> Vec<(Move, f64)> {
        let Some(mover) = state.current_player() else {
            return Vec::new();
        };
        let heuristic = ViabilityHeuristic::new(mover);

        let mut ranked: Vec<(Move, f64)> = state
            .possible_moves()
            .into_iter()
            .filter_map(|mv| {
                let mut next = state.clone();
                next.make_move(mv).ok()?;
                Some((mv, heuristic.evaluate(&next)))
            })
            .collect();
        // Stable sort keeps row-major order among equal scores.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

impl Agent for GreedyAgent {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        Self::ranked_moves(state).first().map(|&(mv, _)| mv)
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}
