use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;
use crate::game::{GameState, Move};

/// An agent that selects uniformly at random from the possible moves.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &GameState) -> Option<Move> {
        let moves = state.possible_moves();
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..moves.len());
        Some(moves[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_selects_possible_move() {
        let mut agent = RandomAgent::with_seed(1);
        let mut state = GameState::initial();
        state.make_move(Move::new(3, 7)).unwrap();
        state.make_move(Move::new(4, 7)).unwrap();
        let possible = state.possible_moves();

        for _ in 0..50 {
            let mv = agent.select_move(&state).unwrap();
            assert!(possible.contains(&mv), "{mv} is not legal");
        }
    }

    #[test]
    fn test_random_agents_play_full_games() {
        for seed in 0..20 {
            let mut black = RandomAgent::with_seed(seed);
            let mut white = RandomAgent::with_seed(seed + 1000);
            let mut state = GameState::initial();

            let mut turn = 0;
            while !state.is_game_over() {
                let mv = if turn % 2 == 0 {
                    black.select_move(&state)
                } else {
                    white.select_move(&state)
                }
                .expect("in-progress state always has a possible move");
                state
                    .make_move(mv)
                    .unwrap_or_else(|e| panic!("seed {seed}: possible move rejected: {e}"));
                turn += 1;
            }

            assert!(state.outcome().is_some());
            assert!(turn <= 64);
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let state = GameState::initial();
        let a = RandomAgent::with_seed(42).select_move(&state);
        let b = RandomAgent::with_seed(42).select_move(&state);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_move_when_game_over() {
        let mut state = crate::game::black_about_to_win();
        state.make_move(Move::new(4, 7)).unwrap();
        assert_eq!(RandomAgent::with_seed(0).select_move(&state), None);
    }

    #[test]
    fn test_random_agent_name() {
        let agent = RandomAgent::new();
        assert_eq!(agent.name(), "Random");
    }
}
