//! Match driver: alternate two agents on a game until it ends.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::Agent;
use crate::error::GameError;
use crate::game::{GameOutcome, GameState, Move, Player};

/// One applied move as it landed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub player: Player,
    pub target: Move,
    pub landed: Move,
}

/// Everything needed to replay or report a finished (or abandoned) match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub black: String,
    pub white: String,
    pub moves: Vec<PlayedMove>,
    /// `None` when an agent abandoned the game before it was decided.
    pub outcome: Option<GameOutcome>,
}

/// Play `state` forward until it is decided or an agent gives up.
///
/// `after_move` runs after every applied move, e.g. to print the board.
pub fn play_match(
    state: &mut GameState,
    black: &mut dyn Agent,
    white: &mut dyn Agent,
    mut after_move: impl FnMut(&GameState),
) -> Result<MatchRecord, GameError> {
    let mut record = MatchRecord {
        black: black.name().to_string(),
        white: white.name().to_string(),
        moves: Vec::new(),
        outcome: None,
    };
    info!(black = %record.black, white = %record.white, "starting match");

    while let Some(player) = state.current_player() {
        let agent: &mut dyn Agent = match player {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };

        let Some(target) = agent.select_move(state) else {
            warn!(player = %player, agent = agent.name(), "agent abandoned the game");
            break;
        };
        let landed = state.make_move(target)?;
        record.moves.push(PlayedMove {
            player,
            target,
            landed,
        });
        after_move(state);
    }

    record.outcome = state.outcome();
    info!(moves = record.moves.len(), outcome = ?record.outcome, "match over");
    Ok(record)
}
