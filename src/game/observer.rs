use std::sync::mpsc;

use tracing::info;

use super::{GameOutcome, Move, Player};

/// What a listener sees of a live game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    Moved { player: Player, mv: Move },
    GameOver(GameOutcome),
}

/// Listener registered on a [`GameState`](super::GameState).
///
/// Callbacks run synchronously inside `make_move`, in registration order.
/// `on_game_end` follows the final `on_move`; after it the state drops the
/// observer and no further calls arrive.
pub trait MoveObserver: Send {
    fn on_move(&mut self, player: Player, mv: Move);

    fn on_game_end(&mut self, _outcome: GameOutcome) {}
}

/// Forwards events onto an unbounded channel. Each listener gets its own
/// queue, so a consumer that falls behind never blocks the engine or the
/// other listeners. The sender is dropped on game end, closing the channel.
pub struct ChannelObserver {
    tx: Option<mpsc::Sender<MoveEvent>>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<MoveEvent>) -> Self {
        ChannelObserver { tx: Some(tx) }
    }

    /// Create an observer together with the receiving end of its queue.
    pub fn channel() -> (Self, mpsc::Receiver<MoveEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }

    fn send(&mut self, event: MoveEvent) {
        if let Some(tx) = &self.tx {
            // Receiver hung up: stop sending rather than erroring the game.
            if tx.send(event).is_err() {
                self.tx = None;
            }
        }
    }
}

impl MoveObserver for ChannelObserver {
    fn on_move(&mut self, player: Player, mv: Move) {
        self.send(MoveEvent::Moved { player, mv });
    }

    fn on_game_end(&mut self, outcome: GameOutcome) {
        self.send(MoveEvent::GameOver(outcome));
        self.tx = None;
    }
}

/// Emits a tracing event per move and one for the result.
#[derive(Debug, Default)]
pub struct LoggingObserver {
    moves: usize,
}

impl MoveObserver for LoggingObserver {
    fn on_move(&mut self, player: Player, mv: Move) {
        self.moves += 1;
        info!(number = self.moves, player = %player, mv = %mv, "move played");
    }

    fn on_game_end(&mut self, outcome: GameOutcome) {
        info!(moves = self.moves, outcome = ?outcome, "game finished");
    }
}
