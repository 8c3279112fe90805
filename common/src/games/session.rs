use super::opponent::PushoverOpponent;
use super::tic_tac_toe::{GameState, Phase, TrisEngine};
use crate::player::Player;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

/// Owns the one live game: its state, the rules engine and the opponent.
///
/// Front ends hold a single session and drive it turn by turn; the state is
/// replaced wholesale on every accepted move and on reset.
pub struct GameSession<R = StdRng> {
    state: GameState,
    engine: TrisEngine,
    opponent: PushoverOpponent<R>,
}

impl GameSession<StdRng> {
    pub fn new() -> Self {
        Self::with_opponent(PushoverOpponent::from_entropy())
    }
}

impl Default for GameSession<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_opponent(opponent: PushoverOpponent<R>) -> Self {
        Self {
            state: GameState::new(),
            engine: TrisEngine::new(),
            opponent,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn active_player(&self) -> Player {
        self.state.active_player()
    }

    /// Play the human's mark at `index`. Returns false when the move was ignored.
    pub fn play_human(&mut self, index: usize) -> bool {
        let next = self.engine.apply_move(&self.state, index, Player::Human);
        let accepted = next != self.state;
        self.state = next;
        if accepted {
            debug!(index, phase = ?self.state.phase(), "human moved");
            self.log_outcome();
        }
        accepted
    }

    /// Let the computer take its turn.
    ///
    /// Skipped when the game already ended or the human is to move.
    pub fn play_computer(&mut self) -> Option<usize> {
        if self.state.is_finished() || self.state.active_player() != Player::Computer {
            debug!(phase = ?self.state.phase(), "skipping computer turn");
            return None;
        }

        let index = self.opponent.choose_move(&self.state)?;
        self.state = self.engine.apply_move(&self.state, index, Player::Computer);
        debug!(index, phase = ?self.state.phase(), "computer moved");
        self.log_outcome();
        Some(index)
    }

    /// Throw the current game away and start over
    pub fn reset(&mut self) {
        self.state = GameState::new();
        info!("new game");
    }

    fn log_outcome(&self) {
        match self.state.phase() {
            Phase::Won(winner) => info!(%winner, moves = self.state.move_count(), "game won"),
            Phase::Drawn => info!("game drawn"),
            Phase::InProgress => {}
        }
    }
}
