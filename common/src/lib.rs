mod player;

pub mod games;

pub use games::opponent::{Decision, PushoverOpponent, Reason};
pub use games::session::GameSession;
pub use games::tic_tac_toe::{Board, Cell, GameState, Line, Phase, TrisEngine, LINES};
pub use games::MoveError;
pub use player::Player;
