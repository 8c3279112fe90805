pub mod opponent;
pub mod session;
pub mod tic_tac_toe;

use crate::player::Player;
use derive_more::{Display, Error};

/// Reasons a move is rejected by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Index outside the 0-8 board range
    #[display("Cell {index} is outside the board")]
    OutOfRange { index: usize },
    /// Target cell already has a mark
    #[display("Cell {index} is already occupied")]
    CellOccupied { index: usize },
    /// The mover is not the active player
    #[display("It is the {expected}'s turn, not the {got}'s")]
    WrongTurn { expected: Player, got: Player },
    /// The game already reached a terminal phase
    #[display("Game is already over")]
    GameOver,
}
