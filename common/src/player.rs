use serde::{Deserialize, Serialize};
use std::fmt;

/// The two sides of a tris game. The human always moves first.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// The player who moves after this one
    pub fn other(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Mark drawn on the board: O for the human, X for the computer
    pub fn symbol(self) -> char {
        match self {
            Player::Human => 'O',
            Player::Computer => 'X',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Computer => write!(f, "computer"),
        }
    }
}
