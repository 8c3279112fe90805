use super::MoveError;
use crate::player::Player;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Three board indices that win when owned by one player
pub type Line = [usize; 3];

/// Winning combinations, scanned in this order
pub const LINES: [Line; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // columns
    [0, 4, 8], [2, 4, 6],            // diagonals
];

/// Contents of a single board cell
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Human,
    Computer,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Player::Human),
            Cell::Computer => Some(Player::Computer),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Human => Cell::Human,
            Player::Computer => Cell::Computer,
        }
    }
}

/// Represents the 3x3 tris board as a flat array of 9 cells
/// Index mapping: [0,1,2,3,4,5,6,7,8]
/// Visual layout:
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Cell at `index`, or None when the index is off the board
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Convert row and column (0-indexed) to board index
    pub fn coords_to_index(row: usize, col: usize) -> Option<usize> {
        if row < 3 && col < 3 {
            Some(row * 3 + col)
        } else {
            None
        }
    }

    /// Indices of all empty cells, ascending
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of marked cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// First line, in table order, whose three cells share one owner
    pub fn winning_line(&self) -> Option<Line> {
        LINES.iter().copied().find(|&[a, b, c]| {
            !self.cells[a].is_empty()
                && self.cells[a] == self.cells[b]
                && self.cells[b] == self.cells[c]
        })
    }

    /// Classify the board: won by the owner of the first complete line,
    /// drawn when full without a line, otherwise still in progress.
    pub fn evaluate(&self) -> Phase {
        if let Some([a, _, _]) = self.winning_line() {
            if let Some(winner) = self.cells[a].owner() {
                return Phase::Won(winner);
            }
        }
        if self.is_full() {
            Phase::Drawn
        } else {
            Phase::InProgress
        }
    }

    /// The empty cell that would complete a line for `player` right now.
    ///
    /// A line qualifies when exactly two of its cells belong to `player` and
    /// the third is empty. Ties go to the first qualifying line in [`LINES`].
    pub fn find_immediate_win(&self, player: Player) -> Option<usize> {
        let mark = Cell::from(player);
        LINES.iter().find_map(|line| {
            let owned = line.iter().filter(|&&i| self.cells[i] == mark).count();
            let empty = line.iter().copied().find(|&i| self.cells[i].is_empty());
            if owned == 2 {
                empty
            } else {
                None
            }
        })
    }

    /// Whether some line is fully owned by `player`
    fn has_line(&self, player: Player) -> bool {
        let mark = Cell::from(player);
        LINES.iter().any(|line| line.iter().all(|&i| self.cells[i] == mark))
    }

    /// Whether alternating play with the human opening can produce this board.
    ///
    /// The human has either as many marks as the computer or one more, and
    /// whoever owns a line made the last move, so at most one side owns one.
    fn is_reachable(&self) -> bool {
        let count = |mark: Cell| self.cells.iter().filter(|&&cell| cell == mark).count();
        let (human, computer) = (count(Cell::Human), count(Cell::Computer));
        if human != computer && human != computer + 1 {
            return false;
        }
        match (self.has_line(Player::Human), self.has_line(Player::Computer)) {
            (true, true) => false,
            (true, false) => human == computer + 1,
            (false, true) => human == computer,
            (false, false) => true,
        }
    }

    fn place(&mut self, index: usize, player: Player) {
        self.cells[index] = Cell::from(player);
    }
}

/// Terminal or non-terminal classification of a game
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    InProgress,
    Won(Player),
    Drawn,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        self != Phase::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Phase::Won(player) => Some(player),
            _ => None,
        }
    }
}

/// Represents the complete state of a tris game against the computer
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    active_player: Player,
    move_count: u8,
    phase: Phase,
}

impl GameState {
    /// Fresh game: empty board, human to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active_player: Player::Human,
            move_count: 0,
            phase: Phase::InProgress,
        }
    }

    /// Rebuild the state a legal game would have reached on `board`.
    /// The human always opens, so the side to move follows from the count.
    pub fn from_board(board: Board) -> Self {
        let filled = board.filled();
        Self {
            board,
            active_player: if filled % 2 == 0 { Player::Human } else { Player::Computer },
            move_count: filled as u8,
            phase: board.evaluate(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn move_count(&self) -> u8 {
        self.move_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        self.board.legal_moves()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse from JSON string, rejecting states no game could reach
    pub fn from_json(json: &str) -> Result<Self, String> {
        let state: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if !state.board.is_reachable() || state != Self::from_board(state.board) {
            return Err("Inconsistent game state".to_string());
        }
        Ok(state)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateless tris rules engine
/// This engine doesn't hold any state; it purely transforms game states
#[derive(Debug, Clone, Copy, Default)]
pub struct TrisEngine;

impl TrisEngine {
    pub fn new() -> Self {
        Self
    }

    /// Apply a move and return the resulting state.
    ///
    /// The old state is not modified. Fails when the game is over, when
    /// `player` is not the active player, or when `index` is off the board
    /// or already taken.
    pub fn try_apply_move(
        &self,
        state: &GameState,
        index: usize,
        player: Player,
    ) -> Result<GameState, MoveError> {
        if state.is_finished() {
            return Err(MoveError::GameOver);
        }

        if state.active_player != player {
            return Err(MoveError::WrongTurn {
                expected: state.active_player,
                got: player,
            });
        }

        match state.board.get(index) {
            None => return Err(MoveError::OutOfRange { index }),
            Some(cell) if !cell.is_empty() => return Err(MoveError::CellOccupied { index }),
            Some(_) => {}
        }

        let mut new_state = *state;
        new_state.board.place(index, player);
        new_state.move_count += 1;
        new_state.active_player = player.other();
        new_state.phase = new_state.board.evaluate();

        Ok(new_state)
    }

    /// Apply a move, leaving the state unchanged when the move is invalid.
    pub fn apply_move(&self, state: &GameState, index: usize, player: Player) -> GameState {
        match self.try_apply_move(state, index, player) {
            Ok(new_state) => new_state,
            Err(e) => {
                debug!(index, %player, error = %e, "ignoring invalid move");
                *state
            }
        }
    }
}
