use super::tic_tac_toe::GameState;
use crate::player::Player;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];
const EDGES: [usize; 4] = [1, 3, 5, 7];

/// Chance of playing a corner when neither side threatens a win
const CORNER_BIAS: f64 = 0.7;
/// Chance of playing an edge once the corner roll failed
const EDGE_BIAS: f64 = 0.5;

/// Why the opponent picked a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Human could win next turn; picked anything but the blocking cell
    SpareHumanWin,
    /// Computer could win; picked anything but the winning cell
    AvoidOwnWin,
    /// Only the cell the heuristic wanted to avoid was left
    Forced,
    /// First reply while the center is open; center skipped
    OpeningCorner,
    Corner,
    Edge,
    Anywhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub index: usize,
    pub reason: Reason,
}

/// Computer opponent that tries hard to lose.
///
/// It never blocks a human win unless no other cell is free. When only the
/// computer threatens, it skips its own winning cell the same way; when both
/// sides threaten, just the human's cell is avoided, so the computer may
/// stumble into its own win. Without threats on the board it drifts toward
/// corners, then edges.
pub struct PushoverOpponent<R = StdRng> {
    rng: R,
}

impl PushoverOpponent<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PushoverOpponent<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Cell the computer plays next, or None when the game has no move to make
    pub fn choose_move(&mut self, state: &GameState) -> Option<usize> {
        self.decide(state).map(|decision| decision.index)
    }

    pub fn decide(&mut self, state: &GameState) -> Option<Decision> {
        let legal = state.legal_moves();
        if state.is_finished() || legal.is_empty() {
            debug!(phase = ?state.phase(), "no move to make");
            return None;
        }

        let board = state.board();
        let decision = if let Some(human_win) = board.find_immediate_win(Player::Human) {
            self.pick_excluding(&legal, human_win, Reason::SpareHumanWin)
        } else if let Some(computer_win) = board.find_immediate_win(Player::Computer) {
            self.pick_excluding(&legal, computer_win, Reason::AvoidOwnWin)
        } else {
            self.pick_biased(state, &legal)
        }?;

        debug!(index = decision.index, reason = ?decision.reason, "computer picked a cell");
        Some(decision)
    }

    fn pick_excluding(&mut self, legal: &[usize], avoid: usize, reason: Reason) -> Option<Decision> {
        let others: Vec<usize> = legal.iter().copied().filter(|&i| i != avoid).collect();
        self.pick(&others, reason).or(Some(Decision {
            index: avoid,
            reason: Reason::Forced,
        }))
    }

    fn pick_biased(&mut self, state: &GameState, legal: &[usize]) -> Option<Decision> {
        let corners: Vec<usize> = CORNERS.iter().copied().filter(|i| legal.contains(i)).collect();
        let edges: Vec<usize> = EDGES.iter().copied().filter(|i| legal.contains(i)).collect();

        if state.move_count() == 1 && legal.contains(&CENTER) {
            if let Some(decision) = self.pick(&corners, Reason::OpeningCorner) {
                return Some(decision);
            }
        }
        if !corners.is_empty() && self.rng.gen_bool(CORNER_BIAS) {
            return self.pick(&corners, Reason::Corner);
        }
        if !edges.is_empty() && self.rng.gen_bool(EDGE_BIAS) {
            return self.pick(&edges, Reason::Edge);
        }
        self.pick(legal, Reason::Anywhere)
    }

    fn pick(&mut self, from: &[usize], reason: Reason) -> Option<Decision> {
        from.choose(&mut self.rng)
            .map(|&index| Decision { index, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tic_tac_toe::{Board, Cell, Phase, TrisEngine};

    fn state(pattern: &str) -> GameState {
        let mut cells = [Cell::Empty; 9];
        for (cell, c) in cells.iter_mut().zip(pattern.chars()) {
            *cell = match c {
                'O' => Cell::Human,
                'X' => Cell::Computer,
                _ => Cell::Empty,
            };
        }
        GameState::from_board(Board::from_cells(cells))
    }

    fn opponent(seed: u64) -> PushoverOpponent<StdRng> {
        PushoverOpponent::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_never_blocks_human_win() {
        // X _ _
        // O O _   human wins at 5
        // _ _ _
        let s = state("X__OO____");
        assert_eq!(s.board().find_immediate_win(Player::Human), Some(5));

        let mut ai = opponent(7);
        for _ in 0..1000 {
            let decision = ai.decide(&s).unwrap();
            assert_ne!(decision.index, 5);
            assert!(s.legal_moves().contains(&decision.index));
            assert_eq!(decision.reason, Reason::SpareHumanWin);
        }
    }

    #[test]
    fn test_takes_human_win_when_forced() {
        // O X X
        // X O O
        // O X _   only 8 is free and it completes the human diagonal
        let s = state("OXXXOOOX_");
        assert_eq!(s.legal_moves(), vec![8]);
        assert_eq!(s.board().find_immediate_win(Player::Human), Some(8));

        let mut ai = opponent(1);
        for _ in 0..50 {
            assert_eq!(ai.decide(&s), Some(Decision { index: 8, reason: Reason::Forced }));
        }
    }

    #[test]
    fn test_never_takes_own_win() {
        // X O _
        // _ X O   computer wins at 8
        // O _ _
        let s = state("XO__XOO__");
        assert_eq!(s.active_player(), Player::Computer);
        assert_eq!(s.board().find_immediate_win(Player::Human), None);
        assert_eq!(s.board().find_immediate_win(Player::Computer), Some(8));

        let mut ai = opponent(42);
        for _ in 0..1000 {
            let decision = ai.decide(&s).unwrap();
            assert_ne!(decision.index, 8);
            assert_eq!(decision.reason, Reason::AvoidOwnWin);
        }
    }

    #[test]
    fn test_takes_own_win_when_forced() {
        // X O O
        // O X X
        // X O _   only 8 is free and it completes the computer diagonal
        let s = state("XOOOXXXO_");
        assert_eq!(s.board().find_immediate_win(Player::Human), None);

        let mut ai = opponent(3);
        assert_eq!(ai.decide(&s), Some(Decision { index: 8, reason: Reason::Forced }));
    }

    #[test]
    fn test_human_threat_checked_before_own_win() {
        // X X _
        // O O _   both sides threaten; only the human cell is avoided
        // O _ _
        let s = state("XX_OO_O__");
        assert_eq!(s.active_player(), Player::Computer);
        assert_eq!(s.board().find_immediate_win(Player::Human), Some(5));
        assert_eq!(s.board().find_immediate_win(Player::Computer), Some(2));

        let mut ai = opponent(11);
        let mut own_wins = 0;
        for _ in 0..1000 {
            let decision = ai.decide(&s).unwrap();
            assert_eq!(decision.reason, Reason::SpareHumanWin);
            assert_ne!(decision.index, 5);
            if decision.index == 2 {
                own_wins += 1;
            }
        }
        // 2, 7 and 8 are equally likely
        assert!(own_wins > 0, "computer never took its own win");
    }

    #[test]
    fn test_opening_reply_avoids_center() {
        let engine = TrisEngine::new();
        let mut ai = opponent(5);

        for opening in [0, 1, 2, 3, 5, 6, 7, 8] {
            let s = engine.apply_move(&GameState::new(), opening, Player::Human);
            for _ in 0..200 {
                let decision = ai.decide(&s).unwrap();
                assert_eq!(decision.reason, Reason::OpeningCorner);
                assert!(CORNERS.contains(&decision.index));
                assert_ne!(decision.index, opening);
            }
        }
    }

    #[test]
    fn test_center_opening_uses_bias() {
        let engine = TrisEngine::new();
        let s = engine.apply_move(&GameState::new(), CENTER, Player::Human);
        let mut ai = opponent(9);

        let trials = 10_000;
        let mut corners = 0;
        for _ in 0..trials {
            let decision = ai.decide(&s).unwrap();
            assert_ne!(decision.index, CENTER);
            assert_ne!(decision.reason, Reason::OpeningCorner);
            if CORNERS.contains(&decision.index) {
                corners += 1;
            }
        }

        // 0.7 directly, plus half of the 0.15 fallback that lands anywhere
        let share = corners as f64 / trials as f64;
        assert!((0.72..0.83).contains(&share), "corner share {share}");
    }

    #[test]
    fn test_no_move_when_game_over() {
        let mut ai = opponent(0);

        let won = state("OOOXX____");
        assert_eq!(won.phase(), Phase::Won(Player::Human));
        assert_eq!(ai.choose_move(&won), None);

        let drawn = state("OXOOXXXOO");
        assert_eq!(drawn.phase(), Phase::Drawn);
        assert_eq!(ai.choose_move(&drawn), None);
    }

    #[test]
    fn test_random_games_only_pick_legal_cells() {
        let engine = TrisEngine::new();
        let mut ai = opponent(2024);
        let mut human = StdRng::seed_from_u64(99);

        for _ in 0..500 {
            let mut s = GameState::new();
            while !s.is_finished() {
                let index = match s.active_player() {
                    Player::Human => *s.legal_moves().choose(&mut human).unwrap(),
                    Player::Computer => {
                        let index = ai.choose_move(&s).unwrap();
                        if s.legal_moves().len() > 1 {
                            assert_ne!(Some(index), s.board().find_immediate_win(Player::Human));
                        }
                        index
                    }
                };
                let next = engine.apply_move(&s, index, s.active_player());
                assert_ne!(next, s);
                s = next;
            }
        }
    }
}
