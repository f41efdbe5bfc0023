use crate::core::{Board, Position, Side};
use crate::logic::legal_moves;
use crate::player::{PlayerController, StrategyKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Mutex;

pub struct RandomAI {
    pub name: String,
    seeded: Option<Mutex<StdRng>>,
}

impl RandomAI {
    pub fn new(name: &str) -> Self {
        RandomAI {
            name: name.to_string(),
            seeded: None,
        }
    }

    /// Reproducible move sequence for a given seed.
    pub fn with_seed(name: &str, seed: u64) -> Self {
        RandomAI {
            name: name.to_string(),
            seeded: Some(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }
}

impl PlayerController for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, board: &Board, side: Side) -> Option<Position> {
        let moves = legal_moves(board, side);
        match &self.seeded {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                moves.choose(&mut *rng).copied()
            }
            None => {
                let mut rng = rand::thread_rng();
                moves.choose(&mut rng).copied()
            }
        }
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_a_legal_move() {
        let board = Board::new();
        let ai = RandomAI::new("random");
        for _ in 0..20 {
            let mv = ai.choose_move(&board, Side::Black).unwrap();
            assert!(board.is_valid_move(mv.row, mv.col, Side::Black).unwrap());
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let board = Board::new();
        let a = RandomAI::with_seed("a", 7);
        let b = RandomAI::with_seed("b", 7);
        for _ in 0..10 {
            assert_eq!(a.choose_move(&board, Side::White), b.choose_move(&board, Side::White));
        }
    }

    #[test]
    fn test_pass_when_no_moves() {
        let board = Board::from_rows(&["W W W W", "W W W W", "W W W W", "W W W ."]).unwrap();
        assert_eq!(RandomAI::new("random").choose_move(&board, Side::Black), None);
    }
}
