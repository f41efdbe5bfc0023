use crate::core::{Board, Position, Side};
use crate::logic::{apply_move, legal_moves};
use crate::player::{PlayerController, StrategyKind};

/// One-ply chooser: the move leaving the mover with the most stones.
pub struct GreedyAI {
    pub name: String,
}

impl GreedyAI {
    pub fn new(name: &str) -> Self {
        GreedyAI {
            name: name.to_string(),
        }
    }
}

impl PlayerController for GreedyAI {
    fn choose_move(&self, board: &Board, side: Side) -> Option<Position> {
        let mut best_move = None;
        let mut best_count = 0;

        for mv in legal_moves(board, side) {
            let next_board = apply_move(board, mv, side);
            let count = next_board.count(side);
            // 同数なら先に見つけた手を残す
            if best_move.is_none() || count > best_count {
                best_count = count;
                best_move = Some(mv);
            }
        }

        best_move
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Greedy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_bigger_flip() {
        let board = Board::from_rows(&[
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . W B . . .",
            ". . . B W . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". B W W W . . .",
        ])
        .unwrap();
        let greedy = GreedyAI::new("greedy");
        assert_eq!(greedy.choose_move(&board, Side::Black), Some(Position::new(7, 5)));
    }

    #[test]
    fn test_opening_tie_keeps_first() {
        let greedy = GreedyAI::new("greedy");
        assert_eq!(
            greedy.choose_move(&Board::new(), Side::Black),
            Some(Position::new(2, 3))
        );
    }

    #[test]
    fn test_no_moves() {
        let board = Board::from_rows(&["B B B B", "B B B B", "B B B B", "B B B ."]).unwrap();
        let greedy = GreedyAI::new("greedy");
        assert_eq!(greedy.choose_move(&board, Side::White), None);
        assert_eq!(greedy.choose_move(&board, Side::Black), None);
    }
}
