#[cfg(test)]
mod tests {
    use crate::core::{Board, Cell, Position, Side};
    use crate::logic::{apply_move, game_progress, legal_moves, outcome, Winner};
    use crate::player::{GreedyAI, MinimaxAI, PlayerController, RandomAI};

    #[test]
    fn test_initial_state() {
        let board = Board::new();
        assert_eq!(board.score(), (2, 2));
        assert_eq!(legal_moves(&board, Side::Black).len(), 4);
        assert_eq!(legal_moves(&board, Side::White).len(), 4);
        assert_eq!(game_progress(&board), 4.0 / 64.0);
    }

    #[test]
    fn test_standard_opening_flip() {
        let board = Board::new();
        let next = apply_move(&board, Position::new(2, 3), Side::Black);

        assert_eq!(next.score(), (4, 1));
        assert_eq!(next.get(2, 3).unwrap(), Cell::Stone(Side::Black));
        // (3,3) の白だけが (4,3) の黒との間で挟まれる
        assert_eq!(next.get(3, 3).unwrap(), Cell::Stone(Side::Black));
        assert_eq!(next.get(4, 4).unwrap(), Cell::Stone(Side::White));
        // コピー元は変わらない
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_is_valid_move_does_not_mutate() {
        let board = Board::new();
        let before = board.clone();
        for row in 0..8 {
            for col in 0..8 {
                let first = board.is_valid_move(row, col, Side::White).unwrap();
                let second = board.is_valid_move(row, col, Side::White).unwrap();
                assert_eq!(first, second);
            }
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_cell_count_invariant_through_random_play() {
        for seed in 0..10 {
            let players = [RandomAI::with_seed("b", seed), RandomAI::with_seed("w", seed + 50)];
            let mut board = Board::new();
            let mut side = Side::Black;
            let mut passes = 0;

            while passes < 2 {
                let player = &players[if side == Side::Black { 0 } else { 1 }];
                match player.choose_move(&board, side) {
                    Some(mv) => {
                        assert!(board.apply(mv, side).unwrap());
                        passes = 0;
                    }
                    None => passes += 1,
                }
                let (black, white) = board.score();
                assert_eq!(black + white + board.empty_count(), 64);
                side = side.opponent();
            }
        }
    }

    #[test]
    fn test_every_strategy_passes_without_moves() {
        let board = Board::from_rows(&[
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W .",
        ])
        .unwrap();
        let strategies: Vec<Box<dyn PlayerController>> = vec![
            Box::new(RandomAI::new("random")),
            Box::new(GreedyAI::new("greedy")),
            Box::new(MinimaxAI::new("minimax", 3)),
        ];
        for strategy in &strategies {
            assert_eq!(strategy.choose_move(&board, Side::Black), None, "{}", strategy.name());
        }

        let result = outcome(&board);
        assert_eq!(result.winner, Winner::White);
        assert_eq!((result.black, result.white), (0, 63));
    }

    #[test]
    fn test_outcome_tie() {
        let board = Board::from_rows(&["B B W W", "B B W W", "B B W W", "B B W W"]).unwrap();
        assert!(board.is_game_over());
        assert_eq!(outcome(&board).winner, Winner::Tie);
    }

    #[test]
    fn test_side_opponent_is_involution() {
        for side in [Side::Black, Side::White] {
            assert_ne!(side.opponent(), side);
            assert_eq!(side.opponent().opponent(), side);
        }
    }
}
