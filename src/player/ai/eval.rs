//! # Evaluation Module
//!
//! Static evaluation for non-terminal search cut-offs. A score is always taken
//! from one side's perspective (positive = that side is better).
//!
//! ## Scoring Strategy
//! The score is composed of:
//! 1. **Position**: Sum of square weights of own stones minus the opponent's.
//! 2. **Pieces**: Own stone count minus the opponent's.
//! 3. **Mobility**: Own legal move count minus the opponent's.
//!
//! The three terms are blended with multipliers chosen by game phase
//! (fraction of occupied squares). Position and mobility dominate while the
//! board is open; raw stone count dominates near the end.

use super::config::{AIConfig, EvaluationConfig, PhaseWeights};
use super::evaluator::Evaluator;
use super::pst::WeightTable;
use crate::core::{Board, Cell, Side, DEFAULT_SIZE};
use crate::logic::game_progress;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    Early,
    Mid,
    End,
}

impl GamePhase {
    pub fn from_progress(progress: f64, config: &EvaluationConfig) -> Self {
        if progress < config.mid_game_threshold {
            GamePhase::Early
        } else if progress < config.end_game_threshold {
            GamePhase::Mid
        } else {
            GamePhase::End
        }
    }

    pub fn weights(self, config: &EvaluationConfig) -> PhaseWeights {
        match self {
            GamePhase::Early => config.early,
            GamePhase::Mid => config.mid,
            GamePhase::End => config.end,
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GamePhase::Early => write!(f, "Early Game"),
            GamePhase::Mid => write!(f, "Mid Game"),
            GamePhase::End => write!(f, "End Game"),
        }
    }
}

/// Every term of one evaluation, for logging and inspection.
#[derive(Debug, Clone, Serialize)]
pub struct EvalBreakdown {
    pub phase: GamePhase,
    pub game_progress: f64,
    pub position_score: i32,
    pub piece_diff: i32,
    pub my_moves: usize,
    pub opponent_moves: usize,
    pub mobility: i32,
    pub weights: PhaseWeights,
    pub final_score: f64,
}

pub struct PhaseEvaluator {
    config: EvaluationConfig,
    tables: HashMap<usize, WeightTable>,
}

impl Default for PhaseEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseEvaluator {
    /// Evaluator for the standard board using the process-wide config.
    pub fn new() -> Self {
        Self::with_config(AIConfig::get().evaluation.clone(), &[DEFAULT_SIZE])
    }

    /// Uses the process-wide config, with tables for 8x8 and `size`.
    pub fn for_board_size(size: usize) -> Self {
        Self::with_config(AIConfig::get().evaluation.clone(), &[DEFAULT_SIZE, size])
    }

    /// Weight tables for each of `sizes` are built here, once.
    pub fn with_config(config: EvaluationConfig, sizes: &[usize]) -> Self {
        let tables = sizes
            .iter()
            .map(|&size| (size, WeightTable::for_size(size, &config)))
            .collect();
        Self { config, tables }
    }

    pub fn has_table(&self, size: usize) -> bool {
        self.tables.contains_key(&size)
    }

    fn table(&self, size: usize) -> Cow<'_, WeightTable> {
        match self.tables.get(&size) {
            Some(table) => Cow::Borrowed(table),
            None => Cow::Owned(WeightTable::for_size(size, &self.config)),
        }
    }

    fn position_score(&self, board: &Board, perspective: Side) -> i32 {
        let table = self.table(board.size());
        let mut score = 0;
        for (r, row) in board.rows().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match *cell {
                    Cell::Stone(s) if s == perspective => score += table.get(r, c),
                    Cell::Stone(_) => score -= table.get(r, c),
                    Cell::Empty => {}
                }
            }
        }
        score
    }

    pub fn breakdown(&self, board: &Board, perspective: Side) -> EvalBreakdown {
        let position_score = self.position_score(board, perspective);

        let piece_diff =
            board.count(perspective) as i32 - board.count(perspective.opponent()) as i32;

        let my_moves = board.valid_moves(perspective).len();
        let opponent_moves = board.valid_moves(perspective.opponent()).len();
        let mobility = my_moves as i32 - opponent_moves as i32;

        let progress = game_progress(board);
        let phase = GamePhase::from_progress(progress, &self.config);
        let weights = phase.weights(&self.config);

        let final_score = position_score as f64 * weights.position
            + piece_diff as f64 * weights.pieces
            + mobility as f64 * weights.mobility;

        EvalBreakdown {
            phase,
            game_progress: progress,
            position_score,
            piece_diff,
            my_moves,
            opponent_moves,
            mobility,
            weights,
            final_score,
        }
    }
}

impl Evaluator for PhaseEvaluator {
    fn evaluate(&self, board: &Board, perspective: Side) -> f64 {
        self.breakdown(board, perspective).final_score
    }

    fn name(&self) -> &str {
        "phase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> PhaseEvaluator {
        PhaseEvaluator::with_config(EvaluationConfig::default(), &[8])
    }

    #[test]
    fn test_opening_is_balanced() {
        let board = Board::new();
        let eval = evaluator();
        assert_eq!(eval.evaluate(&board, Side::Black), 0.0);
        assert_eq!(eval.evaluate(&board, Side::White), 0.0);
    }

    #[test]
    fn test_after_first_move() {
        let mut board = Board::new();
        board.apply_move(2, 3, Side::Black).unwrap();
        let eval = evaluator();

        let b = eval.breakdown(&board, Side::Black);
        assert_eq!(b.phase, GamePhase::Early);
        assert_eq!(b.position_score, 1);
        assert_eq!(b.piece_diff, 3);
        assert_eq!(b.my_moves, 3);
        assert_eq!(b.opponent_moves, 3);
        assert_eq!(b.final_score, 2.5);

        assert_eq!(eval.evaluate(&board, Side::White), -2.5);
    }

    #[test]
    fn test_phase_boundaries() {
        let config = EvaluationConfig::default();
        assert_eq!(GamePhase::from_progress(0.49, &config), GamePhase::Early);
        assert_eq!(GamePhase::from_progress(0.5, &config), GamePhase::Mid);
        assert_eq!(GamePhase::from_progress(0.74, &config), GamePhase::Mid);
        assert_eq!(GamePhase::from_progress(0.75, &config), GamePhase::End);
        assert_eq!(GamePhase::End.weights(&config).pieces, 2.0);
    }

    #[test]
    fn test_corner_is_valued() {
        let eval = evaluator();
        let corner = Board::from_rows(&[
            "B . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . W B . . .",
            ". . . B W . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ])
        .unwrap();
        let x_square = Board::from_rows(&[
            ". . . . . . . .",
            ". B . . . . . .",
            ". . . . . . . .",
            ". . . W B . . .",
            ". . . B W . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ])
        .unwrap();
        assert!(eval.evaluate(&corner, Side::Black) > eval.evaluate(&x_square, Side::Black));
    }

    #[test]
    fn test_unseen_size_uses_generated_table() {
        let eval = evaluator();
        let board = Board::with_size(6).unwrap();
        // 中央4マスの重みはすべて1なので位置点は相殺される
        assert_eq!(eval.breakdown(&board, Side::Black).position_score, 0);
    }

    #[test]
    fn test_board_size_table_is_built_up_front() {
        let standard = evaluator();
        assert!(standard.has_table(8));
        assert!(!standard.has_table(6));

        let eval = PhaseEvaluator::with_config(EvaluationConfig::default(), &[8, 6]);
        assert!(eval.has_table(6));
        assert!(eval.has_table(8));

        let sized = PhaseEvaluator::for_board_size(6);
        assert!(sized.has_table(6));
        assert!(sized.has_table(8));

        // 事前生成した表と都度生成の表で結果は変わらない
        let mut board = Board::with_size(6).unwrap();
        board.apply_move(1, 2, Side::Black).unwrap();
        assert_eq!(
            eval.breakdown(&board, Side::Black).position_score,
            standard.breakdown(&board, Side::Black).position_score
        );
    }
}
