//! Evaluator trait for board evaluation
//!
//! Defines a common interface for different evaluation strategies.

use crate::core::{Board, Side};

/// Trait for evaluating board positions
pub trait Evaluator: Send + Sync {
    /// Evaluate the board from `perspective`'s point of view
    ///
    /// Returns:
    ///   - Positive score: `perspective` advantage
    ///   - Negative score: opponent advantage
    fn evaluate(&self, board: &Board, perspective: Side) -> f64;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}

/// Raw stone differential. Mostly useful as a baseline and in tests.
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board, perspective: Side) -> f64 {
        board.count(perspective) as f64 - board.count(perspective.opponent()) as f64
    }

    fn name(&self) -> &str {
        "material"
    }
}
