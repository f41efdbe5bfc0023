pub mod config;
pub mod eval;
pub mod evaluator;
pub mod greedy;
pub mod minimax;
pub mod pst;
pub mod random;

pub use config::AIConfig;
pub use eval::{EvalBreakdown, GamePhase, PhaseEvaluator};
pub use evaluator::{Evaluator, MaterialEvaluator};
pub use greedy::GreedyAI;
pub use minimax::{MinimaxAI, SearchOptions, SearchStats};
pub use random::RandomAI;
