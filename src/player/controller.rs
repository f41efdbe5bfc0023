use crate::core::{Board, Position, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 戦略の種別 (UI 側の分岐用)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    Human,
    Random,
    Greedy,
    Minimax,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StrategyKind::Human => write!(f, "Human"),
            StrategyKind::Random => write!(f, "RandomAI"),
            StrategyKind::Greedy => write!(f, "GreedyAI"),
            StrategyKind::Minimax => write!(f, "MinimaxAI"),
        }
    }
}

/// プレイヤー操作のtrait
///
/// `None` means pass; every implementation returns it when `side` has no
/// legal move.
pub trait PlayerController: Send + Sync {
    fn choose_move(&self, board: &Board, side: Side) -> Option<Position>;
    fn name(&self) -> &str;
    fn kind(&self) -> StrategyKind;

    fn is_human(&self) -> bool {
        self.kind() == StrategyKind::Human
    }
}
