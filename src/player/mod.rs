pub mod ai;
pub mod controller;
pub mod tui;

pub use ai::{GreedyAI, MinimaxAI, RandomAI};
pub use controller::{PlayerController, StrategyKind};
pub use tui::TuiController;
