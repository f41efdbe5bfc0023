use crate::core::{Board, Position, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 合法手生成 (row-major)
pub fn legal_moves(board: &Board, side: Side) -> Vec<Position> {
    board.valid_moves(side)
}

/// 盤面をコピーしてから着手する。元の盤面は変更しない。
///
/// Panics if `mv` is not a legal placement for `side`; callers only pass moves
/// taken from `legal_moves` on the same board.
pub fn apply_move(board: &Board, mv: Position, side: Side) -> Board {
    let mut next = board.clone();
    let applied = next
        .apply(mv, side)
        .unwrap_or_else(|e| panic!("move {} for {} is off the board: {}", mv, side, e));
    assert!(applied, "move {} is not legal for {}", mv, side);
    next
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Winner {
    Black,
    White,
    Tie,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Winner::Black,
            Side::White => Winner::White,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Winner::Black => write!(f, "BLACK"),
            Winner::White => write!(f, "WHITE"),
            Winner::Tie => write!(f, "TIE"),
        }
    }
}

/// 石数から導出される対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub black: usize,
    pub white: usize,
    pub winner: Winner,
}

pub fn outcome(board: &Board) -> GameOutcome {
    let (black, white) = board.score();
    let winner = match black.cmp(&white) {
        std::cmp::Ordering::Greater => Winner::Black,
        std::cmp::Ordering::Less => Winner::White,
        std::cmp::Ordering::Equal => Winner::Tie,
    };
    GameOutcome {
        black,
        white,
        winner,
    }
}

/// 盤面の占有率 (0.0 - 1.0)
pub fn game_progress(board: &Board) -> f64 {
    let cells = (board.size() * board.size()) as f64;
    board.occupied_count() as f64 / cells
}
