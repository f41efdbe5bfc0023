pub mod replay;

use crate::core::{Board, BoardError, Position, Side};
use crate::logic::{legal_moves, outcome, GameOutcome};
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

pub use replay::ReplayViewer;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("{player} ({side}) chose illegal move {mv}")]
    IllegalMove {
        player: String,
        side: Side,
        mv: Position,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// One turn as seen by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub side: Side,
    /// `None` is a pass
    pub mv: Option<Position>,
}

/// Finished game: final score plus the full turn list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    pub turns: Vec<Turn>,
    pub placements: usize,
    pub duration: Duration,
}

pub struct Game {
    pub board: Board,
    pub current_side: Side,
    pub history: Vec<Turn>,
    consecutive_passes: usize,
    placements: usize,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            board,
            current_side: Side::Black,
            history: Vec::new(),
            consecutive_passes: 0,
            placements: 0,
        }
    }

    /// 2回連続のパスで終局
    pub fn is_over(&self) -> bool {
        self.consecutive_passes >= 2
    }

    pub fn placements(&self) -> usize {
        self.placements
    }

    pub fn last_move(&self) -> Option<Position> {
        self.history.last().and_then(|turn| turn.mv)
    }

    pub fn outcome(&self) -> GameOutcome {
        outcome(&self.board)
    }

    /// Plays one turn for the side to move and hands the turn over.
    pub fn step(
        &mut self,
        black: &dyn PlayerController,
        white: &dyn PlayerController,
    ) -> Result<Turn, GameError> {
        let side = self.current_side;
        let controller = match side {
            Side::Black => black,
            Side::White => white,
        };

        // 合法手がなければ問い合わせずにパス
        let mv = if legal_moves(&self.board, side).is_empty() {
            log::debug!("{} passes (no valid moves)", controller.name());
            None
        } else {
            controller.choose_move(&self.board, side)
        };

        match mv {
            Some(mv) => {
                if !self.board.apply(mv, side)? {
                    return Err(GameError::IllegalMove {
                        player: controller.name().to_string(),
                        side,
                        mv,
                    });
                }
                log::debug!("{} ({}) plays {}", controller.name(), side, mv);
                self.consecutive_passes = 0;
                self.placements += 1;
            }
            None => {
                log::debug!("{} ({}) passes", controller.name(), side);
                self.consecutive_passes += 1;
            }
        }

        let turn = Turn { side, mv };
        self.history.push(turn);
        self.current_side = side.opponent();
        Ok(turn)
    }

    /// Plays until both sides pass in a row.
    pub fn play(
        &mut self,
        black: &dyn PlayerController,
        white: &dyn PlayerController,
    ) -> anyhow::Result<GameRecord> {
        let start = Instant::now();
        while !self.is_over() {
            self.step(black, white)?;
        }
        let record = GameRecord {
            outcome: self.outcome(),
            turns: self.history.clone(),
            placements: self.placements,
            duration: start.elapsed(),
        };
        log::info!(
            "{} vs {}: {} ({}-{}) after {} moves",
            black.name(),
            white.name(),
            record.outcome.winner,
            record.outcome.black,
            record.outcome.white,
            record.placements
        );
        Ok(record)
    }
}
