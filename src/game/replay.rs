use super::Turn;
use crate::core::{Board, BoardError};
use crate::display::{render_board, DisplayState};
use crossterm::event::{self, Event, KeyCode};
use std::time::Duration;

/// Steps back and forth through a finished game.
pub struct ReplayViewer {
    turns: Vec<Turn>,
    boards: Vec<Board>,
    current_index: usize,
}

impl ReplayViewer {
    /// Pre-computes the board after every turn. Fails if a recorded move does
    /// not fit the board.
    pub fn new(initial_board: Board, turns: Vec<Turn>) -> Result<Self, BoardError> {
        let mut boards = Vec::with_capacity(turns.len() + 1);
        let mut board = initial_board;
        boards.push(board.clone());

        for turn in &turns {
            if let Some(mv) = turn.mv {
                board.apply(mv, turn.side)?;
            }
            boards.push(board.clone());
        }

        Ok(Self {
            turns,
            boards,
            current_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Board after `index` turns (0 is the starting position).
    pub fn board_at(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let board = &self.boards[self.current_index];
            let last_turn = if self.current_index > 0 {
                Some(self.turns[self.current_index - 1])
            } else {
                None
            };

            let state = DisplayState {
                last_move: last_turn.and_then(|t| t.mv),
                status_msg: last_turn.map(|t| match t.mv {
                    Some(mv) => format!("{} played {}", t.side, mv),
                    None => format!("{} passed", t.side),
                }),
                ..DisplayState::default()
            };
            render_board(board, &state)?;

            print!("\r\n=== Replay ===\r\n");
            print!(
                "Turn {}/{} | [←/→] Navigate | [q] Quit\r\n",
                self.current_index,
                self.turns.len()
            );

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Right | KeyCode::Char('n') => {
                            if self.current_index < self.turns.len() {
                                self.current_index += 1;
                            }
                        }
                        KeyCode::Left | KeyCode::Char('p') => {
                            if self.current_index > 0 {
                                self.current_index -= 1;
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(())
    }
}
