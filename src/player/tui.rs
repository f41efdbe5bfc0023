use crate::core::{Board, Position, Side};
use crate::display::{render_board, DisplayState};
use crate::logic::legal_moves;
use crate::player::{PlayerController, StrategyKind};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::time::Duration;

/// Human input through the terminal. Only legal squares are accepted.
pub struct TuiController {
    name: String,
}

impl TuiController {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    fn read_key() -> std::io::Result<Option<KeyCode>> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                return Ok(Some(code));
            }
        }
        Ok(None)
    }
}

impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Human
    }

    fn choose_move(&self, board: &Board, side: Side) -> Option<Position> {
        let moves = legal_moves(board, side);
        let first = *moves.first()?;

        let mut state = DisplayState {
            cursor: first,
            highlights: moves.clone(),
            status_msg: Some(format!("{}'s turn ({})", self.name, side)),
            show_cursor: true,
            ..DisplayState::default()
        };
        let last = board.size() - 1;

        loop {
            if let Err(e) = render_board(board, &state) {
                log::error!("render failed: {}", e);
                return None;
            }
            print!("[Arrows]: Move | [Enter]: Place | [q]: Resign\r\n");

            let code = match Self::read_key() {
                Ok(Some(code)) => code,
                Ok(None) => continue,
                Err(e) => {
                    log::error!("input failed: {}", e);
                    return None;
                }
            };

            match code {
                KeyCode::Char('q') => return None,
                KeyCode::Up if state.cursor.row > 0 => state.cursor.row -= 1,
                KeyCode::Down if state.cursor.row < last => state.cursor.row += 1,
                KeyCode::Left if state.cursor.col > 0 => state.cursor.col -= 1,
                KeyCode::Right if state.cursor.col < last => state.cursor.col += 1,
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if moves.contains(&state.cursor) {
                        return Some(state.cursor);
                    }
                    state.status_msg = Some(format!(
                        "{} is not a legal move. Try again.",
                        state.cursor
                    ));
                }
                _ => {}
            }
        }
    }
}
