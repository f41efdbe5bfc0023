use crate::core::{Board, Cell, Position, Side};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{self, stdout, Write};

pub struct DisplayState {
    pub cursor: Position,
    pub highlights: Vec<Position>,
    pub status_msg: Option<String>,
    pub last_move: Option<Position>,
    pub show_cursor: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: Position::default(),
            highlights: Vec::new(),
            status_msg: None,
            last_move: None,
            show_cursor: false,
        }
    }
}

pub fn render_board(board: &Board, state: &DisplayState) -> io::Result<()> {
    let mut out = stdout();

    // 画面クリア（スクロール防止）
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    print!("=== Othello ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    print!("   ");
    for col in 0..board.size() {
        print!(" {} ", col);
    }
    print!("\r\n");

    for (row, cells) in board.rows().enumerate() {
        print!("{:2} ", row);
        for (col, cell) in cells.iter().enumerate() {
            let pos = Position::new(row, col);
            let is_cursor = state.show_cursor && state.cursor == pos;
            let is_highlight = state.highlights.contains(&pos);
            let is_last_move = state.last_move == Some(pos);

            let symbol = if cell.is_empty() && is_highlight {
                '*'
            } else {
                cell.symbol()
            };
            let (prefix, suffix) = if is_cursor { ('[', ']') } else { (' ', ' ') };
            let text = format!("{}{}{}", prefix, symbol, suffix);

            if is_cursor {
                print!("{}", text.yellow());
            } else if is_last_move {
                print!("{}", text.red());
            } else if is_highlight {
                print!("{}", text.green());
            } else {
                match cell {
                    Cell::Stone(Side::Black) => print!("{}", text.cyan()),
                    Cell::Stone(Side::White) => print!("{}", text.magenta()),
                    Cell::Empty => print!("{}", text),
                }
            }
        }
        print!("\r\n");
    }

    let (black, white) = board.score();
    print!(
        "\r\nScore - Black {}: {}, White {}: {}\r\n",
        Side::Black.symbol(),
        black,
        Side::White.symbol(),
        white
    );
    out.flush()
}
