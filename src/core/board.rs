use super::error::BoardError;
use super::types::{Cell, Position, Side};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_SIZE: usize = 8;

/// 8方向 (N, S, E, W と斜め)
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 盤面
///
/// `cells` is row-major with `size * size` entries. Cloning copies the whole
/// grid, so a clone never shares state with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard 8x8 opening position.
    pub fn new() -> Self {
        Self::opening(DEFAULT_SIZE)
    }

    pub fn with_size(size: usize) -> Result<Self, BoardError> {
        if size < 4 || size % 2 != 0 {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self::opening(size))
    }

    fn opening(size: usize) -> Self {
        let mut board = Board {
            size,
            cells: vec![Cell::Empty; size * size],
        };
        let mid = size / 2;
        board.set(mid - 1, mid - 1, Cell::Stone(Side::White));
        board.set(mid, mid, Cell::Stone(Side::White));
        board.set(mid - 1, mid, Cell::Stone(Side::Black));
        board.set(mid, mid - 1, Cell::Stone(Side::Black));
        board
    }

    /// Builds a board from text rows (`B`/`X`/`●` black, `W`/`O`/`○` white,
    /// anything else empty). Handy for setting up positions in tests and tools.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size < 4 || size % 2 != 0 {
            return Err(BoardError::InvalidSize(size));
        }
        let mut board = Board {
            size,
            cells: vec![Cell::Empty; size * size],
        };
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != size {
                return Err(BoardError::InvalidSize(chars.len()));
            }
            for (col, ch) in chars.into_iter().enumerate() {
                let cell = match ch {
                    'B' | 'X' | '●' => Cell::Stone(Side::Black),
                    'W' | 'O' | '○' => Cell::Stone(Side::White),
                    _ => Cell::Empty,
                };
                board.set(row, col, cell);
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::InvalidCoordinate {
                row,
                col,
                size: self.size,
            });
        }
        Ok(())
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    /// Cell content at a coordinate, bounds-checked.
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        self.check_bounds(row, col)?;
        Ok(self.cells[self.index(row, col)])
    }

    /// Row slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Ray walk from (row, col) in direction (dr, dc). True if at least one
    /// opposing stone is passed before reaching one of `side`'s own stones.
    pub fn would_flip(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        side: Side,
    ) -> Result<bool, BoardError> {
        self.check_bounds(row, col)?;
        Ok(self.ray_flips(row, col, dr, dc, side))
    }

    // (row, col) は盤内であること
    fn ray_flips(&self, row: usize, col: usize, dr: isize, dc: isize, side: Side) -> bool {
        let n = self.size as isize;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut found_opponent = false;

        while r >= 0 && r < n && c >= 0 && c < n {
            match self.cells[self.index(r as usize, c as usize)] {
                Cell::Empty => return false,
                Cell::Stone(s) if s == side => return found_opponent,
                Cell::Stone(_) => found_opponent = true,
            }
            r += dr;
            c += dc;
        }
        false
    }

    /// Never mutates the board.
    pub fn is_valid_move(&self, row: usize, col: usize, side: Side) -> Result<bool, BoardError> {
        self.check_bounds(row, col)?;
        Ok(self.is_legal_unchecked(row, col, side))
    }

    fn is_legal_unchecked(&self, row: usize, col: usize, side: Side) -> bool {
        if !self.cells[self.index(row, col)].is_empty() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.ray_flips(row, col, dr, dc, side))
    }

    /// All legal placements for `side` in row-major order.
    pub fn valid_moves(&self, side: Side) -> Vec<Position> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_legal_unchecked(row, col, side) {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    pub fn has_valid_move(&self, side: Side) -> bool {
        (0..self.size).any(|row| (0..self.size).any(|col| self.is_legal_unchecked(row, col, side)))
    }

    /// Places a stone for `side` and flips every bracketed run.
    ///
    /// Returns `Ok(false)` without touching the board when the move is illegal.
    pub fn apply_move(&mut self, row: usize, col: usize, side: Side) -> Result<bool, BoardError> {
        if !self.is_valid_move(row, col, side)? {
            return Ok(false);
        }

        // 反転方向は置く前に確定させる
        let flipping: Vec<(isize, isize)> = DIRECTIONS
            .iter()
            .copied()
            .filter(|&(dr, dc)| self.ray_flips(row, col, dr, dc, side))
            .collect();

        self.set(row, col, Cell::Stone(side));

        let opponent = Cell::Stone(side.opponent());
        for (dr, dc) in flipping {
            let mut r = row as isize + dr;
            let mut c = col as isize + dc;
            while self.cells[self.index(r as usize, c as usize)] == opponent {
                self.set(r as usize, c as usize, Cell::Stone(side));
                r += dr;
                c += dc;
            }
        }
        Ok(true)
    }

    pub fn apply(&mut self, pos: Position, side: Side) -> Result<bool, BoardError> {
        self.apply_move(pos.row, pos.col, side)
    }

    /// (black, white)
    pub fn score(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(black, white), cell| match cell {
                Cell::Stone(Side::Black) => (black + 1, white),
                Cell::Stone(Side::White) => (black, white + 1),
                Cell::Empty => (black, white),
            })
    }

    pub fn count(&self, side: Side) -> usize {
        let (black, white) = self.score();
        match side {
            Side::Black => black,
            Side::White => white,
        }
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    /// Neither side can place a stone.
    pub fn is_game_over(&self) -> bool {
        !self.has_valid_move(Side::Black) && !self.has_valid_move(Side::White)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..self.size {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;
        for (row, cells) in self.rows().enumerate() {
            write!(f, "{}", row)?;
            for cell in cells {
                write!(f, " {}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_position() {
        let board = Board::new();
        assert_eq!(board.score(), (2, 2));
        assert_eq!(board.get(3, 3).unwrap(), Cell::Stone(Side::White));
        assert_eq!(board.get(4, 4).unwrap(), Cell::Stone(Side::White));
        assert_eq!(board.get(3, 4).unwrap(), Cell::Stone(Side::Black));
        assert_eq!(board.get(4, 3).unwrap(), Cell::Stone(Side::Black));
        assert_eq!(board.empty_count(), 60);
    }

    #[test]
    fn test_opening_moves_are_row_major() {
        let board = Board::new();
        let moves = board.valid_moves(Side::Black);
        assert_eq!(
            moves,
            vec![
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(4, 5),
                Position::new(5, 4),
            ]
        );
    }

    #[test]
    fn test_invalid_size() {
        assert_eq!(Board::with_size(3), Err(BoardError::InvalidSize(3)));
        assert_eq!(Board::with_size(7), Err(BoardError::InvalidSize(7)));
        assert_eq!(Board::with_size(6).unwrap().score(), (2, 2));
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut board = Board::new();
        let err = BoardError::InvalidCoordinate {
            row: 8,
            col: 0,
            size: 8,
        };
        assert_eq!(board.get(8, 0), Err(err.clone()));
        assert_eq!(board.is_valid_move(8, 0, Side::Black), Err(err.clone()));
        assert_eq!(board.apply_move(8, 0, Side::Black), Err(err));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_would_flip_stops_at_edge_and_empty() {
        let board = Board::from_rows(&[
            "W W B . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . W B . . .",
            ". . . B W . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ])
        .unwrap();
        assert_eq!(board.would_flip(0, 2, 0, 1, Side::Black), Ok(false));
        // 盤端で終わる白の列は挟めない
        assert_eq!(board.would_flip(0, 2, 0, -1, Side::Black), Ok(false));
        // 隣が自分の石なら挟めない
        assert_eq!(board.would_flip(2, 3, 1, 0, Side::White), Ok(false));
        assert_eq!(board.would_flip(2, 3, 1, 0, Side::Black), Ok(true));
    }

    #[test]
    fn test_would_flip_rejects_off_board_start() {
        let board = Board::from_rows(&[
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . W B . . .",
            ". . . B W . . .",
            ". . . . . . . .",
            ". . . B . . . .",
            ". . . W . . . .",
        ])
        .unwrap();
        // 盤外 (8,3) から北へ歩くと白を挟んだように見えるが、座標エラーになる
        assert_eq!(
            board.would_flip(8, 3, -1, 0, Side::Black),
            Err(BoardError::InvalidCoordinate {
                row: 8,
                col: 3,
                size: 8
            })
        );
        assert!(board.would_flip(usize::MAX, 0, 1, 0, Side::Black).is_err());
        assert!(board.would_flip(0, usize::MAX, 0, 1, Side::White).is_err());
    }

    #[test]
    fn test_multi_direction_flip() {
        let mut board = Board::from_rows(&[
            "B . B . B . . .",
            ". W W W . . . .",
            "B W . W B . . .",
            ". W W W . . . .",
            "B . B . B . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ])
        .unwrap();
        assert!(board.apply_move(2, 2, Side::Black).unwrap());
        for (r, c) in [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)] {
            assert_eq!(board.get(r, c).unwrap(), Cell::Stone(Side::Black), "({r},{c})");
        }
        assert_eq!(board.score(), (17, 0));
    }

    #[test]
    fn test_illegal_move_leaves_board_untouched() {
        let mut board = Board::new();
        let before = board.clone();
        assert!(!board.apply_move(0, 0, Side::Black).unwrap());
        assert!(!board.apply_move(3, 3, Side::Black).unwrap());
        assert_eq!(board, before);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new();
        let mut copy = board.clone();
        assert!(copy.apply_move(2, 3, Side::Black).unwrap());
        assert_eq!(board.score(), (2, 2));
        assert_eq!(copy.score(), (4, 1));
    }

    #[test]
    fn test_display() {
        let board = Board::with_size(4).unwrap();
        let text = board.to_string();
        assert_eq!(text, "  0 1 2 3\n0 · · · ·\n1 · ○ ● ·\n2 · ● ○ ·\n3 · · · ·\n");
    }
}
