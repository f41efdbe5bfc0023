use super::config::EvaluationConfig;
use crate::core::DEFAULT_SIZE;

// Square weights for the standard board, row 0 at the top.
// Corners are worth taking; the X-squares (diagonal to a corner) and
// C-squares (beside a corner) hand the corner to the opponent.
const STANDARD_WEIGHTS: [i32; 64] = [
    100, -20, 10, 5, 5, 10, -20, 100, //
    -20, -50, -2, -2, -2, -2, -50, -20, //
    10, -2, 5, 1, 1, 5, -2, 10, //
    5, -2, 1, 0, 0, 1, -2, 5, //
    5, -2, 1, 0, 0, 1, -2, 5, //
    10, -2, 5, 1, 1, 5, -2, 10, //
    -20, -50, -2, -2, -2, -2, -50, -20, //
    100, -20, 10, 5, 5, 10, -20, 100,
];

/// Static per-square weights for one board size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    size: usize,
    weights: Vec<i32>,
}

impl WeightTable {
    /// The fixed table for 8x8, a synthesized one for any other size.
    pub fn for_size(size: usize, config: &EvaluationConfig) -> Self {
        if size == DEFAULT_SIZE {
            Self::standard()
        } else {
            Self::generate(size, config)
        }
    }

    pub fn standard() -> Self {
        WeightTable {
            size: DEFAULT_SIZE,
            weights: STANDARD_WEIGHTS.to_vec(),
        }
    }

    pub fn generate(size: usize, config: &EvaluationConfig) -> Self {
        let mut weights = vec![0; size * size];
        let last = size - 1;

        let edge_score = |i: usize| {
            if i == 0 || i == last {
                config.corner_value
            } else if i == 1 || i == last - 1 {
                config.c_square_value
            } else if i == 2 {
                config.near_edge_value
            } else {
                config.edge_value
            }
        };

        for i in 0..size {
            let v = edge_score(i);
            weights[i] = v; // top
            weights[last * size + i] = v; // bottom
            weights[i * size] = v; // left
            weights[i * size + last] = v; // right
        }

        let x_squares = [(1, 1), (1, last - 1), (last - 1, 1), (last - 1, last - 1)];
        let c_squares = [
            (0, 1),
            (1, 0),
            (0, last - 1),
            (1, last),
            (last, 1),
            (last - 1, 0),
            (last, last - 1),
            (last - 1, last),
        ];
        for &(r, c) in &x_squares {
            weights[r * size + c] = config.x_square_value;
        }
        for &(r, c) in &c_squares {
            weights[r * size + c] = config.c_square_value;
        }

        let mid = last as f64 / 2.0;
        for r in 1..last {
            for c in 1..last {
                if x_squares.contains(&(r, c)) || c_squares.contains(&(r, c)) {
                    continue;
                }
                let dist = (r as f64 - mid).abs() + (c as f64 - mid).abs();
                let scaled = dist / size as f64 * config.near_edge_value as f64;
                weights[r * size + c] = scaled.round_ties_even() as i32;
            }
        }

        WeightTable { size, weights }
    }

    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.weights[row * self.size + col]
    }
}
