use super::config::AIConfig;
use super::eval::PhaseEvaluator;
use super::evaluator::Evaluator;
use crate::core::{Board, Position, Side, DEFAULT_SIZE};
use crate::logic::{apply_move, legal_moves};
use crate::player::{PlayerController, StrategyKind};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

// 探索木のトレースは上位2階層まで
const TRACE_LEVELS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    /// Plies searched from the root, counting the root move itself.
    pub depth: usize,
    /// Alpha-beta cut-offs. Off means plain exhaustive minimax.
    pub pruning: bool,
    /// Evaluate root moves on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        let search = &AIConfig::get().search;
        SearchOptions {
            depth: search.default_depth,
            pruning: true,
            parallel: search.parallel_root,
        }
    }
}

/// Summary of the most recent root search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    pub depth: usize,
    pub nodes: u64,
    pub leaves: u64,
    pub cutoffs: u64,
    pub root_values: Vec<(Position, f64)>,
    pub best_move: Option<Position>,
    pub best_value: f64,
    pub elapsed_ms: u128,
}

#[derive(Default)]
struct Counters {
    nodes: AtomicU64,
    leaves: AtomicU64,
    cutoffs: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Per-search constants threaded through the recursion.
struct SearchContext<'a> {
    perspective: Side,
    counters: &'a Counters,
}

pub struct MinimaxAI {
    pub name: String,
    pub options: SearchOptions,
    evaluator: Box<dyn Evaluator>,
    last_stats: Mutex<Option<SearchStats>>,
}

impl MinimaxAI {
    pub fn new(name: &str, depth: usize) -> Self {
        Self::with_options(
            name,
            SearchOptions {
                depth,
                ..SearchOptions::default()
            },
        )
    }

    pub fn with_options(name: &str, options: SearchOptions) -> Self {
        Self::for_board_size(name, options, DEFAULT_SIZE)
    }

    /// Same as `with_options`, with the evaluator's weight table prepared for
    /// `size`x`size` games.
    pub fn for_board_size(name: &str, options: SearchOptions, size: usize) -> Self {
        Self {
            name: name.to_string(),
            options,
            evaluator: Box::new(PhaseEvaluator::for_board_size(size)),
            last_stats: Mutex::new(None),
        }
    }

    pub fn with_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats.lock().ok().and_then(|slot| slot.clone())
    }

    /// Best move for `side`, or `None` when `side` has to pass.
    ///
    /// Every root move is searched with fresh bounds; among equal values the
    /// first move in row-major order wins.
    pub fn choose_best(&self, board: &Board, side: Side) -> Option<Position> {
        let moves = legal_moves(board, side);
        if moves.is_empty() {
            log::debug!("{}: {} has no legal moves, passing", self.name, side);
            return None;
        }

        let start = Instant::now();
        let depth = self.options.depth.max(1);
        let counters = Counters::default();
        let ctx = SearchContext {
            perspective: side,
            counters: &counters,
        };

        let root_values: Vec<(Position, f64)> = if self.options.parallel {
            moves
                .par_iter()
                .map(|&mv| (mv, self.search_root_move(board, mv, depth, &ctx)))
                .collect()
        } else {
            moves
                .iter()
                .map(|&mv| (mv, self.search_root_move(board, mv, depth, &ctx)))
                .collect()
        };

        let mut best_move = None;
        let mut best_value = f64::NEG_INFINITY;
        for &(mv, value) in &root_values {
            if value > best_value {
                best_value = value;
                best_move = Some(mv);
            }
        }
        let best_move =
            best_move.expect("search produced no move although legal moves were available");

        let stats = SearchStats {
            depth,
            nodes: counters.nodes.load(Ordering::Relaxed),
            leaves: counters.leaves.load(Ordering::Relaxed),
            cutoffs: counters.cutoffs.load(Ordering::Relaxed),
            root_values,
            best_move: Some(best_move),
            best_value,
            elapsed_ms: start.elapsed().as_millis(),
        };
        self.log_summary(side, &stats);
        if let Ok(mut slot) = self.last_stats.lock() {
            *slot = Some(stats);
        }

        Some(best_move)
    }

    fn search_root_move(&self, board: &Board, mv: Position, depth: usize, ctx: &SearchContext) -> f64 {
        log::trace!("Evaluating move {}:", mv);
        let next_board = apply_move(board, mv, ctx.perspective);
        // ルートの一手は既に指したので、次は相手の番 (minimizing)
        let value = self.minimax(
            &next_board,
            depth - 1,
            f64::NEG_INFINITY,
            f64::INFINITY,
            false,
            1,
            ctx,
        );
        log::trace!("  -> Final value: {:.2}", value);
        value
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        board: &Board,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        is_maximizing: bool,
        level: usize,
        ctx: &SearchContext,
    ) -> f64 {
        Counters::bump(&ctx.counters.nodes);
        let tracing = level <= TRACE_LEVELS && log::log_enabled!(log::Level::Trace);
        let indent = if tracing {
            "  ".repeat(level)
        } else {
            String::new()
        };

        if depth == 0 {
            Counters::bump(&ctx.counters.leaves);
            let eval = self.evaluator.evaluate(board, ctx.perspective);
            if tracing {
                log::trace!("{}[Leaf] Evaluation: {:.2}", indent, eval);
            }
            return eval;
        }

        let current_side = if is_maximizing {
            ctx.perspective
        } else {
            ctx.perspective.opponent()
        };
        let moves = legal_moves(board, current_side);

        if moves.is_empty() {
            if !board.has_valid_move(current_side.opponent()) {
                Counters::bump(&ctx.counters.leaves);
                let eval = self.evaluator.evaluate(board, ctx.perspective);
                if tracing {
                    log::trace!("{}[Game Over] Evaluation: {:.2}", indent, eval);
                }
                return eval;
            }

            if tracing {
                log::trace!("{}[Pass] {} has no moves", indent, current_side);
            }
            // パスも1手分の深さを消費する
            return self.minimax(board, depth - 1, alpha, beta, !is_maximizing, level, ctx);
        }

        if tracing {
            log::trace!(
                "{}[{} - Depth {}] {} - {} moves available",
                indent,
                if is_maximizing { "MAX" } else { "MIN" },
                depth,
                current_side,
                moves.len()
            );
        }

        if is_maximizing {
            let mut max_eval = f64::NEG_INFINITY;
            for mv in moves {
                let next_board = apply_move(board, mv, current_side);
                let eval = self.minimax(&next_board, depth - 1, alpha, beta, false, level + 1, ctx);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if self.options.pruning && beta <= alpha {
                    Counters::bump(&ctx.counters.cutoffs);
                    if tracing {
                        log::trace!("{}  PRUNED (a={:.2} >= b={:.2})", indent, alpha, beta);
                    }
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = f64::INFINITY;
            for mv in moves {
                let next_board = apply_move(board, mv, current_side);
                let eval = self.minimax(&next_board, depth - 1, alpha, beta, true, level + 1, ctx);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if self.options.pruning && beta <= alpha {
                    Counters::bump(&ctx.counters.cutoffs);
                    if tracing {
                        log::trace!("{}  PRUNED (b={:.2} <= a={:.2})", indent, beta, alpha);
                    }
                    break;
                }
            }
            min_eval
        }
    }

    fn log_summary(&self, side: Side, stats: &SearchStats) {
        if log::log_enabled!(log::Level::Debug) {
            let mut sorted = stats.root_values.clone();
            sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
            log::debug!("{} move evaluation summary ({}):", self.name, side);
            for (i, (mv, value)) in sorted.iter().enumerate() {
                let marker = if Some(*mv) == stats.best_move { " CHOSEN" } else { "" };
                log::debug!("{}. Move {}: {:.2}{}", i + 1, mv, value, marker);
            }
        }
        log::info!(
            "{} ({}) depth {} -> {:?} value {:.2} [{} nodes, {} cutoffs, {}ms]",
            self.name,
            side,
            stats.depth,
            stats.best_move,
            stats.best_value,
            stats.nodes,
            stats.cutoffs,
            stats.elapsed_ms
        );
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&self, board: &Board, side: Side) -> Option<Position> {
        self.choose_best(board, side)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Minimax
    }
}
