use crate::core::Board;
use crate::game::{Game, GameRecord};
use crate::logic::Winner;
use crate::player::ai::{GreedyAI, MinimaxAI, RandomAI, SearchOptions};
use crate::player::PlayerController;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// How to build one side's controller for every game of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategySpec {
    Random { seed: Option<u64> },
    Greedy,
    Minimax { depth: usize },
}

impl StrategySpec {
    /// Named presets: `random`, `greedy`, `minimax_d1` .. `minimax_d10`.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "random" => Some(StrategySpec::Random { seed: None }),
            "greedy" => Some(StrategySpec::Greedy),
            _ => {
                let depth: usize = name.strip_prefix("minimax_d")?.parse().ok()?;
                (1..=10)
                    .contains(&depth)
                    .then_some(StrategySpec::Minimax { depth })
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            StrategySpec::Random { .. } => "RandomAI".to_string(),
            StrategySpec::Greedy => "GreedyAI".to_string(),
            StrategySpec::Minimax { depth } => format!("MinimaxAI(d{})", depth),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategySpec::Random { .. } => "Random move selection",
            StrategySpec::Greedy => "Greedy - maximizes immediate stone count",
            StrategySpec::Minimax { depth } if *depth <= 2 => "Minimax - fast but shallow",
            StrategySpec::Minimax { depth } if *depth == 3 => "Minimax - balanced",
            StrategySpec::Minimax { .. } => "Minimax - stronger but slower",
        }
    }

    /// `game_num` decorrelates seeded random players across a series.
    /// Minimax players get their evaluation table for `board_size` up front.
    pub fn build(&self, name: &str, game_num: usize, board_size: usize) -> Box<dyn PlayerController> {
        match self {
            StrategySpec::Random { seed: Some(seed) } => {
                Box::new(RandomAI::with_seed(name, seed.wrapping_add(game_num as u64)))
            }
            StrategySpec::Random { seed: None } => Box::new(RandomAI::new(name)),
            StrategySpec::Greedy => Box::new(GreedyAI::new(name)),
            StrategySpec::Minimax { depth } => Box::new(MinimaxAI::for_board_size(
                name,
                SearchOptions {
                    depth: *depth,
                    ..SearchOptions::default()
                },
                board_size,
            )),
        }
    }
}

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub black: StrategySpec,
    pub white: StrategySpec,
    pub board_size: usize,
    /// Run games concurrently on the rayon pool.
    pub parallel: bool,
    /// Directory for a JSON-lines export of every finished game.
    pub export_dir: Option<PathBuf>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            black: StrategySpec::Minimax { depth: 3 },
            white: StrategySpec::Random { seed: None },
            board_size: crate::core::DEFAULT_SIZE,
            parallel: false,
            export_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub black_strategy: String,
    pub black_config: StrategySpec,
    pub white_strategy: String,
    pub white_config: StrategySpec,
    pub board_size: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Winner,
    pub black_score: usize,
    pub white_score: usize,
    pub total_moves: usize,
    pub duration_seconds: f64,
}

impl From<&GameRecord> for GameResult {
    fn from(record: &GameRecord) -> Self {
        GameResult {
            winner: record.outcome.winner,
            black_score: record.outcome.black,
            white_score: record.outcome.white,
            total_moves: record.placements,
            duration_seconds: (record.duration.as_secs_f64() * 100.0).round() / 100.0,
        }
    }
}

#[derive(Serialize)]
struct ExportLine<'a> {
    game: usize,
    metadata: &'a GameMetadata,
    result: &'a GameResult,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub ties: usize,
    pub avg_moves: f64,
    pub avg_duration_seconds: f64,
    pub black_strategy: String,
    pub white_strategy: String,
    pub board_size: usize,
    pub export_file: Option<PathBuf>,
    pub games: Vec<GameResult>,
}

impl Default for SelfPlayStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self {
            total_games: 0,
            black_wins: 0,
            white_wins: 0,
            ties: 0,
            avg_moves: 0.0,
            avg_duration_seconds: 0.0,
            black_strategy: String::new(),
            white_strategy: String::new(),
            board_size: 0,
            export_file: None,
            games: Vec::new(),
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Winner::Black => self.black_wins += 1,
            Winner::White => self.white_wins += 1,
            Winner::Tie => self.ties += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.total_moves).sum();
        let total_time: f64 = self.games.iter().map(|g| g.duration_seconds).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_duration_seconds = total_time / self.games.len() as f64;
    }

    /// Percentage of games won by `winner` (ties included as their own bucket).
    pub fn rate(&self, winner: Winner) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        let count = match winner {
            Winner::Black => self.black_wins,
            Winner::White => self.white_wins,
            Winner::Tie => self.ties,
        };
        count as f64 / self.total_games as f64 * 100.0
    }

    pub fn summary(&self) -> String {
        format!(
            "{} (Black) vs {} (White), {} games on {}x{}\n\
             Black wins: {} ({:.1}%)\n\
             White wins: {} ({:.1}%)\n\
             Ties: {} ({:.1}%)\n\
             Avg moves: {:.1}\n\
             Avg time: {:.2}s",
            self.black_strategy,
            self.white_strategy,
            self.total_games,
            self.board_size,
            self.board_size,
            self.black_wins,
            self.rate(Winner::Black),
            self.white_wins,
            self.rate(Winner::White),
            self.ties,
            self.rate(Winner::Tie),
            self.avg_moves,
            self.avg_duration_seconds
        )
    }
}

pub fn run_selfplay(config: SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let mut stats = SelfPlayStats::new();
    stats.black_strategy = config.black.label();
    stats.white_strategy = config.white.label();
    stats.board_size = config.board_size;

    // 盤サイズは最初に検証しておく
    Board::with_size(config.board_size)?;

    log::info!(
        "self-play: {} vs {}, {} games ({})",
        stats.black_strategy,
        stats.white_strategy,
        config.num_games,
        if config.parallel { "parallel" } else { "sequential" }
    );

    let records: Vec<(GameMetadata, GameResult)> = if config.parallel {
        (1..=config.num_games)
            .into_par_iter()
            .map(|game_num| run_single(&config, game_num))
            .collect::<anyhow::Result<_>>()?
    } else {
        (1..=config.num_games)
            .map(|game_num| run_single(&config, game_num))
            .collect::<anyhow::Result<_>>()?
    };

    if let Some(dir) = &config.export_dir {
        stats.export_file = Some(export_results(dir, &records)?);
    }

    for (_, result) in records {
        stats.add_result(result);
    }

    Ok(stats)
}

fn run_single(config: &SelfPlayConfig, game_num: usize) -> anyhow::Result<(GameMetadata, GameResult)> {
    let black = config.black.build("AI-Black", game_num, config.board_size);
    let white = config.white.build("AI-White", game_num, config.board_size);

    let mut game = Game::new(Board::with_size(config.board_size)?);
    let record = game.play(black.as_ref(), white.as_ref())?;
    let result = GameResult::from(&record);

    log::info!(
        "game {}/{}: {} ({}-{}, {} moves, {:.2}s)",
        game_num,
        config.num_games,
        result.winner,
        result.black_score,
        result.white_score,
        result.total_moves,
        result.duration_seconds
    );

    let metadata = GameMetadata {
        black_strategy: config.black.label(),
        black_config: config.black.clone(),
        white_strategy: config.white.label(),
        white_config: config.white.clone(),
        board_size: config.board_size,
        timestamp: chrono::Local::now().to_rfc3339(),
    };
    Ok((metadata, result))
}

fn export_results(dir: &Path, records: &[(GameMetadata, GameResult)]) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "selfplay_{}.jsonl",
        chrono::Local::now().format("%Y%m%d_%H%M%S_%3f")
    ));

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let mut writer = BufWriter::new(file);
    for (i, (metadata, result)) in records.iter().enumerate() {
        let line = ExportLine {
            game: i + 1,
            metadata,
            result,
        };
        serde_json::to_writer(&mut writer, &line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    log::info!("wrote {} results to {}", records.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_vs_greedy(num_games: usize, parallel: bool, export_dir: Option<PathBuf>) -> SelfPlayConfig {
        SelfPlayConfig {
            num_games,
            black: StrategySpec::Random { seed: Some(11) },
            white: StrategySpec::Greedy,
            board_size: 8,
            parallel,
            export_dir,
        }
    }

    #[test]
    fn test_presets() {
        assert_eq!(StrategySpec::preset("greedy"), Some(StrategySpec::Greedy));
        assert_eq!(
            StrategySpec::preset("random"),
            Some(StrategySpec::Random { seed: None })
        );
        assert_eq!(
            StrategySpec::preset("minimax_d4"),
            Some(StrategySpec::Minimax { depth: 4 })
        );
        assert_eq!(StrategySpec::preset("minimax_d0"), None);
        assert_eq!(StrategySpec::preset("alphazero"), None);
    }

    #[test]
    fn test_stats_add_up() {
        let stats = run_selfplay(random_vs_greedy(6, false, None)).unwrap();
        assert_eq!(stats.total_games, 6);
        assert_eq!(stats.black_wins + stats.white_wins + stats.ties, 6);
        assert_eq!(stats.games.len(), 6);
        for game in &stats.games {
            assert!(game.black_score + game.white_score <= 64);
            assert!(game.total_moves <= 60);
        }
        let rates = stats.rate(Winner::Black) + stats.rate(Winner::White) + stats.rate(Winner::Tie);
        assert!((rates - 100.0).abs() < 1e-9);
        assert!(stats.summary().contains("RandomAI (Black) vs GreedyAI (White)"));
    }

    #[test]
    fn test_parallel_matches_sequential_with_seeds() {
        let seq = run_selfplay(random_vs_greedy(4, false, None)).unwrap();
        let par = run_selfplay(random_vs_greedy(4, true, None)).unwrap();
        let scores = |s: &SelfPlayStats| -> Vec<(usize, usize)> {
            s.games.iter().map(|g| (g.black_score, g.white_score)).collect()
        };
        assert_eq!(scores(&seq), scores(&par));
    }

    #[test]
    fn test_export_writes_one_line_per_game() {
        let dir = std::env::temp_dir().join(format!("othello-selfplay-{}", std::process::id()));
        let stats = run_selfplay(random_vs_greedy(3, false, Some(dir.clone()))).unwrap();
        let path = stats.export_file.clone().unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["metadata"]["board_size"], 8);
        assert_eq!(lines[0]["metadata"]["white_config"]["strategy"], "greedy");
        assert!(lines[2]["result"]["winner"].is_string());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_small_board_series_with_minimax() {
        let config = SelfPlayConfig {
            num_games: 2,
            black: StrategySpec::Minimax { depth: 2 },
            white: StrategySpec::Random { seed: Some(3) },
            board_size: 6,
            parallel: false,
            export_dir: None,
        };
        let stats = run_selfplay(config).unwrap();
        assert_eq!(stats.total_games, 2);
        for game in &stats.games {
            assert!(game.black_score + game.white_score <= 36);
            assert!(game.total_moves <= 32);
        }
    }

    #[test]
    fn test_invalid_board_size() {
        let mut config = random_vs_greedy(1, false, None);
        config.board_size = 5;
        assert!(run_selfplay(config).is_err());
    }
}
