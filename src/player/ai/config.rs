use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "ai_config.json";

static CONFIG: Lazy<AIConfig> = Lazy::new(AIConfig::load_or_default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
}

/// Positional values used when synthesizing weight tables, plus the
/// phase-dependent multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub corner_value: i32,
    pub c_square_value: i32,
    pub x_square_value: i32,
    pub edge_value: i32,
    pub near_edge_value: i32,
    /// occupancy below which the early weights apply
    pub mid_game_threshold: f64,
    /// occupancy at or above which the end weights apply
    pub end_game_threshold: f64,
    pub early: PhaseWeights,
    pub mid: PhaseWeights,
    pub end: PhaseWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub position: f64,
    pub pieces: f64,
    pub mobility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_depth: usize,
    /// Spread root moves over the rayon pool.
    pub parallel_root: bool,
}

impl AIConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(CONFIG_PATH)?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => {
                log::info!("loaded {}", CONFIG_PATH);
                config
            }
            Err(e) => {
                log::debug!("using default AI config ({}: {})", CONFIG_PATH, e);
                Self::default()
            }
        }
    }

    /// Process-wide config, read once on first access.
    pub fn get() -> &'static AIConfig {
        &CONFIG
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            evaluation: EvaluationConfig::default(),
            search: SearchConfig {
                default_depth: 3,
                parallel_root: false,
            },
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            corner_value: 100,
            c_square_value: -20,
            x_square_value: -50,
            edge_value: 10,
            near_edge_value: 5,
            mid_game_threshold: 0.5,
            end_game_threshold: 0.75,
            early: PhaseWeights {
                position: 1.0,
                pieces: 0.5,
                mobility: 3.0,
            },
            mid: PhaseWeights {
                position: 0.8,
                pieces: 1.0,
                mobility: 2.0,
            },
            end: PhaseWeights {
                position: 0.3,
                pieces: 2.0,
                mobility: 1.0,
            },
        }
    }
}
