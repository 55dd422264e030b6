use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tetromind_engine::{BagSeed, Board, PlayStats};
use tetromind_evaluator::weights::Weights;

use crate::util::read_json_file;

/// Trained (or hand-written) weight configuration stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f32,
    pub weights: Weights,
}

/// Per-game record written by `simulate --record`.
#[derive(Debug, Serialize)]
pub struct GameRecord {
    pub seed: BagSeed,
    pub stats: PlayStats,
    pub final_board: Board,
}

/// Loads weights from a model file, falling back to the built-in defaults.
pub fn load_weights(model_path: Option<&PathBuf>) -> anyhow::Result<Weights> {
    match model_path {
        Some(path) => {
            let model: WeightsModel = read_json_file("weights model", path)?;
            eprintln!(
                "Loaded model '{}' (fitness {:.3}, trained at {})",
                model.name, model.final_fitness, model.trained_at
            );
            Ok(model.weights)
        }
        None => Ok(Weights::default()),
    }
}
