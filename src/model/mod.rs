pub mod adapter;
pub mod artifact;
pub mod forest;
pub mod scaler;

pub use adapter::ClassifierAdapter;
pub use forest::RandomForest;
pub use scaler::StandardScaler;

use log::info;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading the trained artifacts at startup.
///
/// These never crash the process: the caller falls back to running the
/// service in heuristics-only mode.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact rejected: {0}")]
    Schema(String),
}

/// Classification label produced by the trained model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Safe,
    Unsafe,
}

/// Loads the classifier and scaler artifacts from disk.
///
/// Called once at process start; the returned pair is immutable for the
/// lifetime of the process and shared read-only across requests.
pub fn load_classifier(
    model_path: &Path,
    scaler_path: &Path,
) -> Result<(RandomForest, StandardScaler), ModelError> {
    info!("Loading model from: {}", model_path.display());
    let forest = RandomForest::from_artifact(read_json(model_path)?)?;

    info!("Loading scaler from: {}", scaler_path.display());
    let scaler = StandardScaler::from_artifact(read_json(scaler_path)?);

    info!(
        "Model and scaler loaded successfully ({} trees)",
        forest.tree_count()
    );
    Ok((forest, scaler))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
        path: path.display().to_string(),
        source,
    })
}
