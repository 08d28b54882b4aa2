pub mod error;
pub mod features;
pub mod heuristics;
pub mod normalizer;
pub mod orchestrator;
pub mod patterns;

pub use error::PipelineError;
pub use features::{extract_features, FeatureVector, FEATURE_COUNT};
pub use heuristics::{HeuristicConfig, HeuristicEngine};
pub use normalizer::NormalizedUrl;
pub use orchestrator::UrlClassifierService;

use serde::{Deserialize, Serialize};

/// Verdict returned to the caller for a single URL check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The URL as seen by the pipeline (scheme-qualified)
    pub url: String,

    /// Whether the URL is considered safe to visit
    pub is_safe: bool,

    /// Probability mass assigned to the predicted class, in [0, 1]
    pub confidence: f64,

    /// Human-readable explanation of the verdict
    pub details: String,
}

impl ClassificationResult {
    /// Degraded verdict used when a pipeline stage failed outright.
    /// The caller still receives a structurally valid answer.
    pub fn analysis_failure(url: &str, cause: &str) -> Self {
        Self {
            url: url.to_string(),
            is_safe: false,
            confidence: 0.0,
            details: format!("Unable to analyze URL: {}", cause),
        }
    }
}
