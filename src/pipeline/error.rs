use thiserror::Error;

/// Stage-level failures inside the classification pipeline.
///
/// None of these ever reach the hosting layer as a raised fault: scaling
/// failures are recovered inside the adapter with unscaled features,
/// prediction failures run through the adapter's fallback chain, and
/// anything left over is turned into a degraded `ClassificationResult`
/// by the orchestrator.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("feature extraction failed: {0}")]
    Extraction(String),

    #[error("feature scaling failed: {0}")]
    Scaling(String),

    #[error("prediction failed: {0}")]
    Prediction(String),
}
