use tracing::{debug, info, instrument, warn};

use crate::model::{ClassifierAdapter, Label};
use crate::pipeline::features::extract_features;
use crate::pipeline::heuristics::HeuristicEngine;
use crate::pipeline::normalizer::NormalizedUrl;
use crate::pipeline::{ClassificationResult, PipelineError};

/// Top-level classification entry point.
///
/// Built once at startup in one of two modes: classifier available (trained
/// artifacts loaded) or classifier unavailable (heuristics only). The mode
/// never changes at runtime. `classify` is total: every input string, no
/// matter how malformed, produces a structurally valid result.
#[derive(Debug, Clone)]
pub struct UrlClassifierService {
    adapter: Option<ClassifierAdapter>,
    heuristics: HeuristicEngine,
}

impl UrlClassifierService {
    pub fn new(adapter: Option<ClassifierAdapter>, heuristics: HeuristicEngine) -> Self {
        Self {
            adapter,
            heuristics,
        }
    }

    /// Heuristics-only service, for when the artifacts failed to load
    pub fn without_classifier(heuristics: HeuristicEngine) -> Self {
        Self::new(None, heuristics)
    }

    /// Whether a trained classifier is backing this service
    pub fn classifier_loaded(&self) -> bool {
        self.adapter.is_some()
    }

    /// Classifies a raw URL string. Never fails and never panics; failures
    /// inside the pipeline degrade to a low-confidence unsafe verdict.
    #[instrument(skip(self))]
    pub fn classify(&self, raw_url: &str) -> ClassificationResult {
        let normalized = NormalizedUrl::new(raw_url);
        debug!(
            url = %normalized.url(),
            hostname = %normalized.hostname(),
            "URL normalized"
        );

        let result = match &self.adapter {
            Some(adapter) => match self.classify_with_model(adapter, &normalized) {
                Ok(result) => result,
                Err(e) => {
                    warn!("Pipeline stage failed, returning degraded result: {}", e);
                    ClassificationResult::analysis_failure(normalized.url(), &e.to_string())
                }
            },
            None => {
                debug!("No classifier loaded, delegating to heuristic engine");
                self.heuristics.evaluate(&normalized)
            }
        };

        info!(
            url = %result.url,
            is_safe = result.is_safe,
            confidence = result.confidence,
            "Classification complete"
        );
        result
    }

    fn classify_with_model(
        &self,
        adapter: &ClassifierAdapter,
        normalized: &NormalizedUrl,
    ) -> Result<ClassificationResult, PipelineError> {
        let features = extract_features(normalized).as_array();
        debug!("Extracted {} features from URL", features.len());

        let label = adapter.predict(&features);
        let proba = adapter.predict_probability(&features);
        debug!(
            "Model prediction: {:?}, probabilities: safe={:.2}, unsafe={:.2}",
            label, proba[0], proba[1]
        );

        // confidence follows the predicted class, not the raw unsafe column
        let (is_safe, confidence) = match label {
            Label::Safe => (true, proba[0]),
            Label::Unsafe => (false, proba[1]),
        };

        if !confidence.is_finite() {
            return Err(PipelineError::Prediction(
                "probability estimate is not finite".to_string(),
            ));
        }

        let details = if is_safe {
            "This URL appears to be safe."
        } else {
            "This URL was flagged as potentially malicious. Proceed with caution."
        };

        Ok(ClassificationResult {
            url: normalized.url().to_string(),
            is_safe,
            confidence: confidence.clamp(0.0, 1.0),
            details: details.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::artifact::{ForestArtifact, ScalerArtifact, TreeArtifact};
    use crate::model::{RandomForest, StandardScaler};
    use crate::pipeline::FEATURE_COUNT;

    fn heuristics_only() -> UrlClassifierService {
        UrlClassifierService::without_classifier(HeuristicEngine::default())
    }

    fn service_with_leaf(safe_count: f64, unsafe_count: f64) -> UrlClassifierService {
        let forest = RandomForest::from_artifact(ForestArtifact {
            format_version: 1,
            n_features: FEATURE_COUNT,
            classes: vec![0, 1],
            trees: vec![TreeArtifact {
                children_left: vec![-1],
                children_right: vec![-1],
                feature: vec![-2],
                threshold: vec![0.0],
                value: vec![vec![safe_count, unsafe_count]],
            }],
        })
        .unwrap();
        let scaler = StandardScaler::from_artifact(ScalerArtifact {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        });
        UrlClassifierService::new(
            Some(ClassifierAdapter::new(forest, scaler)),
            HeuristicEngine::default(),
        )
    }

    #[test]
    fn test_heuristics_mode_reports_no_classifier() {
        assert!(!heuristics_only().classifier_loaded());
        assert!(service_with_leaf(1.0, 9.0).classifier_loaded());
    }

    #[test]
    fn test_unsafe_prediction_uses_unsafe_probability() {
        let result = service_with_leaf(1.0, 9.0).classify("https://example.com");
        assert!(!result.is_safe);
        assert!((result.confidence - 0.9).abs() < 1e-9);
        assert!(result.details.contains("potentially malicious"));
    }

    #[test]
    fn test_safe_prediction_uses_safe_probability() {
        let result = service_with_leaf(7.0, 3.0).classify("https://example.com");
        assert!(result.is_safe);
        assert!((result.confidence - 0.7).abs() < 1e-9);
        assert!(result.details.contains("appears to be safe"));
    }

    #[test]
    fn test_never_panics_on_hostile_inputs() {
        let service = heuristics_only();
        let oversized = "x".repeat(100_000);
        let inputs = [
            "",
            " ",
            "!!!",
            "http://",
            "https://!!!.com",
            "ftp://example.com",
            "\u{0000}\u{FFFF}",
            oversized.as_str(),
        ];
        for input in inputs {
            let result = service.classify(input);
            assert!((0.0..=1.0).contains(&result.confidence));
            assert!(!result.details.is_empty());
        }
    }

    #[test]
    fn test_model_mode_never_panics_either() {
        let service = service_with_leaf(1.0, 9.0);
        let digits = "9".repeat(50_000);
        for input in ["", "::::////", digits.as_str()] {
            let result = service.classify(input);
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }
}
