use tracing::{debug, warn};

use crate::model::{Label, RandomForest, StandardScaler};
use crate::pipeline::FEATURE_COUNT;

/// Probability pair synthesized when every prediction strategy has failed
const EMERGENCY_PROBA: [f64; 2] = [0.8, 0.2];

/// Compatibility layer between the orchestrator and the trained artifacts.
///
/// An artifact produced by one trainer version can fail on some calls and
/// not others, so no internal fault is allowed to reach the caller. The
/// ordered fallback chain on predict is: native majority vote, then argmax
/// of the probability estimate, then a default safe label with synthesized
/// probabilities. Scaling problems degrade to the raw feature vector.
#[derive(Debug, Clone)]
pub struct ClassifierAdapter {
    forest: RandomForest,
    scaler: StandardScaler,
}

impl ClassifierAdapter {
    pub fn new(forest: RandomForest, scaler: StandardScaler) -> Self {
        Self { forest, scaler }
    }

    /// Predicted label for a raw (unscaled) feature vector. Total.
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Label {
        let scaled = self.scaled(features);

        match self.forest.predict(&scaled) {
            Ok(label) => label,
            Err(native_err) => {
                warn!(
                    "Native predict failed ({}), falling back to probability argmax",
                    native_err
                );
                match self.forest.predict_proba(&scaled) {
                    Ok(proba) => {
                        if proba[1] > proba[0] {
                            Label::Unsafe
                        } else {
                            Label::Safe
                        }
                    }
                    Err(proba_err) => {
                        warn!(
                            "Probability fallback failed too ({}), defaulting to safe",
                            proba_err
                        );
                        Label::Safe
                    }
                }
            }
        }
    }

    /// `[p_safe, p_unsafe]` for a raw feature vector, best-effort summing
    /// to 1. Total: estimator faults degrade to a low-confidence default.
    pub fn predict_probability(&self, features: &[f64; FEATURE_COUNT]) -> [f64; 2] {
        let scaled = self.scaled(features);

        match self.forest.predict_proba(&scaled) {
            Ok(proba) => proba,
            Err(e) => {
                warn!("Probability estimation failed ({}), synthesizing pair", e);
                EMERGENCY_PROBA
            }
        }
    }

    fn scaled(&self, features: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        match self.scaler.transform(features) {
            Ok(scaled) => scaled,
            Err(e) => {
                warn!("{}, using unscaled features", e);
                debug!("Raw feature vector passed through to the forest");
                *features
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::artifact::{ForestArtifact, ScalerArtifact, TreeArtifact};

    fn identity_scaler() -> StandardScaler {
        StandardScaler::from_artifact(ScalerArtifact {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        })
    }

    fn unsafe_leaf() -> TreeArtifact {
        TreeArtifact {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![0.0],
            value: vec![vec![1.0, 9.0]],
        }
    }

    fn forest(format_version: u32, trees: Vec<TreeArtifact>) -> RandomForest {
        RandomForest::from_artifact(ForestArtifact {
            format_version,
            n_features: FEATURE_COUNT,
            classes: vec![0, 1],
            trees,
        })
        .unwrap()
    }

    #[test]
    fn test_native_predict_path() {
        let adapter = ClassifierAdapter::new(forest(1, vec![unsafe_leaf()]), identity_scaler());
        assert_eq!(adapter.predict(&[0.0; FEATURE_COUNT]), Label::Unsafe);
        let proba = adapter.predict_probability(&[0.0; FEATURE_COUNT]);
        assert!((proba[1] - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_version_skew_falls_back_to_probability_argmax() {
        // format v2 breaks native predict but not the probability estimate
        let adapter = ClassifierAdapter::new(forest(2, vec![unsafe_leaf()]), identity_scaler());
        assert_eq!(adapter.predict(&[0.0; FEATURE_COUNT]), Label::Unsafe);
    }

    #[test]
    fn test_fully_broken_forest_defaults_to_safe() {
        let adapter = ClassifierAdapter::new(forest(1, vec![]), identity_scaler());
        assert_eq!(adapter.predict(&[0.0; FEATURE_COUNT]), Label::Safe);
        assert_eq!(
            adapter.predict_probability(&[0.0; FEATURE_COUNT]),
            EMERGENCY_PROBA
        );
    }

    #[test]
    fn test_scaler_mismatch_degrades_to_raw_features() {
        let short_scaler = StandardScaler::from_artifact(ScalerArtifact {
            mean: vec![0.0; 4],
            scale: vec![1.0; 4],
        });
        let adapter = ClassifierAdapter::new(forest(1, vec![unsafe_leaf()]), short_scaler);
        // still classifies, on the unscaled vector
        assert_eq!(adapter.predict(&[0.0; FEATURE_COUNT]), Label::Unsafe);
    }
}
