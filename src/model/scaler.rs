use crate::model::artifact::ScalerArtifact;
use crate::pipeline::{PipelineError, FEATURE_COUNT};

/// Standard feature scaler: `(x - mean) / scale` per feature.
///
/// Paired 1:1 with the forest it was fitted alongside. A shape mismatch is
/// reported as a `Scaling` error so the adapter can degrade to the raw,
/// unscaled vector instead of aborting the request.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn from_artifact(artifact: ScalerArtifact) -> Self {
        Self {
            mean: artifact.mean,
            scale: artifact.scale,
        }
    }

    pub fn transform(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; FEATURE_COUNT], PipelineError> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(PipelineError::Scaling(format!(
                "scaler shape ({}, {}) does not match {} features",
                self.mean.len(),
                self.scale.len(),
                FEATURE_COUNT
            )));
        }

        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, value) in features.iter().enumerate() {
            // zero-variance features are passed through centered only
            let divisor = if self.scale[i] == 0.0 {
                1.0
            } else {
                self.scale[i]
            };
            scaled[i] = (value - self.mean[i]) / divisor;
        }
        Ok(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_scaler() -> StandardScaler {
        StandardScaler::from_artifact(ScalerArtifact {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        })
    }

    #[test]
    fn test_identity_transform() {
        let mut features = [0.0; FEATURE_COUNT];
        features[0] = 42.0;
        let scaled = identity_scaler().transform(&features).unwrap();
        assert_eq!(scaled, features);
    }

    #[test]
    fn test_centering_and_scaling() {
        let mut mean = vec![0.0; FEATURE_COUNT];
        let mut scale = vec![1.0; FEATURE_COUNT];
        mean[0] = 10.0;
        scale[0] = 2.0;
        let scaler = StandardScaler::from_artifact(ScalerArtifact { mean, scale });

        let mut features = [0.0; FEATURE_COUNT];
        features[0] = 14.0;
        let scaled = scaler.transform(&features).unwrap();
        assert_eq!(scaled[0], 2.0);
    }

    #[test]
    fn test_zero_variance_feature_does_not_divide_by_zero() {
        let mut scale = vec![1.0; FEATURE_COUNT];
        scale[3] = 0.0;
        let scaler = StandardScaler::from_artifact(ScalerArtifact {
            mean: vec![1.0; FEATURE_COUNT],
            scale,
        });
        let features = [5.0; FEATURE_COUNT];
        let scaled = scaler.transform(&features).unwrap();
        assert_eq!(scaled[3], 4.0);
        assert!(scaled.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_shape_mismatch_is_a_scaling_error() {
        let scaler = StandardScaler::from_artifact(ScalerArtifact {
            mean: vec![0.0; 10],
            scale: vec![1.0; 10],
        });
        let result = scaler.transform(&[0.0; FEATURE_COUNT]);
        assert!(matches!(result, Err(PipelineError::Scaling(_))));
    }
}
