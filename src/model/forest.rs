use crate::model::artifact::{ForestArtifact, TreeArtifact};
use crate::model::{Label, ModelError};
use crate::pipeline::{PipelineError, FEATURE_COUNT};

/// Newest artifact format this build knows how to vote with
const SUPPORTED_FORMAT_VERSION: u32 = 1;

/// In-memory random forest rebuilt from a JSON artifact.
///
/// Shallow schema problems (wrong feature count, unknown classes) are
/// rejected at load time and put the service into heuristics-only mode.
/// Deeper problems inside individual trees only surface during traversal
/// and are reported as `Prediction` errors, which the adapter's fallback
/// chain absorbs.
#[derive(Debug, Clone)]
pub struct RandomForest {
    format_version: u32,
    trees: Vec<TreeArtifact>,
}

impl RandomForest {
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self, ModelError> {
        if artifact.n_features != FEATURE_COUNT {
            return Err(ModelError::Schema(format!(
                "model expects {} features, this build extracts {}",
                artifact.n_features, FEATURE_COUNT
            )));
        }
        if artifact.classes != vec![0, 1] {
            return Err(ModelError::Schema(format!(
                "unexpected class layout {:?}, expected [0, 1]",
                artifact.classes
            )));
        }
        Ok(Self {
            format_version: artifact.format_version,
            trees: artifact.trees,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Native label prediction: majority vote over per-tree leaf argmax.
    ///
    /// Refuses artifacts newer than this build understands; per-tree vote
    /// encoding is not stable across format versions, while averaged
    /// probabilities still are.
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<Label, PipelineError> {
        if self.format_version > SUPPORTED_FORMAT_VERSION {
            return Err(PipelineError::Prediction(format!(
                "artifact format v{} is newer than supported v{}",
                self.format_version, SUPPORTED_FORMAT_VERSION
            )));
        }
        if self.trees.is_empty() {
            return Err(PipelineError::Prediction("forest has no trees".to_string()));
        }

        let mut votes = [0usize; 2];
        for tree in &self.trees {
            let distribution = leaf_distribution(tree, features)?;
            let vote = if distribution[1] > distribution[0] { 1 } else { 0 };
            votes[vote] += 1;
        }

        // ties resolve to the lower class id, matching the trainer's argmax
        if votes[1] > votes[0] {
            Ok(Label::Unsafe)
        } else {
            Ok(Label::Safe)
        }
    }

    /// Probability estimation: mean of the normalized leaf distributions,
    /// as `[p_safe, p_unsafe]`
    pub fn predict_proba(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; 2], PipelineError> {
        if self.trees.is_empty() {
            return Err(PipelineError::Prediction("forest has no trees".to_string()));
        }

        let mut sums = [0.0f64; 2];
        for tree in &self.trees {
            let distribution = leaf_distribution(tree, features)?;
            sums[0] += distribution[0];
            sums[1] += distribution[1];
        }

        let n = self.trees.len() as f64;
        Ok([sums[0] / n, sums[1] / n])
    }
}

/// Walks one tree to its leaf and returns the normalized class distribution
fn leaf_distribution(
    tree: &TreeArtifact,
    features: &[f64; FEATURE_COUNT],
) -> Result<[f64; 2], PipelineError> {
    let node_count = tree.children_left.len();
    if tree.children_right.len() != node_count
        || tree.feature.len() != node_count
        || tree.threshold.len() != node_count
        || tree.value.len() != node_count
    {
        return Err(PipelineError::Prediction(
            "tree arrays have inconsistent lengths".to_string(),
        ));
    }
    if node_count == 0 {
        return Err(PipelineError::Prediction("tree has no nodes".to_string()));
    }

    let mut node = 0usize;
    // each hop moves strictly deeper in a well-formed tree, so more hops
    // than nodes means a cycle in the artifact
    for _ in 0..node_count {
        let left = tree.children_left[node];
        let right = tree.children_right[node];

        if left < 0 {
            let row = &tree.value[node];
            if row.len() != 2 {
                return Err(PipelineError::Prediction(format!(
                    "leaf value row has {} classes, expected 2",
                    row.len()
                )));
            }
            let total = row[0] + row[1];
            if total <= 0.0 || !total.is_finite() {
                return Err(PipelineError::Prediction(
                    "leaf has no sample mass".to_string(),
                ));
            }
            return Ok([row[0] / total, row[1] / total]);
        }

        let feature_index = tree.feature[node];
        if feature_index < 0 || feature_index as usize >= FEATURE_COUNT {
            return Err(PipelineError::Prediction(format!(
                "split references feature {} out of {}",
                feature_index, FEATURE_COUNT
            )));
        }

        let next = if features[feature_index as usize] <= tree.threshold[node] {
            left
        } else {
            right
        };
        if next < 0 || next as usize >= node_count {
            return Err(PipelineError::Prediction(format!(
                "child index {} out of range for {} nodes",
                next, node_count
            )));
        }
        node = next as usize;
    }

    Err(PipelineError::Prediction(
        "tree traversal did not reach a leaf".to_string(),
    ))
}
