use serde::Deserialize;

/// On-disk JSON form of the trained random forest.
///
/// Trees are stored as flat parallel arrays, one entry per node, the way
/// the training side exports them: negative child indices mark leaves,
/// `value` holds per-class sample counts at each node.
#[derive(Debug, Clone, Deserialize)]
pub struct ForestArtifact {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    pub n_features: usize,
    /// Class ids in probability-column order (0 = safe, 1 = unsafe)
    pub classes: Vec<u32>,
    pub trees: Vec<TreeArtifact>,
}

fn default_format_version() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeArtifact {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

/// On-disk JSON form of the feature scaler: per-feature mean and scale
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}
