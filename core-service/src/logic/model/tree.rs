//! Decision Tree - binary classification with Gini impurity
//!
//! Splits are found with one sorted sweep per candidate feature, so a node
//! costs O(n log n) per feature instead of re-partitioning for every threshold.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::matrix::TrainingMatrix;

/// Smallest impurity decrease that still counts as a split
const MIN_GAIN: f64 = 1e-12;

/// Decision tree configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of tree (None = grow until pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf node
    pub min_samples_leaf: usize,
    /// Features examined per split (None = all)
    pub max_features: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf {
        /// Share of positive samples that reached this leaf
        positive_fraction: f64,
        n_samples: usize,
    },
    Split {
        feature: usize,
        /// Samples with `value <= threshold` go left
        threshold: f64,
        n_samples: usize,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    pub fn n_samples(&self) -> usize {
        match self {
            TreeNode::Leaf { n_samples, .. } | TreeNode::Split { n_samples, .. } => *n_samples,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Decision Tree model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    root: TreeNode,
    feature_importances: Vec<f64>,
}

impl DecisionTree {
    /// Fit on the rows listed in `sample` (repeats allowed, as in a bootstrap draw).
    ///
    /// `rng` drives the per-node feature subsampling.
    pub fn fit(
        config: TreeConfig,
        data: &TrainingMatrix,
        sample: &[usize],
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let mut importances = vec![0.0; data.n_features()];
        let root = build_node(&config, data, sample.to_vec(), 0, rng, &mut importances);

        let sum: f64 = importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut importances {
                *imp /= sum;
            }
        }

        Self {
            config,
            root,
            feature_importances: importances,
        }
    }

    /// Positive share of the leaf `features` lands in
    pub fn predict_positive_fraction(&self, features: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { positive_fraction, .. } => return *positive_fraction,
                TreeNode::Split { feature, threshold, left, right, .. } => {
                    node = if features[*feature] <= *threshold { left.as_ref() } else { right.as_ref() };
                }
            }
        }
    }

    /// Majority vote of the reached leaf; ties vote negative
    pub fn votes_positive(&self, features: &[f64]) -> bool {
        self.predict_positive_fraction(features) > 0.5
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Normalized Gini importances (sum to 1 unless the tree is a single leaf)
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

fn build_node(
    config: &TreeConfig,
    data: &TrainingMatrix,
    indices: Vec<usize>,
    depth: usize,
    rng: &mut ChaCha8Rng,
    importances: &mut [f64],
) -> TreeNode {
    let n = indices.len();
    let positives = count_positive(data, &indices);
    let leaf = || TreeNode::Leaf {
        positive_fraction: if n == 0 { 0.0 } else { positives as f64 / n as f64 },
        n_samples: n,
    };

    let depth_reached = config.max_depth.is_some_and(|max| depth >= max);
    let pure = positives == 0 || positives == n;
    if depth_reached || pure || n < config.min_samples_split.max(2) {
        return leaf();
    }

    let Some(split) = find_best_split(config, data, &indices, positives, rng) else {
        return leaf();
    };

    importances[split.feature] += split.gain * n as f64;

    let x = data.features();
    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| x[[i, split.feature]] <= split.threshold);

    let left = build_node(config, data, left_idx, depth + 1, rng, importances);
    let right = build_node(config, data, right_idx, depth + 1, rng, importances);

    TreeNode::Split {
        feature: split.feature,
        threshold: split.threshold,
        n_samples: n,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Examine a random subset of `max_features` features; keep drawing past that
/// only while no valid split has been found.
fn find_best_split(
    config: &TreeConfig,
    data: &TrainingMatrix,
    indices: &[usize],
    positives: usize,
    rng: &mut ChaCha8Rng,
) -> Option<SplitCandidate> {
    let n = indices.len();
    let n_features = data.n_features();
    let max_features = config.max_features.unwrap_or(n_features).clamp(1, n_features.max(1));
    let min_leaf = config.min_samples_leaf.max(1);
    let parent_impurity = gini(n, positives);

    let x = data.features();
    let y = data.targets();

    let mut feature_order: Vec<usize> = (0..n_features).collect();
    feature_order.shuffle(rng);

    let mut best: Option<SplitCandidate> = None;
    let mut order = indices.to_vec();

    for (examined, &feature) in feature_order.iter().enumerate() {
        if examined >= max_features && best.is_some() {
            break;
        }

        order.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));

        let mut left_n = 0usize;
        let mut left_pos = 0usize;

        for k in 0..n - 1 {
            let i = order[k];
            left_n += 1;
            left_pos += usize::from(y[i]);

            let current = x[[i, feature]];
            let next = x[[order[k + 1], feature]];
            if current == next {
                continue;
            }

            let right_n = n - left_n;
            if left_n < min_leaf || right_n < min_leaf {
                continue;
            }

            let right_pos = positives - left_pos;
            let weighted = (left_n as f64 * gini(left_n, left_pos)
                + right_n as f64 * gini(right_n, right_pos))
                / n as f64;
            let gain = parent_impurity - weighted;

            if gain > best.as_ref().map_or(MIN_GAIN, |b| b.gain) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (current + next) / 2.0,
                    gain,
                });
            }
        }
    }

    best
}

fn count_positive(data: &TrainingMatrix, indices: &[usize]) -> usize {
    let y = data.targets();
    indices.iter().filter(|&&i| y[i] == 1).count()
}

fn gini(n: usize, positives: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = positives as f64 / n as f64;
    2.0 * p * (1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};
    use rand::SeedableRng;

    fn threshold_data() -> TrainingMatrix {
        // x0 decides the class, x1 is noise
        let n = 100;
        let features = Array2::from_shape_fn((n, 2), |(i, j)| {
            if j == 0 { i as f64 } else { ((i * 37) % 11) as f64 }
        });
        let targets = Array1::from_iter((0..n).map(|i| u8::from(i >= 60)));
        TrainingMatrix::new(features, targets)
    }

    #[test]
    fn test_learns_single_threshold() {
        let data = threshold_data();
        let sample: Vec<usize> = (0..data.n_samples()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let tree = DecisionTree::fit(TreeConfig::default(), &data, &sample, &mut rng);

        for i in 0..data.n_samples() {
            let row = data.features().row(i).to_vec();
            assert_eq!(tree.votes_positive(&row), i >= 60, "row {i}");
        }
        assert!(tree.feature_importances()[0] > 0.99);
    }

    #[test]
    fn test_pure_node_is_leaf() {
        let features = Array2::from_shape_fn((10, 1), |(i, _)| i as f64);
        let targets = Array1::from_elem(10, 1u8);
        let data = TrainingMatrix::new(features, targets);
        let sample: Vec<usize> = (0..10).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let tree = DecisionTree::fit(TreeConfig::default(), &data, &sample, &mut rng);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.predict_positive_fraction(&[3.0]), 1.0);
        assert_eq!(tree.feature_importances(), &[0.0]);
    }

    #[test]
    fn test_max_depth_is_respected() {
        let data = threshold_data();
        let sample: Vec<usize> = (0..data.n_samples()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = TreeConfig { max_depth: Some(1), ..Default::default() };

        let tree = DecisionTree::fit(config, &data, &sample, &mut rng);
        assert!(tree.root().depth() <= 2);
    }

    #[test]
    fn test_identical_features_cannot_split() {
        let features = Array2::from_elem((6, 1), 5.0);
        let targets = Array1::from_vec(vec![0, 1, 0, 1, 0, 1]);
        let data = TrainingMatrix::new(features, targets);
        let sample: Vec<usize> = (0..6).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let tree = DecisionTree::fit(TreeConfig::default(), &data, &sample, &mut rng);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.predict_positive_fraction(&[5.0]), 0.5);
        assert!(!tree.votes_positive(&[5.0]));
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(0, 0), 0.0);
        assert_eq!(gini(10, 0), 0.0);
        assert_eq!(gini(10, 10), 0.0);
        assert!((gini(10, 5) - 0.5).abs() < 1e-12);
    }
}
