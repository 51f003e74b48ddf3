//! Random Forest - bagged ensemble of decision trees
//!
//! Each tree gets its own ChaCha8 stream seeded with `seed + tree_index`, so
//! the fitted forest is identical no matter how rayon schedules the work.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::matrix::TrainingMatrix;
use super::tree::{DecisionTree, TreeConfig};
use super::ModelError;
use crate::constants::{DEFAULT_SEED, DEFAULT_TREE_COUNT};
use crate::logic::features::FeatureVector;

/// Random forest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    /// Maximum depth of each tree (None = unlimited)
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Features examined per split (None = ceil(sqrt(n_features)))
    pub max_features: Option<usize>,
    /// Draw each tree's sample with replacement
    pub bootstrap: bool,
    pub seed: u64,
    /// Estimate accuracy from out-of-bag samples
    pub oob_score: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREE_COUNT,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: DEFAULT_SEED,
            oob_score: true,
        }
    }
}

impl ForestConfig {
    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn tree_config(&self, n_features: usize) -> TreeConfig {
        let default_features = (n_features as f64).sqrt().ceil() as usize;
        TreeConfig {
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            min_samples_leaf: self.min_samples_leaf,
            max_features: Some(self.max_features.unwrap_or(default_features).max(1)),
        }
    }
}

/// Summary of a completed fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    pub n_trees: usize,
    pub n_samples: usize,
    pub positive_rate: f64,
    /// Accuracy on the training rows (optimistic)
    pub training_accuracy: f64,
    pub oob_accuracy: Option<f64>,
    pub mean_depth: f64,
}

/// Tree votes cast for one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    pub positive: usize,
    pub total: usize,
}

impl VoteCount {
    /// Share of positive votes (0.0 when nobody voted)
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.positive as f64 / self.total as f64
    }
}

/// Fitted random forest; there is no unfitted state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    n_features: usize,
    feature_importances: Vec<f64>,
    report: FitReport,
}

impl RandomForest {
    pub fn fit(config: ForestConfig, data: &TrainingMatrix) -> Result<Self, ModelError> {
        if config.n_trees == 0 {
            return Err(ModelError::NoTrees);
        }
        if data.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }
        if data.n_features() == 0 {
            return Err(ModelError::NoFeatures);
        }

        let n_samples = data.n_samples();
        let n_features = data.n_features();
        let tree_config = config.tree_config(n_features);

        log::info!(
            "Fitting random forest: {} trees, {} samples, {} features (max_features={:?})",
            config.n_trees,
            n_samples,
            n_features,
            tree_config.max_features
        );

        let fitted: Vec<(DecisionTree, Vec<bool>)> = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));
                let sample: Vec<usize> = if config.bootstrap {
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
                } else {
                    (0..n_samples).collect()
                };

                let mut in_bag = vec![false; n_samples];
                for &idx in &sample {
                    in_bag[idx] = true;
                }

                let tree = DecisionTree::fit(tree_config, data, &sample, &mut rng);
                (tree, in_bag)
            })
            .collect();

        let (trees, in_bag): (Vec<DecisionTree>, Vec<Vec<bool>>) = fitted.into_iter().unzip();

        let feature_importances = average_importances(&trees, n_features);
        let oob_accuracy = if config.oob_score && config.bootstrap {
            oob_accuracy(&trees, &in_bag, data)
        } else {
            None
        };

        let mean_depth =
            trees.iter().map(|t| t.root().depth() as f64).sum::<f64>() / trees.len() as f64;

        let mut forest = Self {
            report: FitReport {
                n_trees: trees.len(),
                n_samples,
                positive_rate: data.positive_rate(),
                training_accuracy: 0.0,
                oob_accuracy,
                mean_depth,
            },
            config,
            trees,
            n_features,
            feature_importances,
        };
        forest.report.training_accuracy = forest.accuracy(data);

        log::info!(
            "Random forest fitted: training accuracy {:.4}, OOB accuracy {}, mean depth {:.1}",
            forest.report.training_accuracy,
            forest
                .report
                .oob_accuracy
                .map_or_else(|| "n/a".to_string(), |a| format!("{a:.4}")),
            forest.report.mean_depth
        );

        Ok(forest)
    }

    /// Fraction of trees voting for the positive class
    pub fn predict_probability(&self, vector: &FeatureVector) -> f64 {
        self.predict_votes(vector).fraction()
    }

    pub fn predict_votes(&self, vector: &FeatureVector) -> VoteCount {
        self.count_votes(vector.as_slice())
    }

    /// Same as `predict_probability` for a raw row in layout order
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        self.count_votes(row).fraction()
    }

    fn count_votes(&self, row: &[f64]) -> VoteCount {
        debug_assert_eq!(row.len(), self.n_features);
        VoteCount {
            positive: self.trees.iter().filter(|t| t.votes_positive(row)).count(),
            total: self.trees.len(),
        }
    }

    /// Share of rows whose `probability >= 0.5` matches the target
    pub fn accuracy(&self, data: &TrainingMatrix) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let x = data.features();
        let y = data.targets();
        let correct = (0..data.n_samples())
            .into_par_iter()
            .filter(|&i| {
                let row = x.row(i).to_vec();
                (self.predict_row(&row) >= 0.5) == (y[i] == 1)
            })
            .count();
        correct as f64 / data.n_samples() as f64
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Mean decrease in impurity, normalized to sum to 1
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    pub fn report(&self) -> &FitReport {
        &self.report
    }
}

fn average_importances(trees: &[DecisionTree], n_features: usize) -> Vec<f64> {
    let mut total = vec![0.0; n_features];
    for tree in trees {
        for (acc, imp) in total.iter_mut().zip(tree.feature_importances()) {
            *acc += imp;
        }
    }

    let sum: f64 = total.iter().sum();
    if sum > 0.0 {
        for imp in &mut total {
            *imp /= sum;
        }
    }
    total
}

/// Majority vote over the trees that never saw each row
fn oob_accuracy(trees: &[DecisionTree], in_bag: &[Vec<bool>], data: &TrainingMatrix) -> Option<f64> {
    let x = data.features();
    let y = data.targets();

    let (scored, correct) = (0..data.n_samples())
        .into_par_iter()
        .filter_map(|i| {
            let row = x.row(i).to_vec();
            let mut voters = 0usize;
            let mut positive = 0usize;
            for (tree, bag) in trees.iter().zip(in_bag) {
                if !bag[i] {
                    voters += 1;
                    positive += usize::from(tree.votes_positive(&row));
                }
            }
            if voters == 0 {
                return None;
            }
            let predicted = positive as f64 / voters as f64 >= 0.5;
            Some(usize::from(predicted == (y[i] == 1)))
        })
        .fold(|| (0usize, 0usize), |(n, c), hit| (n + 1, c + hit))
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    if scored == 0 {
        log::warn!("No out-of-bag samples; OOB accuracy unavailable");
        return None;
    }
    Some(correct as f64 / scored as f64)
}
