use ndarray::{Array1, Array2};

/// Encoded training corpus: one row per record, binary targets
#[derive(Debug, Clone)]
pub struct TrainingMatrix {
    features: Array2<f64>,
    targets: Array1<u8>,
}

impl TrainingMatrix {
    /// Panics if row and target counts differ
    pub fn new(features: Array2<f64>, targets: Array1<u8>) -> Self {
        assert_eq!(
            features.nrows(),
            targets.len(),
            "feature rows and targets must line up"
        );
        Self { features, targets }
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.n_samples() == 0
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn targets(&self) -> &Array1<u8> {
        &self.targets
    }

    /// Share of positive targets (0.0 for an empty matrix)
    pub fn positive_rate(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.targets.iter().filter(|&&t| t == 1).count() as f64 / self.n_samples() as f64
    }
}
