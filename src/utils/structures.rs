use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single observation: one coordinate per feature.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, PartialOrd)]
pub struct Sample {
    pub features: Arc<Vec<f64>>,
}

impl Sample {
    pub fn new(features: Vec<f64>) -> Self {
        Self {
            features: Arc::new(features),
        }
    }
    pub fn len(&self) -> usize {
        self.features.len()
    }
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.features
    }
}

impl AsRef<[f64]> for Sample {
    fn as_ref(&self) -> &[f64] {
        &self.features
    }
}

impl From<Vec<f64>> for Sample {
    fn from(features: Vec<f64>) -> Self {
        Self::new(features)
    }
}

#[macro_export]
macro_rules! assert_eq_with_tol {
    ($left:expr, $right:expr, $tolerance:expr) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;

        if (left - right).abs() > tolerance {
            panic!(
                "assertion failed: `(left == right)` \
                \n   left: `{:?}`,\
                \n  right: `{:?}`,\
                \n  diff:  `{:?}`,\
                \n  max tolerance: `{:?}`",
                left,
                right,
                (left - right).abs(),
                tolerance
            );
        }
    };
}
