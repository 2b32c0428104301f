use crate::error::{ForestError, Result};
use crate::utils::structures::Sample;
use serde::{Deserialize, Serialize};

/// An ordered collection of samples sharing the same dimension.
///
/// The dimension is fixed when the dataset is created and every inserted
/// row is checked against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    n_features: usize,
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(n_features: usize) -> Result<Self> {
        if n_features == 0 {
            return Err(ForestError::ZeroFeatures);
        }
        Ok(Self {
            n_features,
            samples: Vec::new(),
        })
    }

    pub fn with_capacity(n_features: usize, capacity: usize) -> Result<Self> {
        let mut dataset = Self::new(n_features)?;
        dataset.samples.reserve(capacity);
        Ok(dataset)
    }

    /// Builds a dataset whose dimension is taken from the first row.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<f64>>,
    {
        let mut rows = rows.into_iter().peekable();
        let n_features = rows.peek().ok_or(ForestError::EmptyDataset)?.len();
        let mut dataset = Self::with_capacity(n_features, rows.size_hint().0)?;
        for row in rows {
            dataset.push(row)?;
        }
        Ok(dataset)
    }

    pub fn push(&mut self, features: Vec<f64>) -> Result<()> {
        self.check_dimension(&features)?;
        if let Some((feature, value)) = features
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(ForestError::NonFiniteValue {
                feature,
                value: *value,
            });
        }
        self.samples.push(Sample::new(features));
        Ok(())
    }

    /// Appends every row of `other`. Rows are shared, not copied.
    pub fn extend(&mut self, other: &Dataset) -> Result<()> {
        if other.n_features != self.n_features {
            return Err(ForestError::DimensionMismatch {
                expected: self.n_features,
                found: other.n_features,
            });
        }
        self.samples.extend(other.samples.iter().cloned());
        Ok(())
    }

    pub fn check_dimension(&self, features: &[f64]) -> Result<()> {
        if features.len() != self.n_features {
            return Err(ForestError::DimensionMismatch {
                expected: self.n_features,
                found: features.len(),
            });
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub(crate) fn view(&self, indices: Vec<usize>) -> DatasetView<'_> {
        DatasetView::new(self, indices)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;
    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// The rows of a dataset visible at one point of tree construction.
///
/// Holds only row indices; sample payloads stay in the borrowed dataset.
#[derive(Debug, Clone)]
pub(crate) struct DatasetView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> DatasetView<'a> {
    pub(crate) fn new(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        debug_assert!(indices.iter().all(|&i| i < dataset.len()));
        Self { dataset, indices }
    }
    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }
    pub(crate) fn n_features(&self) -> usize {
        self.dataset.n_features
    }
    #[inline]
    pub(crate) fn value(&self, row: usize, feature: usize) -> f64 {
        self.dataset.samples[self.indices[row]].features[feature]
    }
    pub(crate) fn values(&self, feature: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |row| self.value(row, feature))
    }

    /// Splits the view into rows with `value < threshold` and the rest.
    pub(crate) fn partition(self, feature: usize, threshold: f64) -> (Self, Self) {
        let dataset = self.dataset;
        let (left, right): (Vec<usize>, Vec<usize>) = self
            .indices
            .into_iter()
            .partition(|&i| dataset.samples[i].features[feature] < threshold);
        (Self::new(dataset, left), Self::new(dataset, right))
    }
}
