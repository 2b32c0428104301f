use crate::{
    error::{ForestError, Result},
    tree::tree::IsolationTree,
    utils::{
        dataset::Dataset,
        io::{read_bin, write_bin},
        statistics::{average_path_length, mean, transpose},
    },
    RandomGenerator,
};
use log::{debug, trace};
use rand::{seq::SliceRandom, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUBSAMPLE_SIZE: usize = 256;
pub const N_TREES: usize = 100;
pub const SEED: u64 = 2325;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    /// Rows drawn without replacement for each tree.
    pub sample_size: usize,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: N_TREES,
            sample_size: SUBSAMPLE_SIZE,
            seed: SEED,
        }
    }
}

impl ForestConfig {
    pub fn new(n_trees: usize, sample_size: usize) -> Self {
        Self {
            n_trees,
            sample_size,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// `ceil(log2(sample_size))`, shared by every tree of the forest.
    pub fn height_limit(&self) -> usize {
        if self.sample_size <= 1 {
            0
        } else {
            ((self.sample_size - 1).ilog2() + 1) as usize
        }
    }

    pub fn validate(&self, dataset_size: usize) -> Result<()> {
        if self.n_trees == 0 {
            return Err(ForestError::ZeroTrees);
        }
        if self.sample_size < 2 {
            return Err(ForestError::SampleSizeTooSmall(self.sample_size));
        }
        if self.sample_size > dataset_size {
            return Err(ForestError::SampleSizeExceedsDataset {
                sample_size: self.sample_size,
                dataset_size,
            });
        }
        Ok(())
    }
}

/// An ensemble of isolation trees scoring samples by how quickly they are
/// isolated.
///
/// The forest keeps no reference to the training data once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    config: ForestConfig,
    n_features: usize,
    n_samples: usize,
    average_path_length: f64,
}

impl IsolationForest {
    pub fn fit(dataset: &Dataset, config: &ForestConfig) -> Result<Self> {
        config.validate(dataset.len())?;
        let height_limit = config.height_limit();
        debug!(
            "Fitting isolation forest: n_trees={}, sample_size={}, height_limit={}, \
             n_samples={}, n_features={}",
            config.n_trees,
            config.sample_size,
            height_limit,
            dataset.len(),
            dataset.n_features()
        );

        let trees = (0..config.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut random_state = tree_random_state(config.seed, i);
                let indices =
                    generate_indices(config.sample_size, dataset.len(), &mut random_state);
                let tree = IsolationTree::fit(dataset, indices, height_limit, &mut random_state);
                trace!(
                    "Tree {}: {} nodes, depth {}",
                    i,
                    tree.n_nodes(),
                    tree.depth()
                );
                tree
            })
            .collect::<Vec<_>>();

        Ok(Self {
            trees,
            config: config.clone(),
            n_features: dataset.n_features(),
            n_samples: dataset.len(),
            average_path_length: average_path_length(dataset.len()),
        })
    }

    /// `2^(-E[h(x)] / c(n))` where `E[h(x)]` is the mean path length of `x`
    /// over all trees and `n` the size of the training dataset.
    pub fn anomaly_score(&self, x: &[f64]) -> Result<f64> {
        self.check_dimension(x.len())?;
        Ok(self.score_unchecked(x))
    }

    fn score_unchecked(&self, x: &[f64]) -> f64 {
        let sum = self
            .trees
            .iter()
            .map(|tree| tree.path_length_unchecked(x))
            .sum::<f64>();
        let avg_path_length = sum / self.trees.len() as f64;
        2.0_f64.powf(-avg_path_length / self.average_path_length)
    }

    /// Path length of `x` in each tree, in tree order.
    pub fn path_lengths(&self, x: &[f64]) -> Result<Vec<f64>> {
        self.check_dimension(x.len())?;
        Ok(self
            .trees
            .iter()
            .map(|tree| tree.path_length_unchecked(x))
            .collect())
    }

    /// Mean path length of `x` over the forest.
    pub fn average_depth(&self, x: &[f64]) -> Result<f64> {
        Ok(mean(&self.path_lengths(x)?))
    }

    pub fn score_samples(&self, data: &Dataset) -> Result<Vec<f64>> {
        self.check_dimension(data.n_features())?;
        Ok(data
            .samples()
            .par_iter()
            .map(|sample| self.score_unchecked(&sample.features))
            .collect())
    }

    /// Per-sample path lengths: `depths[i][t]` is sample `i` in tree `t`.
    pub fn depth_samples(&self, data: &Dataset) -> Result<Vec<Vec<f64>>> {
        self.check_dimension(data.n_features())?;
        let depths = self
            .trees
            .par_iter()
            .map(|tree| {
                data.iter()
                    .map(|sample| tree.path_length_unchecked(&sample.features))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        Ok(transpose(depths))
    }

    /// Flags samples whose score reaches `threshold`.
    pub fn predict(&self, data: &Dataset, threshold: f64) -> Result<Vec<bool>> {
        Ok(self
            .score_samples(data)?
            .into_iter()
            .map(|score| score >= threshold)
            .collect())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_bin(path, self)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let forest: Self = read_bin(path)?;
        forest.validate()?;
        Ok(forest)
    }

    /// Checks a forest obtained from outside `fit`, e.g. decoded from disk.
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() || self.trees.len() != self.config.n_trees {
            return Err(ForestError::InvalidModel(format!(
                "expected {} trees, found {}",
                self.config.n_trees,
                self.trees.len()
            )));
        }
        if self.n_features == 0 {
            return Err(ForestError::ZeroFeatures);
        }
        if !(self.average_path_length.is_finite() && self.average_path_length > 0.0) {
            return Err(ForestError::InvalidModel(format!(
                "normalization constant {} is not positive",
                self.average_path_length
            )));
        }
        for tree in &self.trees {
            if tree.n_features() != self.n_features {
                return Err(ForestError::DimensionMismatch {
                    expected: self.n_features,
                    found: tree.n_features(),
                });
            }
            tree.validate()?;
        }
        Ok(())
    }

    fn check_dimension(&self, found: usize) -> Result<()> {
        if found != self.n_features {
            return Err(ForestError::DimensionMismatch {
                expected: self.n_features,
                found,
            });
        }
        Ok(())
    }

    pub fn trees(&self) -> &[IsolationTree] {
        &self.trees
    }
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }
    pub fn n_features(&self) -> usize {
        self.n_features
    }
    /// Size of the dataset the forest was fitted on.
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }
    pub fn sample_size(&self) -> usize {
        self.config.sample_size
    }
    pub fn height_limit(&self) -> usize {
        self.config.height_limit()
    }
    /// Normalization constant `c(n_samples)`.
    pub fn average_path_length(&self) -> f64 {
        self.average_path_length
    }
}

/// Private generator for tree `index`: the forest seed selects the key and
/// the tree index selects the ChaCha stream.
pub fn tree_random_state(seed: u64, index: usize) -> RandomGenerator {
    let mut random_state = RandomGenerator::seed_from_u64(seed);
    random_state.set_stream(index as u64);
    random_state
}

/// Draws `n_samples` distinct indices from `0..n_population`.
pub fn generate_indices(
    n_samples: usize,
    n_population: usize,
    random_state: &mut RandomGenerator,
) -> Vec<usize> {
    let mut population = (0..n_population).collect::<Vec<usize>>();
    let (sampled, _) = population.partial_shuffle(random_state, n_samples);
    sampled.to_vec()
}
