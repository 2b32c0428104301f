pub mod error;

pub mod forest {
    pub mod forest;
}

pub mod tree {
    pub mod node;
    pub mod tree;
}

pub mod utils {
    pub mod dataset;
    pub mod io;
    pub mod split;
    pub mod statistics;
    pub mod structures;
}

mod tests {
    mod test_dataset;
    mod test_iforest;
    mod test_io;
    mod test_split;
    mod test_tree;
}

pub use error::{ForestError, Result};
pub use forest::forest::{ForestConfig, IsolationForest};
pub use tree::tree::IsolationTree;
pub use utils::dataset::Dataset;
pub use utils::structures::Sample;

pub type RandomGenerator = rand_chacha::ChaCha8Rng;
