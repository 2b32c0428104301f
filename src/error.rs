use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForestError {
    #[error("Number of trees must be positive")]
    ZeroTrees,

    #[error("Sample size must be at least 2, got {0}")]
    SampleSizeTooSmall(usize),

    #[error("Sample size {sample_size} exceeds dataset size {dataset_size}")]
    SampleSizeExceedsDataset {
        sample_size: usize,
        dataset_size: usize,
    },

    #[error("Dataset must have at least one feature")]
    ZeroFeatures,

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Dimension mismatch: expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Non-finite value {value} at feature {feature}")]
    NonFiniteValue { feature: usize, value: f64 },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("Decoding error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

pub type Result<T> = std::result::Result<T, ForestError>;
