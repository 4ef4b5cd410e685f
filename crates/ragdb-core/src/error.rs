use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported embedding shape: rank {rank}, dims {dims:?}")]
    UnsupportedShape { rank: usize, dims: Vec<usize> },

    #[error("Embedding too small: {got} dims, need at least {want}")]
    DimensionTooSmall { got: usize, want: usize },

    #[error("Embeddings and metadata length mismatch: {vectors} vectors vs {records} records")]
    LengthMismatch { vectors: usize, records: usize },

    #[error("Embedding at position {index} rejected: {source}")]
    BadEmbedding {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
