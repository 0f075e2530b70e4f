use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot sample {nonzeros} distinct indices out of a dimensionality of {dimensionality}")]
    TooManyNonzeros { nonzeros: u32, dimensionality: u32 },
    #[error("could not parse configuration: {0}")]
    BadConfigJson(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid sparse vector: {0}")]
    InvalidSparseVector(String),
    #[error("malformed sparse blob: {0}")]
    MalformedBlob(String),
    #[error("sparse blob is not valid hex: {0}")]
    BadHex(#[from] hex::FromHexError),
}
