//! Error types for the store crate.

use thiserror::Error;

/// Failures while talking to a record store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document store driver reported an error
    #[error("{0}")]
    Mongo(#[from] mongodb::error::Error),

    /// A record could not be encoded as a document
    #[error("Document encoding failed: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    /// A stored document does not have the recipe shape
    #[error("Document decoding failed: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    /// The store could not serve the request at all
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
