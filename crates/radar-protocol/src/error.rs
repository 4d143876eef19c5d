//! Error types for property lookups and snapshot decoding

use thiserror::Error;

use crate::property::PropertyId;

/// Errors that can occur while resolving a property in the catalog
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// No property matches the given name
    #[error("unknown property name: {0:?}")]
    NotFound(String),

    /// Property id is outside the catalog
    #[error("property id {0} is out of range")]
    OutOfRange(PropertyId),
}

/// Errors that can occur while reading snapshot data from a shared buffer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Buffer does not hold enough bytes for the requested read
    #[error("truncated snapshot: need {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    /// Header declares a size that cannot cover even the header itself
    #[error("invalid snapshot size: {0} bytes")]
    InvalidSize(i32),
}
