//! Error types for the radar gauge

use radar_protocol::{PropertyError, PropertyId};
use thiserror::Error;

/// Errors that can occur while reading or writing radar properties
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// Id is outside the catalog or has no dispatch for the operation
    #[error("unknown property id: {0}")]
    UnknownId(PropertyId),

    /// Name or id lookup failed
    #[error("property lookup failed: {0}")]
    Property(#[from] PropertyError),
}
