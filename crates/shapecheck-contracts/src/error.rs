//! Error types for schema compilation and path parsing.
//!
//! A predicate failing is never an error: it is an `Outcome` recorded in a
//! `Results` report. `MatchError` only covers problems with the inputs the
//! caller hands to the engine before evaluation starts.

use thiserror::Error;

/// The unified error type for the shapecheck crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The top-level schema was not a map, a sequence or a predicate.
    #[error("cannot compile schema from {shape}: expected one of map, sequence or predicate")]
    UnsupportedSchema { shape: String },

    /// A path string could not be parsed.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A schema or actual document could not be decoded.
    #[error("document error: {reason}")]
    Document { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Convenience alias used throughout the shapecheck crates.
pub type MatchResult<T> = Result<T, MatchError>;
