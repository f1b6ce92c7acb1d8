//! Error types for the metadata codec and query engine
//!
//! This module defines the single error type shared by every crate in the
//! workspace. We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! Every failure is local and synchronous: flatten, unflatten, parse and
//! evaluate are all-or-nothing per call and nothing is retried.

use crate::limits::LimitError;
use crate::path::PathParseError;
use thiserror::Error;

/// Result type alias for codec and query operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the metadata core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A query constraint could not be parsed
    #[error("Malformed constraint '{constraint}': {reason}")]
    MalformedConstraint {
        /// The offending constraint string, verbatim
        constraint: String,
        /// What was wrong with it
        reason: String,
    },

    /// A numeric comparison was applied to a non-numeric value or operand
    #[error("Type mismatch for '{field}': {detail}")]
    TypeMismatch {
        /// Field (or path) being compared
        field: String,
        /// Description of the mismatch
        detail: String,
    },

    /// Two incompatible values claim the same path
    #[error("Ambiguous path '{path}': {reason}")]
    AmbiguousPath {
        /// Encoded path of the conflict
        path: String,
        /// Description of the conflict
        reason: String,
    },

    /// The document contains a shape the flat path grammar cannot express
    #[error("Unrepresentable document at '{path}': {reason}")]
    UnrepresentableDocument {
        /// Encoded path of the offending node (empty for the root)
        path: String,
        /// Description of the offending shape
        reason: String,
    },

    /// Encoded path text could not be decoded
    #[error("Invalid path: {0}")]
    PathParse(#[from] PathParseError),

    /// A configured codec limit was exceeded
    #[error("Limit exceeded: {0}")]
    LimitExceeded(#[from] LimitError),

    /// A tagged numeric series could not be decoded
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a `MalformedConstraint` error
    pub fn malformed(constraint: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedConstraint {
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }

    /// Build a `TypeMismatch` error
    pub fn type_mismatch(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::TypeMismatch {
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Build an `AmbiguousPath` error
    pub fn ambiguous(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::AmbiguousPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build an `UnrepresentableDocument` error
    pub fn unrepresentable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::UnrepresentableDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Short, stable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MalformedConstraint { .. } => "malformed_constraint",
            Error::TypeMismatch { .. } => "type_mismatch",
            Error::AmbiguousPath { .. } => "ambiguous_path",
            Error::UnrepresentableDocument { .. } => "unrepresentable_document",
            Error::PathParse(_) => "path_parse",
            Error::LimitExceeded(_) => "limit_exceeded",
            Error::InvalidSeries(_) => "invalid_series",
            Error::Config(_) => "config",
        }
    }
}
