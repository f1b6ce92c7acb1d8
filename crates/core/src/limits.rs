//! Size limits for documents and flattened records
//!
//! This module defines configurable limits that are enforced by the codec.
//! Violations result in `Error::LimitExceeded`.
//!
//! ## Contract
//!
//! Default limits are generous enough for any realistic simulation manifest;
//! custom limits are supplied through [`crate::config::MetaConfig`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size limits applied by flatten and unflatten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecLimits {
    /// Maximum nesting depth of mappings and sequences (default: 64)
    pub max_nesting_depth: usize,

    /// Maximum number of segments in a single path (default: 128)
    pub max_path_segments: usize,

    /// Maximum number of elements in a single sequence (default: 100_000)
    pub max_sequence_len: usize,

    /// Maximum number of flat entries per record (default: 1_000_000)
    pub max_entries: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        CodecLimits {
            max_nesting_depth: 64,
            max_path_segments: 128,
            max_sequence_len: 100_000,
            max_entries: 1_000_000,
        }
    }
}

impl CodecLimits {
    /// Create limits with small values for testing
    ///
    /// This is useful for unit tests that need to test limit enforcement
    /// without creating extremely large documents.
    pub fn with_small_limits() -> Self {
        CodecLimits {
            max_nesting_depth: 4,
            max_path_segments: 4,
            max_sequence_len: 8,
            max_entries: 16,
        }
    }

    /// Validate nesting depth
    pub fn check_depth(&self, depth: usize) -> Result<(), LimitError> {
        if depth > self.max_nesting_depth {
            return Err(LimitError::NestingTooDeep {
                actual: depth,
                max: self.max_nesting_depth,
            });
        }
        Ok(())
    }

    /// Validate the number of segments in a path
    pub fn check_path_len(&self, segments: usize) -> Result<(), LimitError> {
        if segments > self.max_path_segments {
            return Err(LimitError::PathTooLong {
                actual: segments,
                max: self.max_path_segments,
            });
        }
        Ok(())
    }

    /// Validate the length of a sequence
    pub fn check_sequence_len(&self, len: usize) -> Result<(), LimitError> {
        if len > self.max_sequence_len {
            return Err(LimitError::SequenceTooLong {
                actual: len,
                max: self.max_sequence_len,
            });
        }
        Ok(())
    }

    /// Validate the number of entries in a record
    pub fn check_entry_count(&self, count: usize) -> Result<(), LimitError> {
        if count > self.max_entries {
            return Err(LimitError::TooManyEntries {
                actual: count,
                max: self.max_entries,
            });
        }
        Ok(())
    }

    /// Name of the first limit configured as zero, if any
    pub fn first_zero_limit(&self) -> Option<&'static str> {
        [
            ("max_nesting_depth", self.max_nesting_depth),
            ("max_path_segments", self.max_path_segments),
            ("max_sequence_len", self.max_sequence_len),
            ("max_entries", self.max_entries),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0)
        .map(|(name, _)| name)
    }
}

/// Limit validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Document nesting exceeds maximum depth
    #[error("Nesting too deep: {actual} levels exceeds maximum {max}")]
    NestingTooDeep {
        /// Actual nesting depth
        actual: usize,
        /// Maximum allowed depth
        max: usize,
    },

    /// Path exceeds maximum segment count
    #[error("Path too long: {actual} segments exceeds maximum {max}")]
    PathTooLong {
        /// Actual segment count
        actual: usize,
        /// Maximum allowed count
        max: usize,
    },

    /// Sequence exceeds maximum length
    #[error("Sequence too long: {actual} elements exceeds maximum {max}")]
    SequenceTooLong {
        /// Actual element count
        actual: usize,
        /// Maximum allowed count
        max: usize,
    },

    /// Record exceeds maximum entry count
    #[error("Too many entries: {actual} exceeds maximum {max}")]
    TooManyEntries {
        /// Actual entry count
        actual: usize,
        /// Maximum allowed count
        max: usize,
    },
}

impl LimitError {
    /// Get the reason code
    pub fn reason_code(&self) -> &'static str {
        match self {
            LimitError::NestingTooDeep { .. } => "nesting_too_deep",
            LimitError::PathTooLong { .. } => "path_too_long",
            LimitError::SequenceTooLong { .. } => "sequence_too_long",
            LimitError::TooManyEntries { .. } => "too_many_entries",
        }
    }
}
