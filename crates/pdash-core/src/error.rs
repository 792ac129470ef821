//! Error types for the PDash analytics library.
//!
//! This module defines the error taxonomy used throughout PDash. Only
//! genuinely fatal conditions are errors: an unknown entity, a zero
//! denominator, or an empty comparison scope are data conditions and are
//! handled locally with zero-valued results instead.

use thiserror::Error;

/// A specialized Result type for PDash operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// The main error type for PDash operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// The partner dataset has not been loaded; nothing can be computed.
    #[error("No data available")]
    NoDataAvailable,

    /// A month label could not be parsed (expected format: "Jul 2025").
    #[error("Invalid month: {label}")]
    InvalidMonth {
        /// The label that failed to parse.
        label: String,
    },

    /// An internal invariant was violated during aggregation or ranking.
    ///
    /// This indicates a logic bug, not a data condition, and must not be
    /// silently converted into a zero-valued response.
    #[error("Computation failed: {reason}")]
    Computation {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl AnalyticsError {
    /// Creates an `InvalidMonth` error.
    pub fn invalid_month(label: impl Into<String>) -> Self {
        Self::InvalidMonth {
            label: label.into(),
        }
    }

    /// Creates a `Computation` error.
    pub fn computation(reason: impl Into<String>) -> Self {
        Self::Computation {
            reason: reason.into(),
        }
    }
}
