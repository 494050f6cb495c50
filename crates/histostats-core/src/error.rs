//! Error types for histostats
//!
//! Provides a unified error type for all histostats crates.

use thiserror::Error;

/// Core error type for histostats operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// A bin width that cannot produce a histogram
    #[error("Degenerate bin width: {0} (the sample needs at least two distinct finite values)")]
    DegenerateBinWidth(f64),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Drawing backend error
    #[error("Render error: {0}")]
    Render(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for an out-of-range confidence level
    pub fn invalid_conf_level(level: f64) -> Self {
        Self::InvalidParameter(format!("Confidence level {level} must be in (0, 1)"))
    }

    /// Create an error for an out-of-range trim fraction
    pub fn invalid_trim(tr: f64) -> Self {
        Self::InvalidParameter(format!("Trim fraction {tr} must be in [0, 0.5)"))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} contains NaN or infinite values"))
    }

    /// Wrap a statrs distribution construction failure
    pub fn distribution(name: &str, err: impl std::fmt::Display) -> Self {
        Self::Computation(format!("Failed to create {name} distribution: {err}"))
    }
}

/// Check that a confidence level lies in (0, 1)
pub fn check_conf_level(level: f64) -> Result<()> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(Error::invalid_conf_level(level))
    }
}

/// Check that a sample has at least `expected` observations
pub fn check_sample_size(sample: &[f64], expected: usize) -> Result<()> {
    if sample.len() < expected {
        return Err(Error::InsufficientData {
            expected,
            actual: sample.len(),
        });
    }
    Ok(())
}
