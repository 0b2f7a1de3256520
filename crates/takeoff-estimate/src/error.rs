//! Error types for estimate finalization

use thiserror::Error;

/// Errors that can occur during finalization
///
/// Validation failures are not errors: they are carried on the estimate as
/// failed checks, keeping it in Draft. Errors here are reserved for
/// misconfiguration.
#[derive(Error, Debug)]
pub enum EstimateError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
