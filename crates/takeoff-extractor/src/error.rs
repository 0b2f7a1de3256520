//! Error types for the extractor

use thiserror::Error;

/// Errors that can occur during measurement extraction
///
/// Per-fragment problems (no pattern match, malformed polygon) are skips,
/// not errors: they are recorded in the extraction report and never abort
/// the batch. Errors here are reserved for misconfiguration.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
