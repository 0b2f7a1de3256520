//! Error types for the mapper

use thiserror::Error;

/// Errors that can occur during scope mapping
///
/// Per-line problems (no positive score, unresolved tie) are omissions,
/// reported in the mapping report rather than raised. Pair-level problems
/// during conflict detection are recorded as detection errors. Errors here
/// are reserved for misconfiguration.
#[derive(Error, Debug)]
pub enum MapperError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
