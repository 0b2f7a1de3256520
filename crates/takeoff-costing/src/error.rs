//! Error types for the cost aggregator

use thiserror::Error;

/// Errors that can occur during cost aggregation
///
/// Missing pricing data for an item is an omission recorded in the costing
/// report, not an error: the rest of the batch is still priced. Errors
/// here are reserved for misconfiguration.
#[derive(Error, Debug)]
pub enum CostingError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
