//! Error types for the pipeline

use thiserror::Error;

/// Errors that abort a pipeline run
///
/// Locally recoverable problems (extraction skips, mapping and pricing
/// omissions, per-image OCR failures) are carried in the batch report and
/// never surface here.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The batch was abandoned; downstream phases refuse to run
    #[error("Batch has been abandoned")]
    Abandoned,

    /// An optimistic write lost the race; the caller must re-read and retry
    #[error("Stale write: item was updated at {current}")]
    StaleWrite {
        /// The item's current update timestamp
        current: u64,
    },

    /// An extraction worker failed
    #[error("Extraction worker failed: {0}")]
    Worker(String),

    /// Extractor construction failed
    #[error(transparent)]
    Extractor(#[from] takeoff_extractor::ExtractorError),

    /// Timeline construction failed
    #[error(transparent)]
    Schedule(#[from] takeoff_schedule::ScheduleError),

    /// Mapper construction failed
    #[error(transparent)]
    Mapper(#[from] takeoff_mapper::MapperError),

    /// Aggregator construction failed
    #[error(transparent)]
    Costing(#[from] takeoff_costing::CostingError),

    /// Finalizer construction failed
    #[error(transparent)]
    Estimate(#[from] takeoff_estimate::EstimateError),
}
