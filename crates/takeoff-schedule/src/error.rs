//! Error types for the timeline builder

use thiserror::Error;

/// Errors that can occur while building a timeline
///
/// Unlike extraction skips and pricing omissions, these are fatal: a
/// timeline is either complete and acyclic or it does not exist.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The task plan has no entry for a work scope in the batch
    #[error("Task plan has no entry for work scope '{0}'")]
    MissingPlanEntry(String),

    /// The dependency graph contains a cycle
    #[error("Cyclic task dependency involving work scopes: {}", .0.join(" -> "))]
    CyclicDependency(Vec<String>),
}
