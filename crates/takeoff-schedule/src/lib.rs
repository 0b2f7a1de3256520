//! Takeoff Schedule
//!
//! Builds a dependency-resolved project timeline from priced cost items and
//! an externally supplied task plan.
//!
//! # Overview
//!
//! Each cost item maps to one task. Durations, dependencies, parallelism
//! and crew sizes come from a [`TaskPlan`] keyed by work-scope code; the
//! pipeline never invents durations. Dependencies form a directed graph:
//! a cycle is a fatal error surfaced before estimate finalization, never a
//! silent truncation. The critical path is the longest dependency chain
//! through the graph, and the total duration is that length with a
//! configurable buffer applied.

#![warn(missing_docs)]

mod builder;
mod config;
mod error;

pub use builder::TimelineBuilder;
pub use config::{PlannedTask, ScheduleConfig, TaskPlan};
pub use error::ScheduleError;
