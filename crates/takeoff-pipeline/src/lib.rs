//! Takeoff Pipeline
//!
//! Orchestrates the full estimation pass: parallel measurement extraction,
//! scope mapping, conflict detection, costing, scheduling and estimate
//! finalization.
//!
//! # Architecture
//!
//! ```text
//!  images ──► worker pool (extraction, parallel per image)
//!                  │ barrier join
//!                  ▼
//!             ScopeMapper ──► ConflictDetector
//!                  │
//!                  ▼
//!             CostAggregator ──► TimelineBuilder ──► EstimateFinalizer
//! ```
//!
//! Extraction is embarrassingly parallel: images share no mutable state and
//! run under a bounded worker pool. Mapping requires the complete
//! deduplicated measurement set, so a barrier join separates the phases.
//! The downstream phases are deterministic single-pass computations with
//! read-only catalog access.
//!
//! Per-image OCR failures, extraction skips, mapping omissions and pricing
//! omissions are all carried in the final [`BatchReport`] rather than
//! aborting the run or being dropped. The only fatal condition is a cyclic
//! task dependency. A caller may abandon a batch at any point, after which
//! downstream phases refuse to run.

#![warn(missing_docs)]

mod config;
mod error;
mod pipeline;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{BatchReport, FailedImage, ImageOcr, PipelineOutput, TakeoffPipeline};
