//! Takeoff Mapper
//!
//! Maps deduplicated measurements onto catalog work scopes and detects
//! conflicts between the resulting quantification items.
//!
//! # Overview
//!
//! A scope description arrives as free text, one work item per line. Each
//! line is scored against every catalog work scope by a pluggable matching
//! strategy (keyword occurrence counting by default), the winning scope
//! gathers the measurements of its kind and location, and the summed,
//! unit-converted quantity becomes a [`takeoff_domain::QuantificationItem`].
//! Demolition scopes additionally carry an estimated debris weight.
//!
//! Lines no scope matches are omitted and surfaced as warnings in the
//! mapping report; they never abort the batch. Ties between equally-scored
//! scopes are resolved by an explicit configuration policy.
//!
//! # Architecture
//!
//! ```text
//! scope text ─┬─ per line ─ score scopes ─ select ─ gather ─ quantify ─┐
//! measurements┘                                                        │
//!                                MappingReport { items, omissions } ◄──┘
//!                                        │
//!                              ConflictDetector (O(n²) pairwise)
//! ```

#![warn(missing_docs)]

mod config;
mod conflict;
mod error;
mod mapper;
mod matcher;

pub use config::{ConflictRule, ConflictRules, DebrisWeightRule, MapperConfig, TieBreakPolicy};
pub use conflict::{ConflictDetector, ConflictReport, DetectionError};
pub use error::MapperError;
pub use mapper::{MappingOmission, MappingReport, OmissionReason, ScopeMapper};
pub use matcher::{KeywordMatcher, ScopeMatcher};
