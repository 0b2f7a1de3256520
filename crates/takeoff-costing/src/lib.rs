//! Takeoff Costing
//!
//! Prices quantification items against material, labor and equipment
//! catalogs with regional pricing and quantity-scaled markup.
//!
//! # Overview
//!
//! For each quantification item the aggregator prices every material
//! requirement of its work scope (with a waste factor), the labor
//! requirement (hours scaled by a difficulty factor at the regional hourly
//! rate), and an optional equipment rental sized by productivity. The
//! category markup is scaled down for large quantities and up for small
//! ones before reaching the billed total.
//!
//! Catalog providers are passed in explicitly; the aggregator never reaches
//! into global state. Cost items are point-in-time snapshots of the
//! catalogs as they stood at pricing time.
//!
//! Missing pricing data (unknown material, trade or equipment code) omits
//! that item's cost and records the omission; downstream the estimate is
//! flagged incomplete rather than the batch aborting.

#![warn(missing_docs)]

mod aggregator;
mod config;
mod error;

pub use aggregator::{CostAggregator, CostingReport, PricingOmission};
pub use config::{CostingConfig, MarkupTable};
pub use error::CostingError;
