//! Takeoff Estimate
//!
//! Rolls priced cost items, debris disposal, overhead, profit and taxes
//! into a versioned estimate, runs validation checks, and drives the
//! estimate lifecycle.
//!
//! # Overview
//!
//! The finalizer computes `direct_costs` from the cost items, sizes debris
//! disposal by container loads for the chosen method, applies overhead and
//! profit over `direct + disposal`, and bills material and labor taxes per
//! the configured tax responsibility. The roll-up satisfies the identity
//!
//! ```text
//! total_estimate = direct_costs + disposal_cost
//!                + overhead_amount + profit_amount + total_tax
//! ```
//!
//! Validation checks (quantity sanity, price reasonableness, timeline
//! feasibility) run on every pass; a failing check keeps the estimate in
//! Draft. Estimates are append-only versioned: re-finalizing produces a new
//! version rather than mutating the old record.

#![warn(missing_docs)]

mod config;
mod error;
mod finalizer;

pub use config::{
    DisposalConfig, DisposalMethod, DisposalRates, EstimateConfig, PriceBand, TaxConfig,
    TaxResponsibility,
};
pub use error::EstimateError;
pub use finalizer::EstimateFinalizer;
