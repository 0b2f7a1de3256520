//! Takeoff Domain Layer
//!
//! This crate contains the core data model for the quantification →
//! costing → estimation pipeline. It defines the entities produced and
//! consumed by every pipeline stage plus the trait interfaces through which
//! stages reach external catalogs.
//!
//! ## Key Concepts
//!
//! - **Measurement**: a typed, deduplicated value recovered from one OCR
//!   fragment; immutable once created
//! - **Work scope**: a catalog-defined unit of construction work
//! - **Quantification item**: a work scope sized by aggregated measurements
//! - **Cost item**: a point-in-time priced snapshot of a quantification item
//! - **Timeline / Estimate**: the scheduled and rolled-up outputs
//!
//! ## Architecture
//!
//! - Catalog entities (work scopes, materials, labor, equipment) are
//!   read-only here; the pipeline never mutates them
//! - All derived entities carry UUIDv7 identifiers for stable persistence
//! - Trait definitions for catalog access live in [`traits`]; concrete
//!   providers are injected by callers, never looked up globally

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod conflict;
pub mod estimate;
pub mod geometry;
pub mod ids;
pub mod measurement;
pub mod pricing;
pub mod quantify;
pub mod schedule;
pub mod scope;
pub mod traits;

// Re-exports for convenience
pub use conflict::{Conflict, ConflictKind, ConflictSeverity};
pub use estimate::{Estimate, EstimateStatus, ValidationCheck, ValidationOutcome};
pub use geometry::BoundingBox;
pub use ids::{CostItemId, EstimateId, FragmentId, ItemId, MeasurementId, TaskId};
pub use measurement::{Fragment, Location, Measurement, MeasurementKind, Unit};
pub use pricing::{CostItem, EquipmentRate, LaborRate, Material, MaterialCost};
pub use quantify::QuantificationItem;
pub use schedule::{Task, Timeline};
pub use scope::{
    EquipmentRequirement, LaborRequirement, MaterialRequirement, WorkCategory, WorkScope,
};
pub use traits::{PricingCatalog, ScopeCatalog, StaticCatalog};
