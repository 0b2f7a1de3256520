//! Pricing catalog entities and cost items
//!
//! Material, labor and equipment catalogs are owned by an external
//! collaborator; the pipeline reads them through [`crate::traits::PricingCatalog`].
//! Cost items are point-in-time snapshots: a later catalog update never
//! alters an already-computed cost item.

use crate::ids::{CostItemId, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A purchasable material with regional pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog code
    pub code: String,
    /// Human-readable name
    pub name: String,
    /// Base cost per unit
    pub unit_cost: f64,
    /// Region code → price multiplier
    #[serde(default)]
    pub region_multipliers: HashMap<String, f64>,
}

impl Material {
    /// Regional unit cost; regions without an entry use the base cost
    pub fn regional_unit_cost(&self, region: &str) -> f64 {
        self.unit_cost * self.region_multipliers.get(region).copied().unwrap_or(1.0)
    }
}

/// A labor trade with regional hourly rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborRate {
    /// Trade code
    pub trade_code: String,
    /// Base hourly rate
    pub hourly_rate: f64,
    /// Region code → rate multiplier
    #[serde(default)]
    pub region_multipliers: HashMap<String, f64>,
}

impl LaborRate {
    /// Regional hourly rate; regions without an entry use the base rate
    pub fn regional_hourly_rate(&self, region: &str) -> f64 {
        self.hourly_rate * self.region_multipliers.get(region).copied().unwrap_or(1.0)
    }
}

/// Rentable equipment priced per day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRate {
    /// Equipment code
    pub code: String,
    /// Rental cost per day
    pub daily_rate: f64,
}

/// Priced consumption of one material by one cost item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCost {
    /// Material catalog code
    pub material_code: String,
    /// Material quantity including waste
    pub quantity: f64,
    /// Extended cost
    pub cost: f64,
}

/// A fully priced quantification item
///
/// Derived entity: every field is recomputable from the quantification item
/// and the catalogs as they stood at pricing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    /// Unique identifier
    pub id: CostItemId,
    /// The quantification item this prices
    pub item_id: ItemId,
    /// Work scope code, denormalized for scheduling and reporting
    pub work_scope_code: String,
    /// Per-material extended costs
    pub material_costs: Vec<MaterialCost>,
    /// Extended labor cost
    pub labor_cost: f64,
    /// Extended equipment cost when the scope requires equipment
    pub equipment_cost: Option<f64>,
    /// Materials + labor + equipment
    pub subtotal: f64,
    /// Markup percentage applied (already quantity-scaled)
    pub markup_percentage: f64,
    /// Subtotal with markup
    pub total_cost: f64,
}

impl CostItem {
    /// Sum of the per-material extended costs
    pub fn material_total(&self) -> f64 {
        self.material_costs.iter().map(|m| m.cost).sum()
    }
}
