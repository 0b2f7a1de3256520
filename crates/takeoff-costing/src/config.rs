//! Configuration for the cost aggregator

use serde::{Deserialize, Serialize};
use takeoff_domain::WorkCategory;

/// Markup percentages by work category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupTable {
    /// Demolition markup, percent
    pub demolition: f64,
    /// Installation markup, percent
    pub installation: f64,
    /// Finishing markup, percent
    pub finishing: f64,
    /// Mechanical markup, percent
    pub mechanical: f64,
    /// Electrical markup, percent
    pub electrical: f64,
    /// Plumbing markup, percent
    pub plumbing: f64,
}

impl MarkupTable {
    /// Base markup percentage for a category
    pub fn for_category(&self, category: WorkCategory) -> f64 {
        match category {
            WorkCategory::Demolition => self.demolition,
            WorkCategory::Installation => self.installation,
            WorkCategory::Finishing => self.finishing,
            WorkCategory::Mechanical => self.mechanical,
            WorkCategory::Electrical => self.electrical,
            WorkCategory::Plumbing => self.plumbing,
        }
    }
}

impl Default for MarkupTable {
    fn default() -> Self {
        Self {
            demolition: 15.0,
            installation: 25.0,
            finishing: 30.0,
            mechanical: 35.0,
            electrical: 40.0,
            plumbing: 35.0,
        }
    }
}

/// Configuration for the cost aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostingConfig {
    /// Region code for catalog price multipliers
    pub region: String,

    /// Material waste factor applied to every material quantity
    pub waste_factor: f64,

    /// Markup percentages by category
    pub markup: MarkupTable,
}

impl CostingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.waste_factor < 1.0 {
            return Err("waste_factor must be at least 1.0".to_string());
        }
        for (name, pct) in [
            ("demolition", self.markup.demolition),
            ("installation", self.markup.installation),
            ("finishing", self.markup.finishing),
            ("mechanical", self.markup.mechanical),
            ("electrical", self.markup.electrical),
            ("plumbing", self.markup.plumbing),
        ] {
            if pct < 0.0 {
                return Err(format!("{} markup must be non-negative", name));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            region: "national".to_string(),
            waste_factor: 1.10,
            markup: MarkupTable::default(),
        }
    }
}
