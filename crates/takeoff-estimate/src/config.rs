//! Configuration for estimate finalization

use serde::{Deserialize, Serialize};

/// How debris leaves the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalMethod {
    /// Roll-off dumpster
    Dumpster,
    /// Pickup-truck hauling
    Pickup,
    /// Recycling facility loads
    Recycling,
}

/// Per-load pricing for one disposal method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisposalRates {
    /// Cost per container load
    pub cost_per_load: f64,
    /// Container capacity in pounds
    pub capacity_lbs: f64,
}

/// Disposal method selection and per-method rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisposalConfig {
    /// Chosen method for this project
    pub method: DisposalMethod,
    /// Dumpster rates
    pub dumpster: DisposalRates,
    /// Pickup rates
    pub pickup: DisposalRates,
    /// Recycling rates
    pub recycling: DisposalRates,
}

impl DisposalConfig {
    /// Rates for the configured method
    pub fn rates(&self) -> DisposalRates {
        match self.method {
            DisposalMethod::Dumpster => self.dumpster,
            DisposalMethod::Pickup => self.pickup,
            DisposalMethod::Recycling => self.recycling,
        }
    }
}

impl Default for DisposalConfig {
    fn default() -> Self {
        Self {
            method: DisposalMethod::Dumpster,
            dumpster: DisposalRates {
                cost_per_load: 450.0,
                capacity_lbs: 4000.0,
            },
            pickup: DisposalRates {
                cost_per_load: 150.0,
                capacity_lbs: 1000.0,
            },
            recycling: DisposalRates {
                cost_per_load: 300.0,
                capacity_lbs: 3000.0,
            },
        }
    }
}

/// Who carries each tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxResponsibility {
    /// Customer is billed both material and labor tax
    Customer,
    /// Contractor absorbs the labor tax; only material tax is billed
    Contractor,
}

/// Tax rates and responsibility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Material tax rate, percent
    pub material_rate: f64,
    /// Labor tax rate, percent
    pub labor_rate: f64,
    /// Who carries the labor tax
    pub responsibility: TaxResponsibility,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            material_rate: 8.0,
            labor_rate: 5.0,
            responsibility: TaxResponsibility::Customer,
        }
    }
}

/// Expected cost-per-unit band for the price reasonableness check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    /// Minimum expected cost per quantity unit
    pub min_per_unit: f64,
    /// Maximum expected cost per quantity unit
    pub max_per_unit: f64,
}

impl Default for PriceBand {
    fn default() -> Self {
        Self {
            min_per_unit: 0.10,
            max_per_unit: 500.0,
        }
    }
}

/// Configuration for the estimate finalizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Overhead applied to direct + disposal, percent
    pub overhead_percentage: f64,
    /// Profit applied to direct + disposal, percent
    pub profit_percentage: f64,
    /// Disposal method and rates
    pub disposal: DisposalConfig,
    /// Tax rates and responsibility
    pub tax: TaxConfig,
    /// Days the estimate stays valid after creation
    pub validity_days: u32,
    /// Price reasonableness band
    pub price_band: PriceBand,
    /// Timeline feasibility bound in days
    pub max_duration_days: f64,
}

impl EstimateConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.overhead_percentage < 0.0 {
            return Err("overhead_percentage must be non-negative".to_string());
        }
        if self.profit_percentage < 0.0 {
            return Err("profit_percentage must be non-negative".to_string());
        }
        if self.validity_days == 0 {
            return Err("validity_days must be greater than 0".to_string());
        }
        for (name, rates) in [
            ("dumpster", self.disposal.dumpster),
            ("pickup", self.disposal.pickup),
            ("recycling", self.disposal.recycling),
        ] {
            if rates.capacity_lbs <= 0.0 {
                return Err(format!("{} capacity must be positive", name));
            }
            if rates.cost_per_load < 0.0 {
                return Err(format!("{} cost per load must be non-negative", name));
            }
        }
        if self.price_band.min_per_unit > self.price_band.max_per_unit {
            return Err("price band minimum exceeds maximum".to_string());
        }
        if self.max_duration_days <= 0.0 {
            return Err("max_duration_days must be positive".to_string());
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

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            overhead_percentage: 10.0,
            profit_percentage: 10.0,
            disposal: DisposalConfig::default(),
            tax: TaxConfig::default(),
            validity_days: 30,
            price_band: PriceBand::default(),
            max_duration_days: 365.0,
        }
    }
}
