//! Work-scope catalog entities
//!
//! Work scopes are loaded from an external catalog and are read-only to the
//! pipeline. Each scope names the measurement kind it is sized by, the
//! keywords the mapper scores against, and the material/labor/equipment
//! requirements the cost aggregator prices.

use crate::measurement::{MeasurementKind, Unit};
use serde::{Deserialize, Serialize};

/// Category of construction work, closed set
///
/// The markup table and the conflict rules are keyed by category, so the
/// set is deliberately exhaustive rather than string-typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkCategory {
    /// Tear-out work producing debris
    Demolition,
    /// New material going in
    Installation,
    /// Surface finishing (paint, texture, trim finishing)
    Finishing,
    /// HVAC and mechanical systems
    Mechanical,
    /// Electrical systems
    Electrical,
    /// Plumbing systems
    Plumbing,
}

impl WorkCategory {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkCategory::Demolition => "demolition",
            WorkCategory::Installation => "installation",
            WorkCategory::Finishing => "finishing",
            WorkCategory::Mechanical => "mechanical",
            WorkCategory::Electrical => "electrical",
            WorkCategory::Plumbing => "plumbing",
        }
    }

    /// Parse a category from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "demolition" => Some(WorkCategory::Demolition),
            "installation" => Some(WorkCategory::Installation),
            "finishing" => Some(WorkCategory::Finishing),
            "mechanical" => Some(WorkCategory::Mechanical),
            "electrical" => Some(WorkCategory::Electrical),
            "plumbing" => Some(WorkCategory::Plumbing),
            _ => None,
        }
    }
}

/// One material a scope consumes per unit of quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    /// Material catalog code
    pub material_code: String,
    /// Material quantity consumed per unit of scope quantity
    pub quantity_per_unit: f64,
}

/// Labor a scope consumes per unit of quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborRequirement {
    /// Labor trade catalog code
    pub trade_code: String,
    /// Crew hours per unit of scope quantity
    pub hours_per_unit: f64,
    /// Difficulty multiplier applied to hours
    pub difficulty_factor: f64,
}

/// Equipment a scope requires, priced by rental day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRequirement {
    /// Equipment catalog code
    pub equipment_code: String,
    /// Scope quantity one rental day covers
    pub productivity_rate: f64,
}

/// A catalog-defined unit of construction work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkScope {
    /// Unique catalog code
    pub code: String,
    /// Human-readable name
    pub name: String,
    /// Work category
    pub category: WorkCategory,
    /// Kind of measurement this scope is sized by
    pub measurement_kind: MeasurementKind,
    /// Unit quantities are expressed in
    pub unit_of_measure: Unit,
    /// Keywords scored against scope-description lines
    pub keywords: Vec<String>,
    /// Materials consumed per unit of quantity
    #[serde(default)]
    pub material_requirements: Vec<MaterialRequirement>,
    /// Labor consumed per unit of quantity
    pub labor_requirement: LaborRequirement,
    /// Optional equipment requirement
    #[serde(default)]
    pub equipment_requirement: Option<EquipmentRequirement>,
}

impl WorkScope {
    /// Whether any of this scope's keywords contains the given token
    ///
    /// Used by the conflict-pair table, which names keyword families
    /// ("paint", "drywall") rather than scope codes.
    pub fn has_keyword(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.keywords.iter().any(|k| k.to_lowercase().contains(&token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drywall_demo_scope() -> WorkScope {
        WorkScope {
            code: "DEMO-DRY".to_string(),
            name: "Drywall demolition".to_string(),
            category: WorkCategory::Demolition,
            measurement_kind: MeasurementKind::Area,
            unit_of_measure: Unit::SquareFeet,
            keywords: vec!["drywall".to_string(), "demo".to_string()],
            material_requirements: vec![],
            labor_requirement: LaborRequirement {
                trade_code: "LAB".to_string(),
                hours_per_unit: 0.02,
                difficulty_factor: 1.0,
            },
            equipment_requirement: None,
        }
    }

    #[test]
    fn test_category_roundtrip() {
        for cat in [
            WorkCategory::Demolition,
            WorkCategory::Installation,
            WorkCategory::Finishing,
            WorkCategory::Mechanical,
            WorkCategory::Electrical,
            WorkCategory::Plumbing,
        ] {
            assert_eq!(WorkCategory::parse(cat.as_str()), Some(cat));
        }
        assert_eq!(WorkCategory::parse("landscaping"), None);
    }

    #[test]
    fn test_has_keyword() {
        let scope = drywall_demo_scope();
        assert!(scope.has_keyword("drywall"));
        assert!(scope.has_keyword("DRYWALL"));
        assert!(!scope.has_keyword("paint"));
    }
}
