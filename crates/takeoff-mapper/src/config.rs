//! Configuration for mapping and conflict detection

use serde::{Deserialize, Serialize};
use takeoff_domain::{ConflictKind, ConflictSeverity};

/// How to resolve an equal, non-zero keyword score between scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    /// Select the earliest tied scope in catalog order
    CatalogOrder,
    /// Omit the line and surface a warning naming the tied scopes
    RequireDisambiguation,
}

impl Default for TieBreakPolicy {
    fn default() -> Self {
        TieBreakPolicy::RequireDisambiguation
    }
}

/// One entry of the debris weight-factor table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisWeightRule {
    /// Keyword to match against a demolition scope's keyword list
    pub keyword: String,
    /// Pounds of debris per quantity unit
    pub pounds_per_unit: f64,
}

/// Configuration for the scope mapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Tie-break policy between equally-scored scopes
    pub tie_break: TieBreakPolicy,

    /// Debris weight factors for demolition scopes, first match wins
    pub debris_weights: Vec<DebrisWeightRule>,

    /// Weight factor when no table entry matches, lb per unit
    pub default_debris_weight: f64,
}

impl MapperConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_debris_weight < 0.0 {
            return Err("default_debris_weight must be non-negative".to_string());
        }
        for rule in &self.debris_weights {
            if rule.keyword.is_empty() {
                return Err("debris weight rule keyword must not be empty".to_string());
            }
            if rule.pounds_per_unit < 0.0 {
                return Err(format!(
                    "debris weight for '{}' must be non-negative",
                    rule.keyword
                ));
            }
        }
        Ok(())
    }

    /// Look up the weight factor for a scope's keyword list, first match wins
    pub fn debris_weight_for(&self, scope_keywords: &[String]) -> f64 {
        self.debris_weights
            .iter()
            .find(|rule| {
                scope_keywords
                    .iter()
                    .any(|kw| kw.to_lowercase().contains(&rule.keyword.to_lowercase()))
            })
            .map(|rule| rule.pounds_per_unit)
            .unwrap_or(self.default_debris_weight)
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

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreakPolicy::default(),
            debris_weights: vec![
                DebrisWeightRule {
                    keyword: "drywall".to_string(),
                    pounds_per_unit: 2.5,
                },
                DebrisWeightRule {
                    keyword: "flooring".to_string(),
                    pounds_per_unit: 1.5,
                },
                DebrisWeightRule {
                    keyword: "tile".to_string(),
                    pounds_per_unit: 4.0,
                },
                DebrisWeightRule {
                    keyword: "trim".to_string(),
                    pounds_per_unit: 1.0,
                },
            ],
            default_debris_weight: 2.0,
        }
    }
}

/// One entry of the conflict-pair table
///
/// A pair of items triggers this rule when one item's scope keywords
/// contain `keyword_a` and the other's contain `keyword_b`, in either
/// orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRule {
    /// First keyword of the pair
    pub keyword_a: String,
    /// Second keyword of the pair
    pub keyword_b: String,
    /// Kind of conflict the pair signals
    pub kind: ConflictKind,
    /// Severity to raise
    pub severity: ConflictSeverity,
}

/// The conflict-pair table
///
/// Conflict rules evolve independently of the detection algorithm, so the
/// table is a versioned configuration resource rather than an in-code
/// constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRules {
    /// Table version, bumped when rules change
    pub version: u32,
    /// The rules
    pub rules: Vec<ConflictRule>,
}

impl ConflictRules {
    /// Load rules from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize rules to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ConflictRules {
    fn default() -> Self {
        Self {
            version: 1,
            rules: vec![
                ConflictRule {
                    keyword_a: "paint".to_string(),
                    keyword_b: "drywall".to_string(),
                    kind: ConflictKind::Material,
                    severity: ConflictSeverity::Warning,
                },
                ConflictRule {
                    keyword_a: "flooring".to_string(),
                    keyword_b: "tile".to_string(),
                    kind: ConflictKind::ScopeOverlap,
                    severity: ConflictSeverity::Warning,
                },
            ],
        }
    }
}
