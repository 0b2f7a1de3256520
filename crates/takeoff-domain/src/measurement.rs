//! Measurements and the OCR fragments they come from

use crate::geometry::BoundingBox;
use crate::ids::{FragmentId, MeasurementId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One OCR-recognized text span with confidence and geometry
///
/// This is the extractor's input shape, delivered already deserialized by
/// the OCR collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Fragment identifier, stable across the batch
    pub id: FragmentId,
    /// Recognized text
    pub text: String,
    /// OCR confidence in [0, 1]
    pub confidence: f64,
    /// Recognition polygon, 4+ points
    pub polygon: Vec<(f64, f64)>,
    /// Identifier of the source image
    pub source_image_id: String,
}

/// Kind of quantity a measurement expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// One-dimensional run (wall length, trim run)
    Linear,
    /// Two-dimensional surface (floor, wall face)
    Area,
    /// Three-dimensional volume
    Volume,
    /// Discrete count (fixtures, doors)
    Count,
}

impl MeasurementKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKind::Linear => "linear",
            MeasurementKind::Area => "area",
            MeasurementKind::Volume => "volume",
            MeasurementKind::Count => "count",
        }
    }

    /// Parse a kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linear" => Some(MeasurementKind::Linear),
            "area" => Some(MeasurementKind::Area),
            "volume" => Some(MeasurementKind::Volume),
            "count" => Some(MeasurementKind::Count),
            _ => None,
        }
    }
}

/// Unit of measure, closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Linear feet
    Feet,
    /// Linear inches
    Inches,
    /// Square feet
    SquareFeet,
    /// Cubic feet
    CubicFeet,
    /// Discrete each
    Each,
}

impl Unit {
    /// Get the unit name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Feet => "ft",
            Unit::Inches => "in",
            Unit::SquareFeet => "sq_ft",
            Unit::CubicFeet => "cu_ft",
            Unit::Each => "ea",
        }
    }

    /// Parse a unit from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ft" | "feet" | "lf" => Some(Unit::Feet),
            "in" | "inches" => Some(Unit::Inches),
            "sq_ft" | "sqft" | "sf" => Some(Unit::SquareFeet),
            "cu_ft" | "cuft" | "cf" => Some(Unit::CubicFeet),
            "ea" | "each" => Some(Unit::Each),
            _ => None,
        }
    }

    /// Convert a value in this unit to the target unit
    ///
    /// Only inches→feet (÷12) and feet→feet style identities are defined;
    /// a linear value feeding an area scope is handled by the mapper's
    /// square assumption, not here. Returns `None` for undefined pairs.
    pub fn convert(&self, value: f64, target: Unit) -> Option<f64> {
        if *self == target {
            return Some(value);
        }
        match (self, target) {
            (Unit::Inches, Unit::Feet) => Some(value / 12.0),
            (Unit::Feet, Unit::Inches) => Some(value * 12.0),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Room location token detected in a scope line or measurement context
///
/// Locations are compared case-insensitively; the canonical form is
/// lowercase with single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

/// Fixed room-keyword list used for location detection
pub const ROOM_KEYWORDS: &[&str] = &[
    "kitchen",
    "bathroom",
    "bedroom",
    "living room",
    "dining room",
    "basement",
    "garage",
    "hallway",
    "closet",
    "laundry",
    "office",
];

impl Location {
    /// Create a location from a raw token, normalizing case and whitespace
    pub fn new(token: impl AsRef<str>) -> Self {
        let normalized = token
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        Self(normalized)
    }

    /// Detect the first room keyword present in free text, if any
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        ROOM_KEYWORDS
            .iter()
            .find(|kw| lower.contains(*kw))
            .map(|kw| Self((*kw).to_string()))
    }

    /// Canonical lowercase form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed measurement recovered from one OCR fragment
///
/// Measurements are immutable once created; only the extractor produces
/// them. Source text and geometry are retained for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Unique identifier
    pub id: MeasurementId,
    /// Kind of quantity
    pub kind: MeasurementKind,
    /// Numeric value in `unit`
    pub value: f64,
    /// Unit of measure
    pub unit: Unit,
    /// Confidence inherited from the OCR fragment, [0, 1]
    pub confidence: f64,
    /// Room location when one could be detected
    pub location: Option<Location>,
    /// Originating fragment text
    pub source_text: String,
    /// Axis-aligned bounds of the originating fragment
    pub bounding_box: BoundingBox,
    /// Identifier of the originating fragment
    pub source_fragment_id: FragmentId,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: inches→feet→inches round-trips within float tolerance
        #[test]
        fn test_unit_conversion_roundtrip(value in 0.0f64..1e6) {
            let feet = Unit::Inches.convert(value, Unit::Feet).unwrap();
            let back = Unit::Feet.convert(feet, Unit::Inches).unwrap();
            prop_assert!((back - value).abs() < 1e-6);
        }
    }
}
