//! Pairwise conflict detection over quantification items

use crate::config::ConflictRules;
use serde::Serialize;
use takeoff_domain::{Conflict, ItemId, QuantificationItem, ScopeCatalog};
use tracing::{info, warn};

/// One pair the detector could not evaluate
///
/// Detection errors are non-fatal: the remaining pairs always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionError {
    /// First item of the pair
    pub item_a: ItemId,
    /// Second item of the pair
    pub item_b: ItemId,
    /// What went wrong
    pub message: String,
}

/// Output of one detection pass
#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    /// Detected conflicts, all unresolved
    pub conflicts: Vec<Conflict>,
    /// Pairs that could not be evaluated
    pub detection_errors: Vec<DetectionError>,
}

/// Detects conflicts between quantification items of one project pass
///
/// Exhaustive pairwise comparison. A conflict is raised when two items
/// share a location and a work-scope category and their scopes' keyword
/// sets match an entry of the conflict-pair table. Detection is symmetric;
/// the pair order of the input never changes the outcome.
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    rules: ConflictRules,
}

impl ConflictDetector {
    /// Create a detector with the given conflict-pair table
    pub fn new(rules: ConflictRules) -> Self {
        Self { rules }
    }

    /// Compare every item pair and report conflicts
    pub fn detect<C: ScopeCatalog>(
        &self,
        items: &[QuantificationItem],
        catalog: &C,
    ) -> ConflictReport {
        let mut report = ConflictReport::default();

        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                let a = &items[i];
                let b = &items[j];
                match self.check_pair(a, b, catalog) {
                    Ok(Some(conflict)) => report.conflicts.push(conflict),
                    Ok(None) => {}
                    Err(message) => {
                        warn!(
                            item_a = %a.id,
                            item_b = %b.id,
                            message,
                            "conflict check failed, continuing with remaining pairs"
                        );
                        report.detection_errors.push(DetectionError {
                            item_a: a.id,
                            item_b: b.id,
                            message,
                        });
                    }
                }
            }
        }

        info!(
            items = items.len(),
            conflicts = report.conflicts.len(),
            detection_errors = report.detection_errors.len(),
            "conflict detection complete"
        );
        report
    }

    fn check_pair<C: ScopeCatalog>(
        &self,
        a: &QuantificationItem,
        b: &QuantificationItem,
        catalog: &C,
    ) -> Result<Option<Conflict>, String> {
        let scope_a = catalog
            .by_code(&a.work_scope_code)
            .ok_or_else(|| format!("unknown work scope code '{}'", a.work_scope_code))?;
        let scope_b = catalog
            .by_code(&b.work_scope_code)
            .ok_or_else(|| format!("unknown work scope code '{}'", b.work_scope_code))?;

        // items without a detected location never share one
        let location = match (&a.location, &b.location) {
            (Some(la), Some(lb)) if la == lb => la,
            _ => return Ok(None),
        };
        if scope_a.category != scope_b.category {
            return Ok(None);
        }

        for rule in &self.rules.rules {
            let forward =
                scope_a.has_keyword(&rule.keyword_a) && scope_b.has_keyword(&rule.keyword_b);
            let reverse =
                scope_a.has_keyword(&rule.keyword_b) && scope_b.has_keyword(&rule.keyword_a);
            if forward || reverse {
                return Ok(Some(Conflict::new(
                    a.id,
                    b.id,
                    rule.kind,
                    rule.severity,
                    format!(
                        "{} and {} overlap at {} ({}/{} rule)",
                        scope_a.code, scope_b.code, location, rule.keyword_a, rule.keyword_b
                    ),
                )));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_domain::{
        ConflictKind, ConflictSeverity, LaborRequirement, Location, MeasurementKind,
        StaticCatalog, Unit, WorkCategory, WorkScope,
    };

    fn scope(code: &str, category: WorkCategory, keywords: &[&str]) -> WorkScope {
        WorkScope {
            code: code.to_string(),
            name: code.to_string(),
            category,
            measurement_kind: MeasurementKind::Area,
            unit_of_measure: Unit::SquareFeet,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            material_requirements: vec![],
            labor_requirement: LaborRequirement {
                trade_code: "LAB".to_string(),
                hours_per_unit: 0.02,
                difficulty_factor: 1.0,
            },
            equipment_requirement: None,
        }
    }

    fn item(code: &str, location: Option<&str>) -> QuantificationItem {
        QuantificationItem {
            id: ItemId::new(),
            work_scope_code: code.to_string(),
            measurement_ids: vec![],
            quantity: 100.0,
            unit: Unit::SquareFeet,
            location: location.map(Location::new),
            debris_weight: None,
            manual_override: false,
            notes: None,
            updated_at: 1_000,
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog {
            work_scopes: vec![
                scope("FIN-PAINT", WorkCategory::Finishing, &["paint"]),
                scope("FIN-DRY", WorkCategory::Finishing, &["drywall", "finish"]),
                scope("DEMO-TILE", WorkCategory::Demolition, &["tile"]),
            ],
            ..Default::default()
        }
    }

    fn detector() -> ConflictDetector {
        ConflictDetector::new(ConflictRules::default())
    }

    #[test]
    fn test_paint_drywall_conflict_at_shared_location() {
        let items = vec![
            item("FIN-PAINT", Some("kitchen")),
            item("FIN-DRY", Some("kitchen")),
        ];
        let report = detector().detect(&items, &catalog());
        assert_eq!(report.conflicts.len(), 1);
        let c = &report.conflicts[0];
        assert_eq!(c.kind, ConflictKind::Material);
        assert_eq!(c.severity, ConflictSeverity::Warning);
        assert!(!c.resolved);
    }

    #[test]
    fn test_detection_is_symmetric() {
        let a = item("FIN-PAINT", Some("kitchen"));
        let b = item("FIN-DRY", Some("kitchen"));

        let forward = detector().detect(&[a.clone(), b.clone()], &catalog());
        let reverse = detector().detect(&[b, a], &catalog());
        assert_eq!(forward.conflicts.len(), 1);
        assert_eq!(reverse.conflicts.len(), 1);
        // canonical pair order makes the records identical apart from text
        assert_eq!(forward.conflicts[0].item_a, reverse.conflicts[0].item_a);
        assert_eq!(forward.conflicts[0].item_b, reverse.conflicts[0].item_b);
    }

    #[test]
    fn test_different_location_is_not_a_conflict() {
        let items = vec![
            item("FIN-PAINT", Some("kitchen")),
            item("FIN-DRY", Some("bathroom")),
        ];
        assert!(detector().detect(&items, &catalog()).conflicts.is_empty());
    }

    #[test]
    fn test_missing_location_is_not_a_conflict() {
        let items = vec![item("FIN-PAINT", None), item("FIN-DRY", None)];
        assert!(detector().detect(&items, &catalog()).conflicts.is_empty());
    }

    #[test]
    fn test_different_category_is_not_a_conflict() {
        // tile rule exists, but demolition vs finishing never pairs
        let items = vec![
            item("DEMO-TILE", Some("kitchen")),
            item("FIN-DRY", Some("kitchen")),
        ];
        assert!(detector().detect(&items, &catalog()).conflicts.is_empty());
    }

    #[test]
    fn test_unknown_scope_records_error_and_completes() {
        let items = vec![
            item("GHOST", Some("kitchen")),
            item("FIN-PAINT", Some("kitchen")),
            item("FIN-DRY", Some("kitchen")),
        ];
        let report = detector().detect(&items, &catalog());
        // both GHOST pairs fail, the paint/drywall pair still completes
        assert_eq!(report.detection_errors.len(), 2);
        assert_eq!(report.conflicts.len(), 1);
    }
}
