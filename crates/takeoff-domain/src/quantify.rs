//! Quantification items - work scopes sized by aggregated measurements

use crate::ids::{ItemId, MeasurementId};
use crate::measurement::{Location, Unit};
use serde::{Deserialize, Serialize};

/// A work scope instance sized for a specific location
///
/// Created by the mapper. The measurement list records provenance; when
/// `manual_override` is set the stored quantity is authoritative and the
/// list is retained for audit only, never re-summed.
///
/// Mutation (override, notes) is single-writer per item: callers pass the
/// `updated_at` they last observed and the write fails when it is stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantificationItem {
    /// Unique identifier
    pub id: ItemId,
    /// Catalog code of the matched work scope
    pub work_scope_code: String,
    /// Measurements this quantity was derived from
    pub measurement_ids: Vec<MeasurementId>,
    /// Aggregated quantity in `unit`
    pub quantity: f64,
    /// Unit of the quantity
    pub unit: Unit,
    /// Location hint from the scope line, when detected
    pub location: Option<Location>,
    /// Estimated demolition debris in pounds (demolition scopes only)
    pub debris_weight: Option<f64>,
    /// When set, `quantity` was supplied externally and is never recomputed
    pub manual_override: bool,
    /// Free-form notes
    pub notes: Option<String>,
    /// Last-write timestamp (milliseconds since Unix epoch), CAS token
    pub updated_at: u64,
}

impl QuantificationItem {
    /// Apply a manual quantity override under optimistic concurrency
    ///
    /// `expected_updated_at` must equal the item's current `updated_at`;
    /// otherwise the write is stale and `Err` carries the current value so
    /// the caller can re-read and retry.
    pub fn apply_override(
        &mut self,
        expected_updated_at: u64,
        quantity: f64,
        notes: Option<String>,
        now_millis: u64,
    ) -> Result<(), u64> {
        if self.updated_at != expected_updated_at {
            return Err(self.updated_at);
        }
        self.quantity = quantity;
        self.manual_override = true;
        if notes.is_some() {
            self.notes = notes;
        }
        self.updated_at = now_millis;
        Ok(())
    }

    /// Update notes only, under the same optimistic discipline
    pub fn apply_notes(
        &mut self,
        expected_updated_at: u64,
        notes: String,
        now_millis: u64,
    ) -> Result<(), u64> {
        if self.updated_at != expected_updated_at {
            return Err(self.updated_at);
        }
        self.notes = Some(notes);
        self.updated_at = now_millis;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> QuantificationItem {
        QuantificationItem {
            id: ItemId::new(),
            work_scope_code: "DEMO-DRY".to_string(),
            measurement_ids: vec![MeasurementId::new()],
            quantity: 120.0,
            unit: Unit::SquareFeet,
            location: Some(Location::new("kitchen")),
            debris_weight: Some(300.0),
            manual_override: false,
            notes: None,
            updated_at: 1_000,
        }
    }

    #[test]
    fn test_override_succeeds_when_fresh() {
        let mut it = item();
        it.apply_override(1_000, 150.0, Some("field verified".to_string()), 2_000)
            .unwrap();
        assert_eq!(it.quantity, 150.0);
        assert!(it.manual_override);
        assert_eq!(it.updated_at, 2_000);
        // audit trail is retained
        assert_eq!(it.measurement_ids.len(), 1);
    }

    #[test]
    fn test_override_fails_when_stale() {
        let mut it = item();
        it.apply_override(1_000, 150.0, None, 2_000).unwrap();

        // A second writer holding the old timestamp must fail and learn the
        // current one.
        let err = it.apply_override(1_000, 99.0, None, 3_000).unwrap_err();
        assert_eq!(err, 2_000);
        assert_eq!(it.quantity, 150.0);
    }

    #[test]
    fn test_notes_cas() {
        let mut it = item();
        it.apply_notes(1_000, "check tile under vinyl".to_string(), 2_000)
            .unwrap();
        assert!(it.apply_notes(1_000, "stale".to_string(), 3_000).is_err());
        assert_eq!(it.notes.as_deref(), Some("check tile under vinyl"));
    }
}
