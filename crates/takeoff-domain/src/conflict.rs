//! Conflicts between quantification items

use crate::ids::ItemId;
use serde::{Deserialize, Serialize};

/// What kind of disagreement a conflict expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Two scopes would put incompatible materials in the same place
    Material,
    /// Two scopes describe overlapping work
    ScopeOverlap,
}

/// How serious a conflict is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    /// Needs an explicit resolution decision
    Error,
    /// Should be reviewed
    Warning,
    /// Informational only
    Info,
}

/// A detected conflict between two quantification items
///
/// The relation is symmetric: the pair is stored in canonical (sorted id)
/// order so `conflict(a, b)` and `conflict(b, a)` are the same record.
/// Resolution is a one-way transition carrying notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// First item of the unordered pair (smaller id)
    pub item_a: ItemId,
    /// Second item of the unordered pair (larger id)
    pub item_b: ItemId,
    /// Kind of conflict
    pub kind: ConflictKind,
    /// Severity
    pub severity: ConflictSeverity,
    /// Human-readable description
    pub message: String,
    /// Whether the conflict has been explicitly resolved
    pub resolved: bool,
    /// Notes recorded at resolution time
    pub resolution_notes: Option<String>,
}

impl Conflict {
    /// Create a new unresolved conflict, canonicalizing the pair order
    pub fn new(
        a: ItemId,
        b: ItemId,
        kind: ConflictKind,
        severity: ConflictSeverity,
        message: impl Into<String>,
    ) -> Self {
        let (item_a, item_b) = if a <= b { (a, b) } else { (b, a) };
        Self {
            item_a,
            item_b,
            kind,
            severity,
            message: message.into(),
            resolved: false,
            resolution_notes: None,
        }
    }

    /// Whether this conflict involves the given pair, in either order
    pub fn involves(&self, a: ItemId, b: ItemId) -> bool {
        let (x, y) = if a <= b { (a, b) } else { (b, a) };
        self.item_a == x && self.item_b == y
    }

    /// Mark the conflict resolved with the given notes
    ///
    /// The transition is one-way; resolving an already-resolved conflict is
    /// an error and leaves the original notes intact.
    pub fn resolve(&mut self, notes: impl Into<String>) -> Result<(), String> {
        if self.resolved {
            return Err("conflict is already resolved".to_string());
        }
        self.resolved = true;
        self.resolution_notes = Some(notes.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_canonical() {
        let a = ItemId::from_value(1);
        let b = ItemId::from_value(2);
        let c1 = Conflict::new(a, b, ConflictKind::Material, ConflictSeverity::Warning, "x");
        let c2 = Conflict::new(b, a, ConflictKind::Material, ConflictSeverity::Warning, "x");
        assert_eq!(c1.item_a, c2.item_a);
        assert_eq!(c1.item_b, c2.item_b);
        assert!(c1.involves(a, b));
        assert!(c1.involves(b, a));
    }

    #[test]
    fn test_resolution_is_one_way() {
        let mut c = Conflict::new(
            ItemId::from_value(1),
            ItemId::from_value(2),
            ConflictKind::Material,
            ConflictSeverity::Error,
            "paint over demolished drywall",
        );
        c.resolve("re-sequenced: drywall first").unwrap();
        assert!(c.resolved);
        assert!(c.resolve("second attempt").is_err());
        assert_eq!(
            c.resolution_notes.as_deref(),
            Some("re-sequenced: drywall first")
        );
    }
}
