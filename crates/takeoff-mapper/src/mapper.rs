//! Scope mapping and quantity aggregation

use crate::config::{MapperConfig, TieBreakPolicy};
use crate::error::MapperError;
use crate::matcher::{KeywordMatcher, ScopeMatcher};
use serde::Serialize;
use takeoff_domain::{
    ItemId, Location, Measurement, QuantificationItem, ScopeCatalog, Unit, WorkCategory, WorkScope,
};
use tracing::{debug, info, warn};

/// Why a scope-description line produced no item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OmissionReason {
    /// No catalog scope scored above zero
    NoScopeMatched,
    /// Two or more scopes tied on the highest score and the policy
    /// requires disambiguation; carries the tied scope codes
    AmbiguousScore(Vec<String>),
}

/// One omitted scope-description line, with its reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingOmission {
    /// The original line
    pub line: String,
    /// Why it was omitted
    pub reason: OmissionReason,
}

/// Output of one mapping pass
#[derive(Debug, Clone, Default)]
pub struct MappingReport {
    /// Quantification items, one per successfully mapped line
    pub items: Vec<QuantificationItem>,
    /// Lines that produced no item, with reasons
    pub omissions: Vec<MappingOmission>,
}

/// Maps scope-description lines onto catalog work scopes
///
/// Generic over the matching strategy; [`KeywordMatcher`] is the default.
#[derive(Debug, Clone)]
pub struct ScopeMapper<M = KeywordMatcher> {
    config: MapperConfig,
    matcher: M,
}

impl ScopeMapper<KeywordMatcher> {
    /// Create a mapper with the default keyword matcher
    pub fn new(config: MapperConfig) -> Result<Self, MapperError> {
        Self::with_matcher(config, KeywordMatcher)
    }
}

impl<M: ScopeMatcher> ScopeMapper<M> {
    /// Create a mapper with a custom matching strategy
    pub fn with_matcher(config: MapperConfig, matcher: M) -> Result<Self, MapperError> {
        config.validate().map_err(MapperError::Config)?;
        Ok(Self { config, matcher })
    }

    /// Map a scope description against the measurement set
    ///
    /// One line per work item. Lines no scope matches, and ambiguous lines
    /// under the disambiguation policy, become omissions in the report;
    /// they never abort the pass.
    pub fn map<C: ScopeCatalog>(
        &self,
        scope_text: &str,
        measurements: &[Measurement],
        catalog: &C,
        now_millis: u64,
    ) -> MappingReport {
        let mut report = MappingReport::default();

        for line in scope_text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let scope = match self.select_scope(line, catalog) {
                Ok(scope) => scope,
                Err(reason) => {
                    warn!(line, ?reason, "scope line omitted");
                    report.omissions.push(MappingOmission {
                        line: line.to_string(),
                        reason,
                    });
                    continue;
                }
            };

            let location = Location::detect(line);
            let (quantity, measurement_ids) =
                self.aggregate(scope, location.as_ref(), measurements);

            let debris_weight = if scope.category == WorkCategory::Demolition {
                Some(quantity * self.config.debris_weight_for(&scope.keywords))
            } else {
                None
            };

            debug!(
                scope_code = %scope.code,
                quantity,
                measurements = measurement_ids.len(),
                location = location.as_ref().map(|l| l.as_str()),
                "mapped scope line"
            );

            report.items.push(QuantificationItem {
                id: ItemId::new(),
                work_scope_code: scope.code.clone(),
                measurement_ids,
                quantity,
                unit: scope.unit_of_measure,
                location,
                debris_weight,
                manual_override: false,
                notes: None,
                updated_at: now_millis,
            });
        }

        info!(
            items = report.items.len(),
            omissions = report.omissions.len(),
            "mapping pass complete"
        );
        report
    }

    /// Recompute an item's quantity from an unchanged measurement set
    ///
    /// Re-derivation is idempotent. A manual override is authoritative: the
    /// stored quantity is left untouched.
    pub fn requantify<C: ScopeCatalog>(
        &self,
        item: &mut QuantificationItem,
        measurements: &[Measurement],
        catalog: &C,
    ) {
        if item.manual_override {
            debug!(item_id = %item.id, "manual override set, skipping requantification");
            return;
        }
        let scope = match catalog.by_code(&item.work_scope_code) {
            Some(scope) => scope,
            None => {
                warn!(
                    item_id = %item.id,
                    scope_code = %item.work_scope_code,
                    "unknown scope code, skipping requantification"
                );
                return;
            }
        };
        let (quantity, measurement_ids) =
            self.aggregate(scope, item.location.as_ref(), measurements);
        item.quantity = quantity;
        item.measurement_ids = measurement_ids;
        if scope.category == WorkCategory::Demolition {
            item.debris_weight = Some(quantity * self.config.debris_weight_for(&scope.keywords));
        }
    }

    /// Score every catalog scope and select the strictly highest score
    fn select_scope<'c, C: ScopeCatalog>(
        &self,
        line: &str,
        catalog: &'c C,
    ) -> Result<&'c WorkScope, OmissionReason> {
        let mut best: u32 = 0;
        let mut tied: Vec<&WorkScope> = Vec::new();

        for scope in catalog.scopes() {
            let score = self.matcher.score(line, scope);
            if score > best {
                best = score;
                tied.clear();
                tied.push(scope);
            } else if score == best && score > 0 {
                tied.push(scope);
            }
        }

        match (best, tied.len()) {
            (0, _) => Err(OmissionReason::NoScopeMatched),
            (_, 1) => Ok(tied[0]),
            _ => match self.config.tie_break {
                // catalog order is load order, earliest entry wins
                TieBreakPolicy::CatalogOrder => Ok(tied[0]),
                TieBreakPolicy::RequireDisambiguation => Err(OmissionReason::AmbiguousScore(
                    tied.iter().map(|s| s.code.clone()).collect(),
                )),
            },
        }
    }

    /// Gather type- and location-matching measurements and sum their
    /// unit-converted values
    fn aggregate(
        &self,
        scope: &WorkScope,
        location: Option<&Location>,
        measurements: &[Measurement],
    ) -> (f64, Vec<takeoff_domain::MeasurementId>) {
        let mut quantity = 0.0;
        let mut ids = Vec::new();

        for m in measurements {
            if m.kind != scope.measurement_kind {
                continue;
            }
            if let Some(hint) = location {
                if m.location.as_ref() != Some(hint) {
                    continue;
                }
            }
            match convert_value(m.value, m.unit, scope.unit_of_measure) {
                Some(value) => {
                    quantity += value;
                    ids.push(m.id);
                }
                None => {
                    warn!(
                        measurement_id = %m.id,
                        from = %m.unit,
                        to = %scope.unit_of_measure,
                        "no unit conversion, measurement excluded"
                    );
                }
            }
        }

        (quantity, ids)
    }
}

/// Convert a measurement value to the scope's unit of measure
///
/// Beyond the general inches↔feet rule, a linear feet value feeding a
/// square-feet scope is squared. That treats the run as one side of a
/// square, a deliberate simplification rather than real geometry.
fn convert_value(value: f64, from: Unit, to: Unit) -> Option<f64> {
    if let Some(converted) = from.convert(value, to) {
        return Some(converted);
    }
    match (from, to) {
        (Unit::Feet, Unit::SquareFeet) => Some(value * value),
        (Unit::Inches, Unit::SquareFeet) => {
            let feet = value / 12.0;
            Some(feet * feet)
        }
        _ => None,
    }
}
