//! Estimate roll-up, validation and lifecycle promotion

use crate::config::{EstimateConfig, TaxResponsibility};
use crate::error::EstimateError;
use takeoff_domain::{
    CostItem, Estimate, EstimateId, QuantificationItem, Timeline, ValidationCheck,
    ValidationOutcome,
};
use tracing::{debug, info, warn};

const MILLIS_PER_DAY: u64 = 86_400_000;

/// Rolls cost items into a versioned, validated estimate
#[derive(Debug, Clone)]
pub struct EstimateFinalizer {
    config: EstimateConfig,
}

impl EstimateFinalizer {
    /// Create a finalizer with the given configuration
    pub fn new(config: EstimateConfig) -> Result<Self, EstimateError> {
        config.validate().map_err(EstimateError::Config)?;
        Ok(Self { config })
    }

    /// Build the estimate for one pipeline pass and attempt promotion
    ///
    /// Always produces an estimate. Validation checks run on every pass;
    /// when all of them pass the estimate is promoted Draft → Final,
    /// otherwise it stays Draft. `incomplete` is set by the caller when
    /// pricing omissions left items uncosted. Each pass gets a fresh
    /// version; earlier versions are never mutated.
    pub fn finalize(
        &self,
        items: &[QuantificationItem],
        cost_items: &[CostItem],
        timeline: &Timeline,
        incomplete: bool,
        version: u32,
        now_millis: u64,
    ) -> Estimate {
        let direct_costs: f64 = cost_items.iter().map(|c| c.total_cost).sum();

        let debris_lbs: f64 = items.iter().filter_map(|i| i.debris_weight).sum();
        let disposal_cost = self.disposal_cost(debris_lbs);

        let base = direct_costs + disposal_cost;
        let overhead_amount = base * self.config.overhead_percentage / 100.0;
        let profit_amount = base * self.config.profit_percentage / 100.0;

        let material_base: f64 = cost_items.iter().map(|c| c.material_total()).sum();
        let labor_base: f64 = cost_items.iter().map(|c| c.labor_cost).sum();
        let material_tax = material_base * self.config.tax.material_rate / 100.0;
        let labor_tax = match self.config.tax.responsibility {
            TaxResponsibility::Customer => labor_base * self.config.tax.labor_rate / 100.0,
            // absorbed by the contractor, never billed
            TaxResponsibility::Contractor => 0.0,
        };
        let subtotal = direct_costs + disposal_cost;
        let total_estimate = subtotal + overhead_amount + profit_amount + material_tax + labor_tax;

        let validation_checks = self.run_checks(items, cost_items, timeline);

        let mut estimate = Estimate {
            id: EstimateId::new(),
            version,
            direct_costs,
            disposal_cost,
            overhead_percentage: self.config.overhead_percentage,
            overhead_amount,
            profit_percentage: self.config.profit_percentage,
            profit_amount,
            material_tax,
            labor_tax,
            subtotal,
            total_estimate,
            status: takeoff_domain::EstimateStatus::Draft,
            incomplete,
            validation_checks,
            valid_until: now_millis + u64::from(self.config.validity_days) * MILLIS_PER_DAY,
            created_at: now_millis,
        };

        match estimate.finalize() {
            Ok(()) => info!(
                estimate_id = %estimate.id,
                version,
                total_estimate,
                "estimate finalized"
            ),
            Err(reason) => warn!(
                estimate_id = %estimate.id,
                version,
                reason,
                "estimate stays in draft"
            ),
        }
        estimate
    }

    /// Container loads for the configured method
    ///
    /// Zero debris means zero loads; any positive weight books at least
    /// one load.
    fn disposal_cost(&self, debris_lbs: f64) -> f64 {
        if debris_lbs <= 0.0 {
            return 0.0;
        }
        let rates = self.config.disposal.rates();
        let loads = (debris_lbs / rates.capacity_lbs).ceil().max(1.0);
        debug!(debris_lbs, loads, method = ?self.config.disposal.method, "disposal sized");
        loads * rates.cost_per_load
    }

    fn run_checks(
        &self,
        items: &[QuantificationItem],
        cost_items: &[CostItem],
        timeline: &Timeline,
    ) -> Vec<ValidationCheck> {
        let mut checks = Vec::with_capacity(3);

        let zero_quantity: Vec<&str> = items
            .iter()
            .filter(|i| i.quantity <= 0.0)
            .map(|i| i.work_scope_code.as_str())
            .collect();
        checks.push(if zero_quantity.is_empty() {
            ValidationCheck {
                name: "quantity_sanity".to_string(),
                outcome: ValidationOutcome::Pass,
                message: format!("{} items with positive quantity", items.len()),
            }
        } else {
            ValidationCheck {
                name: "quantity_sanity".to_string(),
                outcome: ValidationOutcome::Fail,
                message: format!("non-positive quantity for: {}", zero_quantity.join(", ")),
            }
        });

        // out-of-band pricing is worth a look, not a blocker
        let mut out_of_band = Vec::new();
        for cost_item in cost_items {
            let quantity = items
                .iter()
                .find(|i| i.id == cost_item.item_id)
                .map(|i| i.quantity)
                .unwrap_or(0.0);
            if quantity <= 0.0 {
                continue;
            }
            let per_unit = cost_item.total_cost / quantity;
            if per_unit < self.config.price_band.min_per_unit
                || per_unit > self.config.price_band.max_per_unit
            {
                out_of_band.push(format!("{} at {:.2}/unit", cost_item.work_scope_code, per_unit));
            }
        }
        checks.push(if out_of_band.is_empty() {
            ValidationCheck {
                name: "price_reasonableness".to_string(),
                outcome: ValidationOutcome::Pass,
                message: "all cost items within the expected band".to_string(),
            }
        } else {
            ValidationCheck {
                name: "price_reasonableness".to_string(),
                outcome: ValidationOutcome::Warning,
                message: format!("outside expected band: {}", out_of_band.join(", ")),
            }
        });

        checks.push(
            if timeline.total_duration_days <= self.config.max_duration_days {
                ValidationCheck {
                    name: "timeline_feasibility".to_string(),
                    outcome: ValidationOutcome::Pass,
                    message: format!("{:.1} days within bound", timeline.total_duration_days),
                }
            } else {
                ValidationCheck {
                    name: "timeline_feasibility".to_string(),
                    outcome: ValidationOutcome::Fail,
                    message: format!(
                        "{:.1} days exceeds the {:.1} day bound",
                        timeline.total_duration_days, self.config.max_duration_days
                    ),
                }
            },
        );

        checks
    }
}
