//! Cost aggregation over quantification items

use crate::config::CostingConfig;
use crate::error::CostingError;
use serde::Serialize;
use takeoff_domain::{
    CostItem, CostItemId, ItemId, MaterialCost, PricingCatalog, QuantificationItem, ScopeCatalog,
    WorkScope,
};
use tracing::{debug, info, warn};

/// Quantity above which the markup is scaled down
const HIGH_QUANTITY_THRESHOLD: f64 = 1000.0;
/// Quantity below which the markup is scaled up
const LOW_QUANTITY_THRESHOLD: f64 = 50.0;
const HIGH_QUANTITY_SCALE: f64 = 0.9;
const LOW_QUANTITY_SCALE: f64 = 1.1;

/// One item that could not be priced, with the missing datum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingOmission {
    /// The unpriced item
    pub item_id: ItemId,
    /// What was missing
    pub message: String,
}

/// Output of one costing pass
///
/// A non-empty omission list flags the eventual estimate as incomplete.
#[derive(Debug, Clone, Default)]
pub struct CostingReport {
    /// Priced items
    pub cost_items: Vec<CostItem>,
    /// Items omitted for missing pricing data
    pub omissions: Vec<PricingOmission>,
}

/// Prices quantification items against injected catalogs
#[derive(Debug, Clone)]
pub struct CostAggregator {
    config: CostingConfig,
}

impl CostAggregator {
    /// Create an aggregator with the given configuration
    pub fn new(config: CostingConfig) -> Result<Self, CostingError> {
        config.validate().map_err(CostingError::Config)?;
        Ok(Self { config })
    }

    /// Price every quantification item
    ///
    /// Items whose scope, material, trade or equipment codes cannot be
    /// resolved are omitted and recorded; the remaining items are still
    /// priced.
    pub fn price<S: ScopeCatalog, P: PricingCatalog>(
        &self,
        items: &[QuantificationItem],
        scopes: &S,
        pricing: &P,
    ) -> CostingReport {
        let mut report = CostingReport::default();

        for item in items {
            match self.price_item(item, scopes, pricing) {
                Ok(cost_item) => report.cost_items.push(cost_item),
                Err(message) => {
                    warn!(item_id = %item.id, message, "item omitted from costing");
                    report.omissions.push(PricingOmission {
                        item_id: item.id,
                        message,
                    });
                }
            }
        }

        info!(
            items = items.len(),
            priced = report.cost_items.len(),
            omissions = report.omissions.len(),
            "costing pass complete"
        );
        report
    }

    fn price_item<S: ScopeCatalog, P: PricingCatalog>(
        &self,
        item: &QuantificationItem,
        scopes: &S,
        pricing: &P,
    ) -> Result<CostItem, String> {
        let scope = scopes
            .by_code(&item.work_scope_code)
            .ok_or_else(|| format!("unknown work scope code '{}'", item.work_scope_code))?;

        let mut material_costs = Vec::with_capacity(scope.material_requirements.len());
        for req in &scope.material_requirements {
            let material = pricing
                .material(&req.material_code)
                .ok_or_else(|| format!("unknown material code '{}'", req.material_code))?;
            let quantity = req.quantity_per_unit * item.quantity * self.config.waste_factor;
            let cost = quantity * material.regional_unit_cost(&self.config.region);
            material_costs.push(MaterialCost {
                material_code: req.material_code.clone(),
                quantity,
                cost,
            });
        }

        let labor = &scope.labor_requirement;
        let rate = pricing
            .labor_rate(&labor.trade_code)
            .ok_or_else(|| format!("unknown labor trade code '{}'", labor.trade_code))?;
        let labor_cost = labor.hours_per_unit
            * item.quantity
            * labor.difficulty_factor
            * rate.regional_hourly_rate(&self.config.region);

        let equipment_cost = match &scope.equipment_requirement {
            Some(req) => {
                let equipment = pricing
                    .equipment(&req.equipment_code)
                    .ok_or_else(|| format!("unknown equipment code '{}'", req.equipment_code))?;
                if req.productivity_rate <= 0.0 {
                    return Err(format!(
                        "non-positive productivity rate for equipment '{}'",
                        req.equipment_code
                    ));
                }
                let days = (item.quantity / req.productivity_rate).ceil().max(1.0);
                Some(days * equipment.daily_rate)
            }
            None => None,
        };

        let material_total: f64 = material_costs.iter().map(|m| m.cost).sum();
        let subtotal = material_total + labor_cost + equipment_cost.unwrap_or(0.0);
        let markup_percentage = self.markup_for(scope, item.quantity);
        let total_cost = subtotal * (1.0 + markup_percentage / 100.0);

        debug!(
            item_id = %item.id,
            scope_code = %scope.code,
            subtotal,
            markup_percentage,
            total_cost,
            "priced item"
        );

        Ok(CostItem {
            id: CostItemId::new(),
            item_id: item.id,
            work_scope_code: scope.code.clone(),
            material_costs,
            labor_cost,
            equipment_cost,
            subtotal,
            markup_percentage,
            total_cost,
        })
    }

    /// Category markup, scaled for quantity
    ///
    /// Large quantities earn a discount, small ones a surcharge.
    fn markup_for(&self, scope: &WorkScope, quantity: f64) -> f64 {
        let base = self.config.markup.for_category(scope.category);
        if quantity > HIGH_QUANTITY_THRESHOLD {
            base * HIGH_QUANTITY_SCALE
        } else if quantity < LOW_QUANTITY_THRESHOLD {
            base * LOW_QUANTITY_SCALE
        } else {
            base
        }
    }
}
