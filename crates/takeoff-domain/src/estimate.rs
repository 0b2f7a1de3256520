//! Estimates, their validation checks and status lifecycle

use crate::ids::EstimateId;
use serde::{Deserialize, Serialize};

/// Result of one validation check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Check passed
    Pass,
    /// Check failed; the estimate cannot reach Final
    Fail,
    /// Check passed with reservations
    Warning,
}

/// One validation check run during finalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationCheck {
    /// Check name (quantity_sanity, price_reasonableness, timeline_feasibility)
    pub name: String,
    /// Outcome
    pub outcome: ValidationOutcome,
    /// Detail message
    pub message: String,
}

/// Estimate lifecycle status
///
/// ```text
/// Draft --(all validations pass)--> Final --(explicit)--> Approved
///                                        \--(explicit)--> Rejected
/// Draft | Final --(now > valid_until)--> Expired
/// ```
/// Approved, Rejected and Expired are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    /// Under construction or failed validation
    Draft,
    /// Validated and ready for a decision
    Final,
    /// Accepted by the customer
    Approved,
    /// Declined by the customer
    Rejected,
    /// Past its valid-until date
    Expired,
}

impl EstimateStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateStatus::Draft => "draft",
            EstimateStatus::Final => "final",
            EstimateStatus::Approved => "approved",
            EstimateStatus::Rejected => "rejected",
            EstimateStatus::Expired => "expired",
        }
    }

    /// Whether no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EstimateStatus::Approved | EstimateStatus::Rejected | EstimateStatus::Expired
        )
    }
}

/// A finalized cost roll-up for one pipeline pass
///
/// Estimates are append-only versioned: a new finalization pass creates a
/// new estimate with a higher `version` that supersedes the prior one; the
/// prior record is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Unique identifier of this version
    pub id: EstimateId,
    /// Monotonic version within the project pass
    pub version: u32,
    /// Sum of all cost items' total cost
    pub direct_costs: f64,
    /// Debris disposal cost
    pub disposal_cost: f64,
    /// Overhead percentage applied
    pub overhead_percentage: f64,
    /// Overhead amount
    pub overhead_amount: f64,
    /// Profit percentage applied
    pub profit_percentage: f64,
    /// Profit amount
    pub profit_amount: f64,
    /// Tax billed on the material base
    pub material_tax: f64,
    /// Tax billed on the labor base
    pub labor_tax: f64,
    /// direct_costs + disposal_cost
    pub subtotal: f64,
    /// subtotal + overhead + profit + taxes
    pub total_estimate: f64,
    /// Lifecycle status
    pub status: EstimateStatus,
    /// True when pricing omissions left items uncosted
    pub incomplete: bool,
    /// Validation checks run at finalization
    pub validation_checks: Vec<ValidationCheck>,
    /// Millisecond timestamp after which the estimate expires
    pub valid_until: u64,
    /// Millisecond creation timestamp
    pub created_at: u64,
}

impl Estimate {
    /// Whether every validation check passed (warnings allowed)
    pub fn validations_pass(&self) -> bool {
        self.validation_checks
            .iter()
            .all(|c| c.outcome != ValidationOutcome::Fail)
    }

    /// Promote Draft → Final
    ///
    /// Fails when the estimate is not Draft or when any validation check
    /// failed; a failed estimate stays Draft.
    pub fn finalize(&mut self) -> Result<(), String> {
        if self.status != EstimateStatus::Draft {
            return Err(format!(
                "cannot finalize an estimate in status {}",
                self.status.as_str()
            ));
        }
        if !self.validations_pass() {
            return Err("estimate has failed validation checks".to_string());
        }
        self.status = EstimateStatus::Final;
        Ok(())
    }

    /// Explicit Final → Approved transition
    pub fn approve(&mut self) -> Result<(), String> {
        if self.status != EstimateStatus::Final {
            return Err(format!(
                "cannot approve an estimate in status {}",
                self.status.as_str()
            ));
        }
        self.status = EstimateStatus::Approved;
        Ok(())
    }

    /// Explicit Final → Rejected transition
    pub fn reject(&mut self) -> Result<(), String> {
        if self.status != EstimateStatus::Final {
            return Err(format!(
                "cannot reject an estimate in status {}",
                self.status.as_str()
            ));
        }
        self.status = EstimateStatus::Rejected;
        Ok(())
    }

    /// Expire any non-terminal estimate whose valid-until date has passed
    ///
    /// Returns true when a transition happened.
    pub fn expire_if_past(&mut self, now_millis: u64) -> bool {
        if !self.status.is_terminal() && now_millis > self.valid_until {
            self.status = EstimateStatus::Expired;
            true
        } else {
            false
        }
    }
}
