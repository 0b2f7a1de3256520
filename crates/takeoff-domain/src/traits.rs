//! Trait definitions for catalog access
//!
//! Catalogs are owned by an external collaborator and read-only during a
//! pipeline run. Stages receive providers as explicit arguments; nothing in
//! the pipeline reaches into global state.

use crate::pricing::{EquipmentRate, LaborRate, Material};
use crate::scope::WorkScope;

/// Read access to the work-scope catalog
pub trait ScopeCatalog {
    /// All scopes in catalog order
    ///
    /// Catalog order is load order and is significant: the mapper's
    /// catalog-order tie-break policy selects the earliest entry.
    fn scopes(&self) -> &[WorkScope];

    /// Look up a scope by its unique code
    fn by_code(&self, code: &str) -> Option<&WorkScope> {
        self.scopes().iter().find(|s| s.code == code)
    }
}

/// Read access to the pricing catalogs
pub trait PricingCatalog {
    /// Look up a material by code
    fn material(&self, code: &str) -> Option<&Material>;

    /// Look up a labor rate by trade code
    fn labor_rate(&self, trade_code: &str) -> Option<&LaborRate>;

    /// Look up an equipment rate by code
    fn equipment(&self, code: &str) -> Option<&EquipmentRate>;
}

/// In-memory catalog backed by plain vectors
///
/// The pipeline's own tests and the CLI load catalogs from files into this
/// structure; a persistence-backed provider would implement the same traits.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct StaticCatalog {
    /// Work scopes in catalog order
    #[serde(default)]
    pub work_scopes: Vec<WorkScope>,
    /// Materials
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Labor rates
    #[serde(default)]
    pub labor_rates: Vec<LaborRate>,
    /// Equipment rates
    #[serde(default)]
    pub equipment_rates: Vec<EquipmentRate>,
}

impl ScopeCatalog for StaticCatalog {
    fn scopes(&self) -> &[WorkScope] {
        &self.work_scopes
    }
}

impl PricingCatalog for StaticCatalog {
    fn material(&self, code: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.code == code)
    }

    fn labor_rate(&self, trade_code: &str) -> Option<&LaborRate> {
        self.labor_rates.iter().find(|r| r.trade_code == trade_code)
    }

    fn equipment(&self, code: &str) -> Option<&EquipmentRate> {
        self.equipment_rates.iter().find(|e| e.code == code)
    }
}
