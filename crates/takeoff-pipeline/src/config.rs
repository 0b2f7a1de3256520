//! Aggregate configuration for a pipeline run

use serde::{Deserialize, Serialize};
use takeoff_costing::CostingConfig;
use takeoff_estimate::EstimateConfig;
use takeoff_extractor::ExtractorConfig;
use takeoff_mapper::{ConflictRules, MapperConfig};
use takeoff_schedule::ScheduleConfig;

/// Configuration for the whole pipeline, one section per stage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Extraction worker pool size
    pub worker_count: usize,

    /// Extractor settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Mapper settings
    #[serde(default)]
    pub mapper: MapperConfig,

    /// Conflict-pair table
    #[serde(default)]
    pub conflict_rules: ConflictRules,

    /// Costing settings
    #[serde(default)]
    pub costing: CostingConfig,

    /// Scheduling settings
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Finalization settings
    #[serde(default)]
    pub estimate: EstimateConfig,
}

impl PipelineConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == 0 {
            return Err("worker_count must be greater than 0".to_string());
        }
        self.extractor.validate()?;
        self.mapper.validate()?;
        self.costing.validate()?;
        self.schedule.validate()?;
        self.estimate.validate()?;
        Ok(())
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

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            extractor: ExtractorConfig::default(),
            mapper: MapperConfig::default(),
            conflict_rules: ConflictRules::default(),
            costing: CostingConfig::default(),
            schedule: ScheduleConfig::default(),
            estimate: EstimateConfig::default(),
        }
    }
}
