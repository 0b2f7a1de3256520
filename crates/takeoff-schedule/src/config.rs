//! Schedule configuration and the external task plan

use serde::{Deserialize, Serialize};

/// Configuration for the timeline builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Buffer applied on top of the critical path, as a fraction
    pub buffer_percentage: f64,
}

impl ScheduleConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.buffer_percentage < 0.0 {
            return Err("buffer_percentage must be non-negative".to_string());
        }
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

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            buffer_percentage: 0.15,
        }
    }
}

/// Externally estimated scheduling data for one work scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedTask {
    /// Work scope code this entry schedules
    pub work_scope_code: String,
    /// Estimated duration in days
    pub duration_days: f64,
    /// Work scope codes that must finish first
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Whether the task may run alongside others
    #[serde(default = "default_can_parallel")]
    pub can_parallel: bool,
    /// Crew size behind the duration estimate
    #[serde(default = "default_crew_size")]
    pub crew_size: u32,
}

fn default_can_parallel() -> bool {
    true
}

fn default_crew_size() -> u32 {
    2
}

/// The external task plan, keyed by work-scope code
///
/// Supplied by the scheduling collaborator; the plan may cover more scopes
/// than any one batch uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    /// Planned tasks
    #[serde(default)]
    pub tasks: Vec<PlannedTask>,
}

impl TaskPlan {
    /// Look up the plan entry for a work scope
    pub fn by_code(&self, work_scope_code: &str) -> Option<&PlannedTask> {
        self.tasks
            .iter()
            .find(|t| t.work_scope_code == work_scope_code)
    }

    /// Load a plan from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize the plan to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
