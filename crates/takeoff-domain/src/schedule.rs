//! Schedule tasks and the project timeline

use crate::ids::TaskId;
use serde::{Deserialize, Serialize};

/// One schedulable unit of work, derived from a cost item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Work scope code this task executes
    pub work_scope_code: String,
    /// Externally estimated duration in days
    pub duration_days: f64,
    /// Tasks that must finish before this one starts
    pub dependencies: Vec<TaskId>,
    /// Whether the task may run alongside others
    pub can_parallel: bool,
    /// Crew size assumption behind the duration estimate
    pub crew_size: u32,
}

/// Dependency-resolved schedule with critical path
///
/// Invariant: the task dependency graph is acyclic; the builder refuses to
/// construct a timeline otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// All tasks
    pub tasks: Vec<Task>,
    /// Task ids on the longest dependency chain, in execution order
    pub critical_path: Vec<TaskId>,
    /// Critical path length with buffer applied
    pub total_duration_days: f64,
    /// Buffer applied on top of the critical path
    pub buffer_percentage: f64,
}

impl Timeline {
    /// Raw critical-path length in days, before buffer
    pub fn critical_path_days(&self) -> f64 {
        self.total_duration_days / (1.0 + self.buffer_percentage)
    }

    /// Look up a task by id
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_path_days_inverts_buffer() {
        let timeline = Timeline {
            tasks: vec![],
            critical_path: vec![],
            total_duration_days: 11.5,
            buffer_percentage: 0.15,
        };
        assert!((timeline.critical_path_days() - 10.0).abs() < 1e-9);
    }
}
