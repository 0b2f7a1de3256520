//! Timeline construction and critical-path analysis

use crate::config::ScheduleConfig;
use crate::error::ScheduleError;
use std::collections::HashMap;
use takeoff_domain::{CostItem, Task, TaskId, Timeline};
use tracing::{debug, info};

/// Builds timelines from cost items and an external task plan
#[derive(Debug, Clone)]
pub struct TimelineBuilder {
    config: ScheduleConfig,
}

impl TimelineBuilder {
    /// Create a builder with the given configuration
    pub fn new(config: ScheduleConfig) -> Result<Self, ScheduleError> {
        config.validate().map_err(ScheduleError::Config)?;
        Ok(Self { config })
    }

    /// Build a timeline, one task per cost item
    ///
    /// Fails when the plan is missing an entry for any scope in the batch,
    /// or when the dependency graph is cyclic. A cycle aborts scheduling
    /// entirely rather than truncating the graph.
    pub fn build(
        &self,
        cost_items: &[CostItem],
        plan: &crate::config::TaskPlan,
    ) -> Result<Timeline, ScheduleError> {
        let mut tasks: Vec<Task> = Vec::with_capacity(cost_items.len());
        let mut by_code: HashMap<&str, Vec<usize>> = HashMap::new();

        for (index, item) in cost_items.iter().enumerate() {
            let planned = plan
                .by_code(&item.work_scope_code)
                .ok_or_else(|| ScheduleError::MissingPlanEntry(item.work_scope_code.clone()))?;
            tasks.push(Task {
                id: TaskId::new(),
                work_scope_code: item.work_scope_code.clone(),
                duration_days: planned.duration_days,
                dependencies: Vec::new(),
                can_parallel: planned.can_parallel,
                crew_size: planned.crew_size,
            });
            by_code
                .entry(item.work_scope_code.as_str())
                .or_default()
                .push(index);
        }

        // dependency edges as indices; plan entries may name scopes the
        // batch does not contain, those are skipped
        let mut edges: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
        for (index, task) in tasks.iter().enumerate() {
            let planned = plan
                .by_code(&task.work_scope_code)
                .ok_or_else(|| ScheduleError::MissingPlanEntry(task.work_scope_code.clone()))?;
            for dep_code in &planned.dependencies {
                match by_code.get(dep_code.as_str()) {
                    Some(dep_indices) => {
                        for &dep in dep_indices {
                            if dep != index {
                                edges[index].push(dep);
                            }
                        }
                    }
                    None => {
                        debug!(
                            scope_code = %task.work_scope_code,
                            dependency = %dep_code,
                            "dependency scope not in batch, edge skipped"
                        );
                    }
                }
            }
        }

        self.check_acyclic(&tasks, &edges)?;

        let task_ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        for (index, deps) in edges.iter().enumerate() {
            tasks[index].dependencies = deps.iter().map(|&d| task_ids[d]).collect();
        }

        let (critical_path, critical_length) = critical_path(&tasks, &edges);
        let total_duration_days = critical_length * (1.0 + self.config.buffer_percentage);

        info!(
            tasks = tasks.len(),
            critical_length,
            total_duration_days,
            "timeline built"
        );

        Ok(Timeline {
            tasks,
            critical_path,
            total_duration_days,
            buffer_percentage: self.config.buffer_percentage,
        })
    }

    /// Three-color depth-first cycle check over the dependency graph
    fn check_acyclic(&self, tasks: &[Task], edges: &[Vec<usize>]) -> Result<(), ScheduleError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            White,
            Gray,
            Black,
        }

        fn visit(
            node: usize,
            edges: &[Vec<usize>],
            marks: &mut [Mark],
            stack: &mut Vec<usize>,
        ) -> Option<Vec<usize>> {
            marks[node] = Mark::Gray;
            stack.push(node);
            for &next in &edges[node] {
                match marks[next] {
                    Mark::Gray => {
                        // cycle: the stack suffix from `next` closes the loop
                        let start = stack.iter().position(|&n| n == next).unwrap_or(0);
                        let mut cycle = stack[start..].to_vec();
                        cycle.push(next);
                        return Some(cycle);
                    }
                    Mark::White => {
                        if let Some(cycle) = visit(next, edges, marks, stack) {
                            return Some(cycle);
                        }
                    }
                    Mark::Black => {}
                }
            }
            stack.pop();
            marks[node] = Mark::Black;
            None
        }

        let mut marks = vec![Mark::White; tasks.len()];
        for node in 0..tasks.len() {
            if marks[node] == Mark::White {
                let mut stack = Vec::new();
                if let Some(cycle) = visit(node, edges, &mut marks, &mut stack) {
                    let codes = cycle
                        .into_iter()
                        .map(|n| tasks[n].work_scope_code.clone())
                        .collect();
                    return Err(ScheduleError::CyclicDependency(codes));
                }
            }
        }
        Ok(())
    }
}

/// Longest-path pass over an acyclic dependency graph
///
/// Forward pass computes each task's earliest finish; the path is
/// reconstructed backward from the latest-finishing task through its
/// binding (zero-slack) dependency at each step.
fn critical_path(tasks: &[Task], edges: &[Vec<usize>]) -> (Vec<TaskId>, f64) {
    if tasks.is_empty() {
        return (Vec::new(), 0.0);
    }

    let mut earliest_finish: Vec<Option<f64>> = vec![None; tasks.len()];
    let mut binding_dep: Vec<Option<usize>> = vec![None; tasks.len()];

    fn finish(
        node: usize,
        tasks: &[Task],
        edges: &[Vec<usize>],
        earliest_finish: &mut Vec<Option<f64>>,
        binding_dep: &mut Vec<Option<usize>>,
    ) -> f64 {
        if let Some(value) = earliest_finish[node] {
            return value;
        }
        let mut start = 0.0;
        for &dep in &edges[node] {
            let dep_finish = finish(dep, tasks, edges, earliest_finish, binding_dep);
            if dep_finish > start {
                start = dep_finish;
                binding_dep[node] = Some(dep);
            }
        }
        let value = start + tasks[node].duration_days;
        earliest_finish[node] = Some(value);
        value
    }

    let mut end = 0;
    let mut length = 0.0;
    for node in 0..tasks.len() {
        let value = finish(node, tasks, edges, &mut earliest_finish, &mut binding_dep);
        if value > length {
            length = value;
            end = node;
        }
    }

    let mut path = vec![end];
    let mut current = end;
    while let Some(dep) = binding_dep[current] {
        path.push(dep);
        current = dep;
    }
    path.reverse();

    (path.into_iter().map(|n| tasks[n].id).collect(), length)
}
