//! Plan dependency graph utilities
//!
//! Steps with no explicit `depends_on` implicitly depend on their textual
//! predecessor, so "no annotations at all" still means strict definition
//! order. The normalization pass makes that explicit once; cycle detection
//! and topological sorting then work on a uniform graph.

use std::collections::{HashMap, HashSet};

use crate::domain::Plan;

/// Effective dependencies per step, after the normalization pass
///
/// Parallel to `plan.steps`: explicit `depends_on` wins; an empty list
/// becomes a dependency on the previous step (the first step depends on
/// nothing).
pub fn effective_deps(plan: &Plan) -> Vec<Vec<String>> {
    plan.steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            if !step.depends_on.is_empty() {
                step.depends_on.clone()
            } else if idx > 0 {
                vec![plan.steps[idx - 1].id.clone()]
            } else {
                Vec::new()
            }
        })
        .collect()
}

/// Validate the effective dependency graph for cycles
///
/// Uses DFS. Returns Ok(()) if no cycles, Err with the cycle path if found.
pub fn validate_dependency_graph(plan: &Plan, deps: &[Vec<String>]) -> Result<(), Vec<String>> {
    let index_map: HashMap<&str, usize> = plan.steps.iter().enumerate().map(|(i, s)| (s.id.as_str(), i)).collect();

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut cycle_path = Vec::new();

    for idx in 0..plan.steps.len() {
        if !visited.contains(&idx)
            && has_cycle_dfs(idx, plan, deps, &index_map, &mut visited, &mut rec_stack, &mut cycle_path)
        {
            return Err(cycle_path);
        }
    }

    Ok(())
}

/// DFS helper for cycle detection
fn has_cycle_dfs(
    idx: usize,
    plan: &Plan,
    deps: &[Vec<String>],
    index_map: &HashMap<&str, usize>,
    visited: &mut HashSet<usize>,
    rec_stack: &mut HashSet<usize>,
    cycle_path: &mut Vec<String>,
) -> bool {
    visited.insert(idx);
    rec_stack.insert(idx);
    cycle_path.push(plan.steps[idx].id.clone());

    for dep_id in &deps[idx] {
        // Unknown ids are a validation problem, not a graph problem
        let Some(&dep_idx) = index_map.get(dep_id.as_str()) else {
            continue;
        };

        if !visited.contains(&dep_idx) {
            if has_cycle_dfs(dep_idx, plan, deps, index_map, visited, rec_stack, cycle_path) {
                return true;
            }
        } else if rec_stack.contains(&dep_idx) {
            cycle_path.push(dep_id.clone());
            return true;
        }
    }

    rec_stack.remove(&idx);
    cycle_path.pop();
    false
}

/// Topologically sort a plan's steps by their effective dependencies
///
/// Returns indices into `plan.steps` in execution order (dependencies
/// first). Steps with no ordering constraint relative to each other keep
/// their definition order.
pub fn topological_sort(plan: &Plan) -> Result<Vec<usize>, Vec<String>> {
    let deps = effective_deps(plan);

    // First validate no cycles
    validate_dependency_graph(plan, &deps)?;

    let index_map: HashMap<&str, usize> = plan.steps.iter().enumerate().map(|(i, s)| (s.id.as_str(), i)).collect();

    let mut visited = HashSet::new();
    let mut result = Vec::new();

    for idx in 0..plan.steps.len() {
        topo_dfs_idx(idx, &deps, &index_map, &mut visited, &mut result);
    }

    Ok(result)
}

/// DFS helper for topological sort (returns indices)
fn topo_dfs_idx(
    idx: usize,
    deps: &[Vec<String>],
    index_map: &HashMap<&str, usize>,
    visited: &mut HashSet<usize>,
    result: &mut Vec<usize>,
) {
    if visited.contains(&idx) {
        return;
    }

    visited.insert(idx);

    for dep_id in &deps[idx] {
        if let Some(&dep_idx) = index_map.get(dep_id.as_str()) {
            topo_dfs_idx(dep_idx, deps, index_map, visited, result);
        }
    }
    result.push(idx);
}
