//! Constraint resolution: registrations + anchors -> one total order.
//!
//! Graph nodes are the anchors (indices `0..anchors.len()`) followed by the
//! registrations in registration order. Edges point from "runs first" to
//! "runs later":
//!
//! - consecutive anchors: `anchor[i] -> anchor[i + 1]`
//! - `after: X` on node `n`: `X -> n`
//! - `before: Y` on node `n`: `n -> Y`
//!
//! A missing `after` is filled in so that no action runs ahead of `begin`:
//! an unconstrained action counts as `after: structure_defined`, one with
//! only a `before` as `after: begin`.
//!
//! Kahn's algorithm with a min-heap yields the order. Among nodes that are
//! ready at the same time actions go before anchors, so a phase closes only
//! once everything that may run in it has run; an action without `before`
//! therefore still lands ahead of `end`. Actions then go by index, so actions
//! sharing a constraint keep their registration order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::action::Registration;
use super::anchors;
use crate::application::ApplicationError;

/// Indices into `registrations`, in execution order.
pub(crate) fn resolve_order(registrations: &[Registration]) -> Result<Vec<usize>, ApplicationError> {
    let anchor_count = anchors::ALL.len();
    let node_count = anchor_count + registrations.len();

    let names: Vec<&str> = anchors::ALL
        .iter()
        .copied()
        .chain(registrations.iter().map(|r| r.action.name()))
        .collect();

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(node_count);
    for (node, &name) in names.iter().enumerate() {
        if index.insert(name, node).is_some() {
            return Err(ApplicationError::DuplicateAction {
                name: name.to_string(),
            });
        }
    }

    let lookup = |action: &str, reference: &str| {
        index
            .get(reference)
            .copied()
            .ok_or_else(|| ApplicationError::UnknownAnchor {
                action: action.to_string(),
                reference: reference.to_string(),
            })
    };

    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for node in 1..anchor_count {
        successors[node - 1].push(node);
    }
    for (offset, registration) in registrations.iter().enumerate() {
        let node = anchor_count + offset;
        let name = registration.action.name();
        let (after, before) = bounds(registration);

        if let Some(after) = after {
            successors[lookup(name, after)?].push(node);
        }
        if let Some(before) = before {
            let target = lookup(name, before)?;
            successors[node].push(target);
        }
    }

    let mut in_degree = vec![0usize; node_count];
    for targets in &successors {
        for &target in targets {
            in_degree[target] += 1;
        }
    }

    // (is_anchor, index): the min-heap drains ready actions before anchors.
    let priority = |node: usize| Reverse((node < anchor_count, node));

    let mut ready: BinaryHeap<Reverse<(bool, usize)>> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &degree)| degree == 0)
        .map(|(node, _)| priority(node))
        .collect();

    let mut sorted = Vec::with_capacity(node_count);
    while let Some(Reverse((_, node))) = ready.pop() {
        sorted.push(node);
        for &target in &successors[node] {
            in_degree[target] -= 1;
            if in_degree[target] == 0 {
                ready.push(priority(target));
            }
        }
    }

    if sorted.len() < node_count {
        let cycle = find_cycle(&successors, &in_degree)
            .into_iter()
            .map(|node| names[node].to_string())
            .collect();
        return Err(ApplicationError::CyclicOrdering { cycle });
    }

    Ok(sorted
        .into_iter()
        .filter_map(|node| node.checked_sub(anchor_count))
        .collect())
}

/// Effective `(after, before)` of a registration, implicit anchor included.
fn bounds(registration: &Registration) -> (Option<&str>, Option<&str>) {
    let position = &registration.position;
    match (position.after.as_deref(), position.before.as_deref()) {
        (None, None) => (Some(anchors::STRUCTURE_DEFINED), None),
        (None, Some(anchors::BEGIN)) => (None, Some(anchors::BEGIN)),
        (None, Some(before)) => (Some(anchors::BEGIN), Some(before)),
        (after, before) => (after, before),
    }
}

/// Extract one cycle from the nodes Kahn's algorithm could not place.
///
/// Every unplaced node has an unplaced predecessor, so walking predecessors
/// from any unplaced node must revisit a node. The returned path starts and
/// ends on the same node, in execution direction.
fn find_cycle(successors: &[Vec<usize>], in_degree: &[usize]) -> Vec<usize> {
    let unplaced = |node: usize| in_degree[node] > 0;

    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); successors.len()];
    for (from, targets) in successors.iter().enumerate() {
        for &to in targets {
            if unplaced(from) && unplaced(to) {
                predecessors[to].push(from);
            }
        }
    }

    let Some(start) = (0..successors.len()).find(|&n| unplaced(n)) else {
        return Vec::new();
    };

    let mut visited_at: HashMap<usize, usize> = HashMap::new();
    let mut walk = Vec::new();
    let mut current = start;
    loop {
        if let Some(&at) = visited_at.get(&current) {
            let mut cycle: Vec<usize> = walk[at..].to_vec();
            cycle.reverse();
            cycle.push(cycle[0]);
            return cycle;
        }
        visited_at.insert(current, walk.len());
        walk.push(current);
        match predecessors[current].iter().min() {
            Some(&previous) => current = previous,
            None => return walk,
        }
    }
}
