use core::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use delve_core::{Cell, Mobility, MoveAction};
use tracing::trace;

use crate::{GoalRegion, MovementGraph, Terrain};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    /// Hard bound on the number of nodes expanded.
    pub max_expansions: usize,
    /// Weight on the heuristic (`>= 1.0`); larger values trade optimality for speed.
    pub heuristic_weight: f32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_expansions: 4096,
            heuristic_weight: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// `Some(vec![])` when the start already satisfies the goal.
    pub path: Option<Vec<MoveAction>>,
    pub expansions: usize,
    pub budget_exhausted: bool,
}

impl SearchOutcome {
    fn failed(expansions: usize, budget_exhausted: bool) -> Self {
        Self {
            path: None,
            expansions,
            budget_exhausted,
        }
    }

    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    g: f32,
    cell: Cell,
    tie: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest f; equal f pops the earliest discovered node.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.tie.cmp(&self.tie))
    }
}

/// Weighted A* from `start` into `goal` over moves produced by `graph`.
///
/// Deterministic: ties on `f = g + w * h` go to the node pushed first.
pub fn find_path<T: Terrain + ?Sized>(
    graph: &MovementGraph,
    terrain: &T,
    start: Cell,
    goal: &GoalRegion,
    mobility: Mobility,
    limits: SearchLimits,
) -> SearchOutcome {
    if goal.contains(terrain, start) {
        return SearchOutcome {
            path: Some(Vec::new()),
            expansions: 0,
            budget_exhausted: false,
        };
    }
    if !goal.is_reachable_at_all(terrain) {
        trace!(?goal, "goal region cannot be entered");
        return SearchOutcome::failed(0, false);
    }

    let weight = limits.heuristic_weight.max(1.0);
    let mut open = BinaryHeap::<OpenNode>::new();
    let mut tie: u64 = 0;
    let mut g_score: BTreeMap<Cell, f32> = BTreeMap::new();
    let mut came_from: BTreeMap<Cell, MoveAction> = BTreeMap::new();
    let mut moves = Vec::with_capacity(16);

    g_score.insert(start, 0.0);
    open.push(OpenNode {
        f: weight * goal.heuristic(terrain, start),
        g: 0.0,
        cell: start,
        tie,
    });
    tie += 1;

    let mut expansions: usize = 0;

    while let Some(node) = open.pop() {
        let best_g = g_score.get(&node.cell).copied().unwrap_or(f32::INFINITY);
        if node.g > best_g {
            continue; // stale heap entry
        }

        expansions += 1;
        if expansions > limits.max_expansions {
            trace!(expansions, "search budget exhausted");
            return SearchOutcome::failed(limits.max_expansions, true);
        }

        if goal.contains(terrain, node.cell) {
            let mut path = Vec::new();
            let mut current = node.cell;
            while let Some(action) = came_from.get(&current).copied() {
                path.push(action);
                current = action.origin();
            }
            path.reverse();
            return SearchOutcome {
                path: Some(path),
                expansions,
                budget_exhausted: false,
            };
        }

        graph.moves_into(terrain, node.cell, mobility, &mut moves);
        for action in moves.iter() {
            let next_g = node.g + action.cost();
            let prev_best = g_score.get(&action.target).copied().unwrap_or(f32::INFINITY);
            if next_g >= prev_best {
                continue;
            }

            g_score.insert(action.target, next_g);
            came_from.insert(action.target, *action);
            open.push(OpenNode {
                f: next_g + weight * goal.heuristic(terrain, action.target),
                g: next_g,
                cell: action.target,
                tie,
            });
            tie += 1;
        }
    }

    SearchOutcome::failed(expansions, false)
}
