use delve_core::{Cell, Mobility, MoveAction};
use delve_nav::{GoalRegion, SearchLimits};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanRequest {
    pub start: Cell,
    pub goal: GoalRegion,
    pub max_expansions: usize,
    pub heuristic_weight: f32,
    pub mobility: Mobility,
}

impl PlanRequest {
    pub fn new(start: Cell, goal: GoalRegion) -> Self {
        let limits = SearchLimits::default();
        Self {
            start,
            goal,
            max_expansions: limits.max_expansions,
            heuristic_weight: limits.heuristic_weight,
            mobility: Mobility::walker(),
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    pub fn with_heuristic_weight(mut self, weight: f32) -> Self {
        self.heuristic_weight = weight;
        self
    }

    pub fn with_mobility(mut self, mobility: Mobility) -> Self {
        self.mobility = mobility;
        self
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
            heuristic_weight: self.heuristic_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanResponse {
    pub success: bool,
    /// Empty when the start already satisfies the goal, or when `success` is `false`.
    pub path: Vec<MoveAction>,
    pub expansions: usize,
}

impl PlanResponse {
    pub fn failed(expansions: usize) -> Self {
        Self {
            success: false,
            path: Vec::new(),
            expansions,
        }
    }
}
