use delve_core::Cell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Terrain;

/// Acceptable destinations for a path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GoalRegion {
    /// Stand in exactly this cell.
    Into(Cell),
    /// Stand in the cell or any of its 26 neighbours (digging, attacking, picking up).
    Adjacent(Cell),
    /// Stand within `radius` king moves of `center`.
    Radius { center: Cell, radius: u32 },
    /// Reach any cell on a vertical face of the map (fleeing, leaving the colony).
    Edge,
}

impl GoalRegion {
    pub fn contains<T: Terrain + ?Sized>(&self, terrain: &T, cell: Cell) -> bool {
        match *self {
            GoalRegion::Into(target) => cell == target,
            GoalRegion::Adjacent(target) => cell.chebyshev(target) <= 1,
            GoalRegion::Radius { center, radius } => cell.chebyshev(center) <= radius,
            GoalRegion::Edge => terrain.bounds().on_lateral_edge(cell),
        }
    }

    /// Lower bound on the number of moves from `cell` into the region.
    pub fn heuristic<T: Terrain + ?Sized>(&self, terrain: &T, cell: Cell) -> f32 {
        let steps = match *self {
            GoalRegion::Into(target) => cell.chebyshev(target),
            GoalRegion::Adjacent(target) => cell.chebyshev(target).saturating_sub(1),
            GoalRegion::Radius { center, radius } => cell.chebyshev(center).saturating_sub(radius),
            GoalRegion::Edge => terrain.bounds().lateral_edge_distance(cell),
        };
        steps as f32
    }

    /// Cheap rejection of regions no search could ever satisfy.
    pub fn is_reachable_at_all<T: Terrain + ?Sized>(&self, terrain: &T) -> bool {
        match *self {
            GoalRegion::Into(target) => {
                terrain.bounds().contains(target)
                    && terrain.is_empty(target)
                    && terrain.obstacle(target).is_none()
            }
            _ => true,
        }
    }

    /// A representative cell, for logs.
    pub fn anchor(&self) -> Option<Cell> {
        match *self {
            GoalRegion::Into(c) | GoalRegion::Adjacent(c) => Some(c),
            GoalRegion::Radius { center, .. } => Some(center),
            GoalRegion::Edge => None,
        }
    }
}
