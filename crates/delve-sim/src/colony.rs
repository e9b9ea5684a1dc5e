//! The sample world the colonists live in.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use delve::core::{Cell, MoveType, WorldMut, WorldView};
use delve::nav::{NavWorldMut, NavWorldView, SharedTerrain, Terrain, VoxelGrid, MAX_LIQUID_DEPTH};
use tracing::{debug, warn};

use crate::config::MapConfig;

pub type ColonistId = u32;

#[derive(Debug, Clone, Default)]
pub struct Colonist {
    pub position: Cell,
    pub motion: Option<MoveType>,
    pub steps: u64,
    pub mined: u32,
}

#[derive(Debug, Clone)]
pub struct Colony {
    terrain: Arc<VoxelGrid>,
    ore: BTreeSet<Cell>,
    colonists: BTreeMap<ColonistId, Colonist>,
}

impl Colony {
    pub fn from_map(map: &MapConfig) -> Self {
        let mut grid = VoxelGrid::new(map.width, map.height, map.depth);
        for [a, b] in &map.walls {
            grid.fill(*a, *b, true);
        }
        for cell in &map.water {
            grid.set_liquid(*cell, MAX_LIQUID_DEPTH);
        }
        for cell in &map.ladders {
            grid.set_ladder(*cell, Some(delve::core::EntityId(cell_key(*cell))));
        }
        let mut ore = BTreeSet::new();
        for cell in &map.ore {
            if grid.voxel(*cell).is_none() {
                warn!(%cell, "ore outside the map ignored");
                continue;
            }
            grid.set_solid(*cell, true);
            ore.insert(*cell);
        }

        Self {
            terrain: Arc::new(grid),
            ore,
            colonists: BTreeMap::new(),
        }
    }

    pub fn spawn(&mut self, id: ColonistId, position: Cell) {
        self.colonists.insert(
            id,
            Colonist {
                position,
                ..Colonist::default()
            },
        );
    }

    pub fn colonists(&self) -> impl Iterator<Item = (ColonistId, &Colonist)> {
        self.colonists.iter().map(|(id, c)| (*id, c))
    }

    pub fn ore(&self) -> impl Iterator<Item = Cell> + '_ {
        self.ore.iter().copied()
    }

    pub fn has_ore(&self, cell: Cell) -> bool {
        self.ore.contains(&cell)
    }

    pub fn ore_remaining(&self) -> usize {
        self.ore.len()
    }

    /// Clears the ore at `cell` if `by` is standing next to it.
    ///
    /// Terrain is copied on write, so plans already running against the old snapshot are
    /// unaffected.
    pub fn dig(&mut self, by: ColonistId, cell: Cell) -> bool {
        let Some(colonist) = self.colonists.get_mut(&by) else {
            return false;
        };
        if !self.ore.contains(&cell) || colonist.position.chebyshev(cell) > 1 {
            return false;
        }
        colonist.mined += 1;
        self.ore.remove(&cell);
        Arc::make_mut(&mut self.terrain).set_solid(cell, false);
        debug!(colonist = by, %cell, "ore mined");
        true
    }
}

fn cell_key(cell: Cell) -> u64 {
    ((cell.x as u32 as u64) << 40) ^ ((cell.y as u32 as u64) << 20) ^ (cell.z as u32 as u64)
}

impl WorldView for Colony {
    type Agent = ColonistId;
}

impl WorldMut for Colony {}

impl NavWorldView for Colony {
    fn terrain(&self) -> &dyn Terrain {
        &*self.terrain
    }

    fn terrain_snapshot(&self) -> SharedTerrain {
        self.terrain.clone()
    }

    fn position(&self, agent: ColonistId) -> Option<Cell> {
        self.colonists.get(&agent).map(|c| c.position)
    }
}

impl NavWorldMut for Colony {
    fn set_position(&mut self, agent: ColonistId, cell: Cell) {
        if let Some(colonist) = self.colonists.get_mut(&agent) {
            colonist.position = cell;
            colonist.steps += 1;
        }
    }

    fn set_motion(&mut self, agent: ColonistId, motion: Option<MoveType>) {
        if let Some(colonist) = self.colonists.get_mut(&agent) {
            colonist.motion = motion;
        }
    }
}
