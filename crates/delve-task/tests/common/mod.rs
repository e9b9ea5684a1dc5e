#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use delve_act::{Act, ActContext, Do, Script, Sequence};
use delve_core::{Cell, MoveType, Status, WorldMut, WorldView};
use delve_nav::{NavWorldMut, NavWorldView, SharedTerrain, Terrain, VoxelGrid};
use delve_task::{Priority, Task};

#[derive(Debug, Clone)]
pub struct Den {
    pub terrain: Arc<VoxelGrid>,
    pub positions: BTreeMap<u64, Cell>,
    pub motion: BTreeMap<u64, MoveType>,
    pub log: Vec<String>,
    pub gone: BTreeSet<&'static str>,
    pub blocked: BTreeSet<&'static str>,
}

impl Den {
    pub fn new() -> Self {
        Self {
            terrain: Arc::new(VoxelGrid::new(5, 2, 5)),
            positions: BTreeMap::new(),
            motion: BTreeMap::new(),
            log: Vec::new(),
            gone: BTreeSet::new(),
            blocked: BTreeSet::new(),
        }
    }

    pub fn edit(&mut self) -> &mut VoxelGrid {
        Arc::make_mut(&mut self.terrain)
    }

    pub fn count(&self, entry: &str) -> usize {
        self.log.iter().filter(|e| *e == entry).count()
    }
}

impl WorldView for Den {
    type Agent = u64;
}

impl WorldMut for Den {}

impl NavWorldView for Den {
    fn terrain(&self) -> &dyn Terrain {
        &*self.terrain
    }

    fn terrain_snapshot(&self) -> SharedTerrain {
        self.terrain.clone()
    }

    fn position(&self, agent: u64) -> Option<Cell> {
        self.positions.get(&agent).copied()
    }
}

impl NavWorldMut for Den {
    fn set_position(&mut self, agent: u64, cell: Cell) {
        self.positions.insert(agent, cell);
    }

    fn set_motion(&mut self, agent: u64, motion: Option<MoveType>) {
        match motion {
            Some(m) => {
                self.motion.insert(agent, m);
            }
            None => {
                self.motion.remove(&agent);
            }
        }
    }
}

/// Logs `<name>` and succeeds.
pub fn instant(name: &'static str) -> Script<Den> {
    Script::new(Box::new(Do::<Den, _>::new(move |ctx| {
        ctx.world.log.push(format!("{name}@{}", ctx.agent));
        Status::Success
    })))
}

/// Logs `<name>` and fails.
pub fn failing(name: &'static str) -> Script<Den> {
    Script::new(Box::new(Do::<Den, _>::new(move |ctx| {
        ctx.world.log.push(name.to_string());
        Status::Failure
    })))
}

/// Logs `<name>.start`, then runs until canceled, logging `<name>.canceled`.
pub fn endless(name: &'static str) -> Script<Den> {
    Script::new(Box::new(Sequence::<Den>::new(vec![
        Box::new(Do::<Den, _>::new(move |ctx| {
            ctx.world.log.push(format!("{name}.start"));
            Status::Success
        })),
        Box::new(Busy(name)),
    ])))
}

pub struct Busy(pub &'static str);

impl Act<Den> for Busy {
    fn tick(&mut self, _ctx: &mut ActContext<'_, Den>) -> Status {
        Status::Running
    }

    fn on_canceled(&mut self, ctx: &mut ActContext<'_, Den>) {
        ctx.world.log.push(format!("{}.canceled", self.0));
    }
}

pub fn task(name: &'static str, priority: Priority) -> Task<Den> {
    Task::new(name, priority, move |_, _| instant(name))
}

/// A task whose feasibility and deletion are driven by `Den::blocked` / `Den::gone`.
pub fn gated(name: &'static str, priority: Priority, cost: f32) -> Task<Den> {
    Task::new(name, priority, move |_, _| instant(name))
        .with_cost(move |_, _| cost)
        .with_feasible(move |_, w: &Den| !w.blocked.contains(name))
        .with_should_delete(move |_, w: &Den| w.gone.contains(name))
}
