#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use delve_act::{Act, ActContext, BoxedAct, Do, PlanLink};
use delve_core::{Blackboard, Cell, MoveType, Status, TickContext, TraceLog, WorldMut, WorldView};
use delve_nav::{NavWorldMut, NavWorldView, SharedTerrain, Terrain, VoxelGrid};
use delve_plan::{PlanService, PlanSubscriber};

pub const AGENT: u64 = 7;

#[derive(Debug, Clone)]
pub struct Burrow {
    pub terrain: Arc<VoxelGrid>,
    pub positions: BTreeMap<u64, Cell>,
    pub motion: BTreeMap<u64, MoveType>,
    pub log: Vec<&'static str>,
    pub counter: u32,
}

impl Burrow {
    pub fn new(grid: VoxelGrid) -> Self {
        Self {
            terrain: Arc::new(grid),
            positions: BTreeMap::new(),
            motion: BTreeMap::new(),
            log: Vec::new(),
            counter: 0,
        }
    }

    pub fn open_room() -> Self {
        Self::new(VoxelGrid::new(5, 2, 5))
    }

    pub fn with_agent_at(mut self, cell: Cell) -> Self {
        self.positions.insert(AGENT, cell);
        self
    }

    pub fn edit(&mut self) -> &mut VoxelGrid {
        Arc::make_mut(&mut self.terrain)
    }

    pub fn position(&self) -> Option<Cell> {
        self.positions.get(&AGENT).copied()
    }
}

impl WorldView for Burrow {
    type Agent = u64;
}

impl WorldMut for Burrow {}

impl NavWorldView for Burrow {
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

impl NavWorldMut for Burrow {
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

/// Per-agent state that normally lives in the scheduler.
pub struct Rig {
    pub service: PlanService,
    pub subscriber: PlanSubscriber,
    pub blackboard: Blackboard,
    pub trace: TraceLog,
    pub clock: TickContext,
}

impl Rig {
    pub fn new(service: PlanService) -> Self {
        let subscriber = service.subscribe();
        Self {
            service,
            subscriber,
            blackboard: Blackboard::new(),
            trace: TraceLog::enabled(),
            clock: TickContext::new(0, 0.25, 42),
        }
    }

    pub fn inline() -> Self {
        Self::new(PlanService::inline())
    }

    pub fn with_ctx<R>(
        &mut self,
        world: &mut Burrow,
        f: impl FnOnce(&mut ActContext<'_, Burrow>) -> R,
    ) -> R {
        let clock = self.clock;
        self.clock = clock.next();
        let mut ctx = ActContext {
            clock: &clock,
            agent: AGENT,
            world,
            blackboard: &mut self.blackboard,
            planner: PlanLink {
                service: &self.service,
                subscriber: &mut self.subscriber,
            },
            trace: &mut self.trace,
        };
        f(&mut ctx)
    }

    pub fn tick(&mut self, act: &mut dyn Act<Burrow>, world: &mut Burrow) -> Status {
        self.with_ctx(world, |ctx| act.tick(ctx))
    }

    pub fn cancel(&mut self, act: &mut dyn Act<Burrow>, world: &mut Burrow) {
        self.with_ctx(world, |ctx| act.on_canceled(ctx))
    }
}

/// Logs `name` and finishes immediately with `status`.
pub fn step(name: &'static str, status: Status) -> BoxedAct<Burrow> {
    Box::new(Do::<Burrow, _>::new(move |ctx| {
        ctx.world.log.push(name);
        status
    }))
}

/// Logs `name` each tick, running `running` times before finishing with `status`.
pub fn slow(name: &'static str, running: u32, status: Status) -> BoxedAct<Burrow> {
    let mut left = running;
    Box::new(Do::<Burrow, _>::new(move |ctx| {
        ctx.world.log.push(name);
        if left == 0 {
            left = running;
            return status;
        }
        left -= 1;
        Status::Running
    }))
}

/// Runs forever and records cancellation.
pub struct Tracker;

impl Act<Burrow> for Tracker {
    fn tick(&mut self, ctx: &mut ActContext<'_, Burrow>) -> Status {
        ctx.world.log.push("tracker");
        Status::Running
    }

    fn on_canceled(&mut self, ctx: &mut ActContext<'_, Burrow>) {
        ctx.world.log.push("canceled");
    }
}
