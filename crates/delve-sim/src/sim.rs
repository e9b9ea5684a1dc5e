//! The colony run loop.

use anyhow::{Context, Result};
use delve::core::{Cell, TickContext};
use delve::plan::PlanService;
use delve::task::{tick_agents, AgentBrain};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::behaviors::{dig, Gait, Wander};
use crate::colony::{ColonistId, Colony};
use crate::config::SimConfig;

const PROGRESS_EVERY: u64 = 100;

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub seed: u64,
    pub ticks: u64,
    pub workers: usize,
    pub ore_remaining: usize,
    pub colonists: Vec<ColonistReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColonistReport {
    pub id: ColonistId,
    pub position: Cell,
    pub steps: u64,
    pub mined: u32,
    pub tasks_done: usize,
    pub tasks_failed: usize,
    pub plans_requested: usize,
}

pub fn run(config: &SimConfig) -> Result<Summary> {
    let planner = PlanService::new(config.planner).context("failed to start planner")?;
    let mut colony = Colony::from_map(&config.map);

    let gait = Gait {
        plan: config.plan,
        ticks_per_step: config.colonists.ticks_per_step,
    };

    let mut brains = Vec::new();
    for id in 0..config.colonists.count {
        let spawn = config.colonists.spawn.offset(id as i32, 0, 0);
        colony.spawn(id, spawn);

        let mut brain = AgentBrain::new(id, &planner)
            .with_config(config.scheduler)
            .with_idle(Wander {
                radius: config.colonists.wander_radius,
            });
        for ore in colony.ore() {
            if let Err(task) = brain.push(dig(ore, gait, config.colonists.dig_ticks)) {
                warn!(colonist = id, task = task.name(), "task rejected");
            }
        }
        brains.push(brain);
    }

    info!(
        colonists = brains.len(),
        ore = colony.ore_remaining(),
        workers = config.planner.workers,
        "colony started"
    );

    let mut clock = TickContext::new(0, config.dt_seconds, config.seed);
    let mut ticks = 0;
    while ticks < config.ticks {
        tick_agents(&clock, &mut colony, &planner, &mut brains);
        ticks += 1;

        if ticks % PROGRESS_EVERY == 0 {
            info!(tick = ticks, ore = colony.ore_remaining(), "progress");
        }
        if config.stop_when_mined && colony.ore_remaining() == 0 {
            debug!(tick = ticks, "all ore mined");
            break;
        }
        clock = clock.next();
    }

    let colonists = brains
        .iter()
        .filter_map(|brain| {
            let (id, colonist) = colony.colonists().find(|(id, _)| *id == brain.agent())?;
            let trace = brain.trace();
            Some(ColonistReport {
                id,
                position: colonist.position,
                steps: colonist.steps,
                mined: colonist.mined,
                tasks_done: trace.count("task.done"),
                tasks_failed: trace.count("task.failed"),
                plans_requested: trace.count("plan.request"),
            })
        })
        .collect();

    Ok(Summary {
        seed: config.seed,
        ticks,
        workers: config.planner.workers,
        ore_remaining: colony.ore_remaining(),
        colonists,
    })
}
