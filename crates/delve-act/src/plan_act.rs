use delve_core::{BbKey, Cell, MoveAction, Status};
use delve_nav::{GoalRegion, NavWorldMut, SearchLimits};
use delve_plan::PlanRequest;
use tracing::{debug, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::act::{Act, ActContext};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanActConfig {
    pub max_expansions: usize,

    /// Weight of the first request. Must be >= 1.0.
    pub heuristic_weight: f32,

    /// Factor applied to the weight after each failed response.
    pub weight_escalation: f32,

    /// Failed responses tolerated before the act fails. Each one triggers a re-plan with a wider
    /// weight, so the act sends at most `max_timeouts + 1` requests.
    pub max_timeouts: u32,
}

impl Default for PlanActConfig {
    fn default() -> Self {
        let limits = SearchLimits::default();
        Self {
            max_expansions: limits.max_expansions,
            heuristic_weight: limits.heuristic_weight,
            weight_escalation: 2.0,
            max_timeouts: 3,
        }
    }
}

/// Where a [`PlanAct`] should go. Blackboard variants are resolved when the first request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanGoal {
    Region(GoalRegion),
    Into(BbKey<Cell>),
    Adjacent(BbKey<Cell>),
}

impl From<GoalRegion> for PlanGoal {
    fn from(region: GoalRegion) -> Self {
        PlanGoal::Region(region)
    }
}

impl PlanGoal {
    fn resolve<W>(&self, ctx: &ActContext<'_, W>) -> Option<GoalRegion>
    where
        W: NavWorldMut,
    {
        match *self {
            PlanGoal::Region(region) => Some(region),
            PlanGoal::Into(key) => ctx.blackboard.get(key).copied().map(GoalRegion::Into),
            PlanGoal::Adjacent(key) => ctx.blackboard.get(key).copied().map(GoalRegion::Adjacent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct InFlight {
    goal: GoalRegion,
    seq: u64,
}

/// Requests a path from the planning service and waits for it without blocking the tick.
///
/// On success the path is written to `path_key`. A failed response is retried with the heuristic
/// weight multiplied by `weight_escalation` until `max_timeouts` is exceeded.
#[derive(Debug, Clone)]
pub struct PlanAct {
    goal: PlanGoal,
    path_key: BbKey<Vec<MoveAction>>,
    config: PlanActConfig,
    in_flight: Option<InFlight>,
    timeouts: u32,
    weight: f32,
}

impl PlanAct {
    pub fn new(goal: impl Into<PlanGoal>, path_key: BbKey<Vec<MoveAction>>) -> Self {
        let config = PlanActConfig::default();
        Self {
            goal: goal.into(),
            path_key,
            config,
            in_flight: None,
            timeouts: 0,
            weight: config.heuristic_weight,
        }
    }

    pub fn with_config(mut self, config: PlanActConfig) -> Self {
        self.config = config;
        self.weight = config.heuristic_weight;
        self
    }

    pub fn timeouts(&self) -> u32 {
        self.timeouts
    }

    /// Heuristic weight the next (or current) request uses.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    fn request<W>(&mut self, ctx: &mut ActContext<'_, W>, goal: GoalRegion) -> Status
    where
        W: NavWorldMut + 'static,
    {
        let Some(start) = ctx.world.position(ctx.agent) else {
            debug!(agent = ?ctx.agent, "agent has no position; cannot plan");
            return self.fail();
        };
        let request = PlanRequest::new(start, goal)
            .with_max_expansions(self.config.max_expansions)
            .with_heuristic_weight(self.weight)
            .with_mobility(ctx.world.mobility(ctx.agent));
        let snapshot = ctx.world.terrain_snapshot();

        match ctx
            .planner
            .subscriber
            .send(ctx.planner.service, request, snapshot)
        {
            Ok(seq) => {
                self.in_flight = Some(InFlight { goal, seq });
                ctx.emit("plan.request", seq, u64::from(self.timeouts));
                Status::Running
            }
            Err(err) => {
                warn!(agent = ?ctx.agent, error = %err, "plan request rejected");
                self.fail()
            }
        }
    }

    fn fail(&mut self) -> Status {
        self.clear();
        Status::Failure
    }

    fn clear(&mut self) {
        self.in_flight = None;
        self.timeouts = 0;
        self.weight = self.config.heuristic_weight;
    }
}

impl<W> Act<W> for PlanAct
where
    W: NavWorldMut + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        let Some(in_flight) = self.in_flight else {
            let Some(goal) = self.goal.resolve(ctx) else {
                debug!(agent = ?ctx.agent, goal = ?self.goal, "plan goal missing from blackboard");
                return self.fail();
            };
            return self.request(ctx, goal);
        };

        let Some(response) = ctx.planner.subscriber.poll() else {
            return Status::Running;
        };
        self.in_flight = None;

        if response.success {
            debug!(
                agent = ?ctx.agent,
                steps = response.path.len(),
                expansions = response.expansions,
                "plan ready"
            );
            ctx.emit("plan.success", response.path.len() as u64, response.expansions as u64);
            ctx.blackboard.set(self.path_key, response.path);
            self.clear();
            return Status::Success;
        }

        self.timeouts += 1;
        ctx.emit("plan.timeout", u64::from(self.timeouts), response.expansions as u64);
        if self.timeouts > self.config.max_timeouts {
            debug!(
                agent = ?ctx.agent,
                timeouts = self.timeouts,
                goal = ?in_flight.goal,
                "giving up on plan"
            );
            ctx.emit("plan.failed", in_flight.seq, u64::from(self.timeouts));
            return self.fail();
        }

        self.weight *= self.config.weight_escalation;
        debug!(
            agent = ?ctx.agent,
            timeouts = self.timeouts,
            weight = self.weight,
            "re-planning with wider weight"
        );
        self.request(ctx, in_flight.goal)
    }

    fn on_canceled(&mut self, ctx: &mut ActContext<'_, W>) {
        if self.in_flight.is_some() {
            ctx.planner.subscriber.cancel();
            ctx.emit("plan.canceled", 0, 0);
        }
        self.clear();
    }

    fn reset(&mut self) {
        self.clear();
    }
}
