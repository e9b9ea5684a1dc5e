use delve_core::{BbKey, MoveAction, Status};
use delve_nav::NavWorldMut;
use tracing::debug;

use crate::act::{Act, ActContext};
use crate::composites::Sequence;
use crate::plan_act::{PlanAct, PlanGoal};

#[derive(Debug, Clone)]
struct Progress {
    path: Vec<MoveAction>,
    next: usize,
    waited: u32,
}

/// Walks the path stored under `path_key`, one move every `ticks_per_step` ticks.
///
/// Before each move the agent must stand on the move's origin and the movement graph must still
/// offer the move on current terrain; otherwise the path is stale and the act fails.
#[derive(Debug, Clone)]
pub struct FollowPath {
    path_key: BbKey<Vec<MoveAction>>,
    ticks_per_step: u32,
    progress: Option<Progress>,
}

impl FollowPath {
    pub fn new(path_key: BbKey<Vec<MoveAction>>) -> Self {
        Self {
            path_key,
            ticks_per_step: 1,
            progress: None,
        }
    }

    pub fn with_ticks_per_step(mut self, ticks: u32) -> Self {
        self.ticks_per_step = ticks.max(1);
        self
    }

    /// Moves already applied in the current run.
    pub fn steps_taken(&self) -> usize {
        self.progress.as_ref().map_or(0, |p| p.next)
    }

    fn stop<W>(&mut self, ctx: &mut ActContext<'_, W>, status: Status) -> Status
    where
        W: NavWorldMut + 'static,
    {
        ctx.world.set_motion(ctx.agent, None);
        self.progress = None;
        status
    }
}

impl<W> Act<W> for FollowPath
where
    W: NavWorldMut + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        if self.progress.is_none() {
            let Some(path) = ctx.blackboard.get(self.path_key).cloned() else {
                debug!(agent = ?ctx.agent, key = self.path_key.name(), "no path to follow");
                return Status::Failure;
            };
            if path.is_empty() {
                return Status::Success;
            }
            self.progress = Some(Progress {
                path,
                next: 0,
                waited: 0,
            });
        }
        let Some(progress) = self.progress.as_mut() else {
            return Status::Failure;
        };
        let step = progress.path[progress.next];

        progress.waited += 1;
        if progress.waited < self.ticks_per_step {
            ctx.world.set_motion(ctx.agent, Some(step.move_type));
            return Status::Running;
        }
        progress.waited = 0;
        let index = progress.next;

        let at = ctx.world.position(ctx.agent);
        let mobility = ctx.world.mobility(ctx.agent);
        let valid = at == Some(step.origin())
            && ctx
                .planner
                .service
                .graph()
                .is_valid_step(ctx.world.terrain(), mobility, &step);
        if !valid {
            debug!(
                agent = ?ctx.agent,
                step = index,
                target = %step.target,
                "path went stale"
            );
            ctx.emit("path.stale", index as u64, 0);
            return self.stop(ctx, Status::Failure);
        }

        ctx.world.set_position(ctx.agent, step.target);
        ctx.world.set_motion(ctx.agent, Some(step.move_type));
        ctx.emit("path.step", index as u64, step.move_type as u64);

        let Some(progress) = self.progress.as_mut() else {
            return Status::Failure;
        };
        progress.next += 1;
        if progress.next >= progress.path.len() {
            ctx.emit("path.done", progress.path.len() as u64, 0);
            return self.stop(ctx, Status::Success);
        }
        Status::Running
    }

    fn on_canceled(&mut self, ctx: &mut ActContext<'_, W>) {
        if self.progress.is_some() {
            self.stop(ctx, Status::Failure);
        }
    }

    fn reset(&mut self) {
        self.progress = None;
    }
}

/// Plan to `goal`, then walk there.
pub fn go_to<W>(goal: impl Into<PlanGoal>, path_key: BbKey<Vec<MoveAction>>) -> Sequence<W>
where
    W: NavWorldMut + 'static,
{
    Sequence::new(vec![
        Box::new(PlanAct::new(goal, path_key)),
        Box::new(FollowPath::new(path_key)),
    ])
}
