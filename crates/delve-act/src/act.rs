use delve_core::{Blackboard, TickContext, TraceEvent, TraceLog, WorldMut};
use delve_plan::{PlanService, PlanSubscriber};

/// The agent's connection to the planning service for the duration of one tick.
pub struct PlanLink<'a> {
    pub service: &'a PlanService,
    pub subscriber: &'a mut PlanSubscriber,
}

/// Everything an act may touch while it is being ticked.
pub struct ActContext<'a, W>
where
    W: WorldMut,
{
    pub clock: &'a TickContext,
    pub agent: W::Agent,
    pub world: &'a mut W,
    pub blackboard: &'a mut Blackboard,
    pub planner: PlanLink<'a>,
    pub trace: &'a mut TraceLog,
}

impl<W> ActContext<'_, W>
where
    W: WorldMut,
{
    pub fn emit(&mut self, tag: &'static str, a: u64, b: u64) {
        let event = TraceEvent::new(self.clock.tick, tag).with_a(a).with_b(b);
        self.trace.push(event);
    }
}

/// One suspendable step of a script.
///
/// Anything that has to survive between ticks lives in the act itself. `reset` returns the act to
/// its initial state so a composite can run it again; `on_canceled` is called instead of another
/// `tick` when a running act is interrupted and must undo transient world state.
pub trait Act<W>: 'static
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> delve_core::Status;

    fn on_canceled(&mut self, _ctx: &mut ActContext<'_, W>) {
        self.reset();
    }

    fn reset(&mut self) {}
}

pub type BoxedAct<W> = Box<dyn Act<W>>;
