use delve_core::{TickContext, WorldMut, WorldView};

use crate::Task;

/// Supplies work when an agent's queue has nothing feasible (wandering, napping, socialising).
pub trait IdleProvider<W>: 'static
where
    W: WorldMut + 'static,
{
    fn act_on_idle(
        &mut self,
        clock: &TickContext,
        agent: <W as WorldView>::Agent,
        world: &W,
    ) -> Option<Task<W>>;
}

impl<W, F> IdleProvider<W> for F
where
    W: WorldMut + 'static,
    F: FnMut(&TickContext, <W as WorldView>::Agent, &W) -> Option<Task<W>> + 'static,
{
    fn act_on_idle(
        &mut self,
        clock: &TickContext,
        agent: <W as WorldView>::Agent,
        world: &W,
    ) -> Option<Task<W>> {
        self(clock, agent, world)
    }
}
