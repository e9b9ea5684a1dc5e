use delve_core::{Status, WorldMut};

use crate::act::{Act, ActContext, BoxedAct};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptState {
    NotStarted,
    Running,
    Success,
    Failure,
}

impl ScriptState {
    pub fn is_finished(self) -> bool {
        matches!(self, ScriptState::Success | ScriptState::Failure)
    }
}

/// The act tree compiled for one run of a task.
pub struct Script<W>
where
    W: WorldMut + 'static,
{
    root: BoxedAct<W>,
    state: ScriptState,
    ticks: u64,
}

impl<W> Script<W>
where
    W: WorldMut + 'static,
{
    pub fn new(root: BoxedAct<W>) -> Self {
        Self {
            root,
            state: ScriptState::NotStarted,
            ticks: 0,
        }
    }

    pub fn from_act(root: impl Act<W>) -> Self {
        Self::new(Box::new(root))
    }

    pub fn state(&self) -> ScriptState {
        self.state
    }

    /// Ticks spent running since the script was started.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances the root act by one step. A finished script keeps reporting its final status.
    pub fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        match self.state {
            ScriptState::Success => return Status::Success,
            ScriptState::Failure => return Status::Failure,
            ScriptState::NotStarted | ScriptState::Running => {}
        }

        self.ticks += 1;
        let status = self.root.tick(ctx);
        self.state = match status {
            Status::Running => ScriptState::Running,
            Status::Success => ScriptState::Success,
            Status::Failure => ScriptState::Failure,
        };
        status
    }

    /// Interrupts a running script. The root's `on_canceled` runs and the script returns to
    /// `NotStarted`; finished or unstarted scripts are left alone.
    pub fn cancel(&mut self, ctx: &mut ActContext<'_, W>) {
        if self.state != ScriptState::Running {
            return;
        }
        self.root.on_canceled(ctx);
        self.root.reset();
        self.state = ScriptState::NotStarted;
        self.ticks = 0;
    }
}
