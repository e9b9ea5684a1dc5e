use delve_core::{Status, WorldMut};

use crate::act::{Act, ActContext, BoxedAct};

/// Runs children left to right, resuming at the running child. Fails on the first failure.
pub struct Sequence<W>
where
    W: WorldMut + 'static,
{
    children: Vec<BoxedAct<W>>,
    index: usize,
    running: bool,
}

impl<W> Sequence<W>
where
    W: WorldMut + 'static,
{
    pub fn new(children: Vec<BoxedAct<W>>) -> Self {
        Self {
            children,
            index: 0,
            running: false,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Index of the child that will be ticked next.
    pub fn cursor(&self) -> usize {
        self.index
    }
}

impl<W> Act<W> for Sequence<W>
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx) {
                Status::Running => {
                    self.running = true;
                    return Status::Running;
                }
                Status::Failure => {
                    self.reset();
                    return Status::Failure;
                }
                Status::Success => {
                    self.running = false;
                    self.index += 1;
                }
            }
        }

        self.reset();
        Status::Success
    }

    fn on_canceled(&mut self, ctx: &mut ActContext<'_, W>) {
        if self.running {
            if let Some(child) = self.children.get_mut(self.index) {
                child.on_canceled(ctx);
            }
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.index = 0;
        self.running = false;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

/// Tries children left to right, resuming at the running child. Succeeds on the first success.
pub struct Selector<W>
where
    W: WorldMut + 'static,
{
    children: Vec<BoxedAct<W>>,
    index: usize,
    running: bool,
}

impl<W> Selector<W>
where
    W: WorldMut + 'static,
{
    pub fn new(children: Vec<BoxedAct<W>>) -> Self {
        Self {
            children,
            index: 0,
            running: false,
        }
    }
}

impl<W> Act<W> for Selector<W>
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        while self.index < self.children.len() {
            match self.children[self.index].tick(ctx) {
                Status::Running => {
                    self.running = true;
                    return Status::Running;
                }
                Status::Success => {
                    self.reset();
                    return Status::Success;
                }
                Status::Failure => {
                    self.running = false;
                    self.index += 1;
                }
            }
        }

        self.reset();
        Status::Failure
    }

    fn on_canceled(&mut self, ctx: &mut ActContext<'_, W>) {
        if self.running {
            if let Some(child) = self.children.get_mut(self.index) {
                child.on_canceled(ctx);
            }
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.index = 0;
        self.running = false;
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallelPolicy {
    /// Succeed once every child has succeeded; fail as soon as one fails.
    RequireAll,
    /// Succeed as soon as one child succeeds; fail once every child has failed.
    RequireOne,
}

/// Ticks every unfinished child each tick. Children still running when the policy resolves are
/// canceled.
pub struct Parallel<W>
where
    W: WorldMut + 'static,
{
    policy: ParallelPolicy,
    children: Vec<BoxedAct<W>>,
    finished: Vec<Option<Status>>,
    started: bool,
}

impl<W> Parallel<W>
where
    W: WorldMut + 'static,
{
    pub fn new(policy: ParallelPolicy, children: Vec<BoxedAct<W>>) -> Self {
        let finished = vec![None; children.len()];
        Self {
            policy,
            children,
            finished,
            started: false,
        }
    }

    fn cancel_unfinished(&mut self, ctx: &mut ActContext<'_, W>) {
        for (child, done) in self.children.iter_mut().zip(self.finished.iter()) {
            if done.is_none() {
                child.on_canceled(ctx);
            }
        }
    }

    fn finish(&mut self, ctx: &mut ActContext<'_, W>, status: Status) -> Status {
        self.cancel_unfinished(ctx);
        self.reset();
        status
    }
}

impl<W> Act<W> for Parallel<W>
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        self.started = true;
        for (child, done) in self.children.iter_mut().zip(self.finished.iter_mut()) {
            if done.is_some() {
                continue;
            }
            let status = child.tick(ctx);
            if !status.is_running() {
                *done = Some(status);
            }
        }

        let successes = self
            .finished
            .iter()
            .filter(|s| **s == Some(Status::Success))
            .count();
        let failures = self
            .finished
            .iter()
            .filter(|s| **s == Some(Status::Failure))
            .count();
        let total = self.children.len();

        match self.policy {
            ParallelPolicy::RequireAll if failures > 0 => self.finish(ctx, Status::Failure),
            ParallelPolicy::RequireAll if successes == total => self.finish(ctx, Status::Success),
            ParallelPolicy::RequireOne if successes > 0 => self.finish(ctx, Status::Success),
            ParallelPolicy::RequireOne if failures == total => self.finish(ctx, Status::Failure),
            _ => Status::Running,
        }
    }

    fn on_canceled(&mut self, ctx: &mut ActContext<'_, W>) {
        if self.started {
            self.cancel_unfinished(ctx);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.started = false;
        for done in self.finished.iter_mut() {
            *done = None;
        }
        for c in self.children.iter_mut() {
            c.reset();
        }
    }
}

type UntilFn<W> = Box<dyn FnMut(&ActContext<'_, W>) -> bool>;

/// Re-runs `body` until `until` holds (checked before every iteration). Fails if the body fails.
pub struct RepeatUntil<W>
where
    W: WorldMut + 'static,
{
    until: UntilFn<W>,
    body: BoxedAct<W>,
    running: bool,
    iterations: u32,
}

impl<W> RepeatUntil<W>
where
    W: WorldMut + 'static,
{
    pub fn new<F>(until: F, body: BoxedAct<W>) -> Self
    where
        F: FnMut(&ActContext<'_, W>) -> bool + 'static,
    {
        Self {
            until: Box::new(until),
            body,
            running: false,
            iterations: 0,
        }
    }

    /// Completed runs of the body since the last reset.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl<W> Act<W> for RepeatUntil<W>
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        if !self.running && (self.until)(&*ctx) {
            self.reset();
            return Status::Success;
        }

        match self.body.tick(ctx) {
            Status::Running => {
                self.running = true;
                Status::Running
            }
            Status::Failure => {
                self.reset();
                Status::Failure
            }
            Status::Success => {
                self.running = false;
                self.iterations = self.iterations.saturating_add(1);
                self.body.reset();
                Status::Running
            }
        }
    }

    fn on_canceled(&mut self, ctx: &mut ActContext<'_, W>) {
        if self.running {
            self.body.on_canceled(ctx);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.running = false;
        self.iterations = 0;
        self.body.reset();
    }
}
