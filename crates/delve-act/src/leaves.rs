use std::marker::PhantomData;

use delve_core::{Status, WorldMut};

use crate::act::{Act, ActContext};

/// Succeeds when the predicate holds, fails otherwise. Never runs.
pub struct Condition<W, F> {
    cond: F,
    _world: PhantomData<fn() -> W>,
}

impl<W, F> Condition<W, F>
where
    W: WorldMut + 'static,
    F: FnMut(&ActContext<'_, W>) -> bool + 'static,
{
    pub fn new(cond: F) -> Self {
        Self {
            cond,
            _world: PhantomData,
        }
    }
}

impl<W, F> Act<W> for Condition<W, F>
where
    W: WorldMut + 'static,
    F: FnMut(&ActContext<'_, W>) -> bool + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        Status::from((self.cond)(&*ctx))
    }
}

/// Wraps a closure as a leaf. The closure keeps its own state across ticks if it needs any.
pub struct Do<W, F> {
    body: F,
    _world: PhantomData<fn() -> W>,
}

impl<W, F> Do<W, F>
where
    W: WorldMut + 'static,
    F: FnMut(&mut ActContext<'_, W>) -> Status + 'static,
{
    pub fn new(body: F) -> Self {
        Self {
            body,
            _world: PhantomData,
        }
    }
}

impl<W, F> Act<W> for Do<W, F>
where
    W: WorldMut + 'static,
    F: FnMut(&mut ActContext<'_, W>) -> Status + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        (self.body)(ctx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum WaitFor {
    Ticks(u32),
    Seconds(f32),
}

/// Runs until a number of ticks or an amount of simulated time has passed.
///
/// The tick on which the duration is reached returns `Success`.
#[derive(Debug, Clone)]
pub struct Wait {
    duration: WaitFor,
    ticks: u32,
    seconds: f32,
}

impl Wait {
    pub fn ticks(ticks: u32) -> Self {
        Self {
            duration: WaitFor::Ticks(ticks),
            ticks: 0,
            seconds: 0.0,
        }
    }

    pub fn seconds(seconds: f32) -> Self {
        Self {
            duration: WaitFor::Seconds(seconds),
            ticks: 0,
            seconds: 0.0,
        }
    }
}

impl<W> Act<W> for Wait
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &mut ActContext<'_, W>) -> Status {
        self.ticks = self.ticks.saturating_add(1);
        self.seconds += ctx.clock.dt_seconds;
        let done = match self.duration {
            WaitFor::Ticks(n) => self.ticks >= n,
            WaitFor::Seconds(s) => self.seconds >= s,
        };
        if done {
            Act::<W>::reset(self);
            Status::Success
        } else {
            Status::Running
        }
    }

    fn reset(&mut self) {
        self.ticks = 0;
        self.seconds = 0.0;
    }
}
