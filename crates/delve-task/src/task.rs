use std::borrow::Cow;
use std::fmt;

use delve_act::Script;
use delve_core::{WorldMut, WorldView};

use crate::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Agent<W> = <W as WorldView>::Agent;
type CostFn<W> = Box<dyn Fn(Agent<W>, &W) -> f32>;
type PredicateFn<W> = Box<dyn Fn(Agent<W>, &W) -> bool>;
type ScriptFactory<W> = Box<dyn FnMut(Agent<W>, &W) -> Script<W>>;

/// A unit of work an agent can choose to do.
///
/// The script is not built until the task is selected, and is rebuilt for every run.
pub struct Task<W>
where
    W: WorldMut + 'static,
{
    name: Cow<'static, str>,
    id: Option<TaskId>,
    priority: Priority,
    auto_retry: bool,
    attempts: u32,
    cost: CostFn<W>,
    feasible: PredicateFn<W>,
    should_delete: PredicateFn<W>,
    should_retry: Option<PredicateFn<W>>,
    script: ScriptFactory<W>,
}

impl<W> Task<W>
where
    W: WorldMut + 'static,
{
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        priority: Priority,
        script: impl FnMut(Agent<W>, &W) -> Script<W> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            id: None,
            priority,
            auto_retry: false,
            attempts: 0,
            cost: Box::new(|_, _| 0.0),
            feasible: Box::new(|_, _| true),
            should_delete: Box::new(|_, _| false),
            should_retry: None,
            script: Box::new(script),
        }
    }

    /// Estimated effort. Infinite or NaN marks the task infeasible.
    pub fn with_cost(mut self, cost: impl Fn(Agent<W>, &W) -> f32 + 'static) -> Self {
        self.cost = Box::new(cost);
        self
    }

    pub fn with_feasible(mut self, feasible: impl Fn(Agent<W>, &W) -> bool + 'static) -> Self {
        self.feasible = Box::new(feasible);
        self
    }

    /// Queued tasks for which this holds are pruned, and a running one is abandoned.
    pub fn with_should_delete(
        mut self,
        should_delete: impl Fn(Agent<W>, &W) -> bool + 'static,
    ) -> Self {
        self.should_delete = Box::new(should_delete);
        self
    }

    /// Overrides `auto_retry` with a world-dependent decision.
    pub fn with_should_retry(
        mut self,
        should_retry: impl Fn(Agent<W>, &W) -> bool + 'static,
    ) -> Self {
        self.should_retry = Some(Box::new(should_retry));
        self
    }

    pub fn with_auto_retry(mut self, auto_retry: bool) -> Self {
        self.auto_retry = auto_retry;
        self
    }

    /// Pins the id, for producers that re-issue the same logical task (designations, orders).
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<TaskId> {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: TaskId) {
        self.id = Some(id);
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn demote(&mut self) {
        self.priority = self.priority.demoted();
    }

    pub fn auto_retry(&self) -> bool {
        self.auto_retry
    }

    /// Number of scripts built for this task so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn cost(&self, agent: Agent<W>, world: &W) -> f32 {
        (self.cost)(agent, world)
    }

    pub fn is_feasible(&self, agent: Agent<W>, world: &W) -> bool {
        (self.feasible)(agent, world)
    }

    pub fn should_delete(&self, agent: Agent<W>, world: &W) -> bool {
        (self.should_delete)(agent, world)
    }

    pub fn should_retry(&self, agent: Agent<W>, world: &W) -> bool {
        match &self.should_retry {
            Some(f) => f(agent, world),
            None => self.auto_retry,
        }
    }

    pub fn build_script(&mut self, agent: Agent<W>, world: &W) -> Script<W> {
        self.attempts = self.attempts.saturating_add(1);
        (self.script)(agent, world)
    }
}

impl<W> fmt::Debug for Task<W>
where
    W: WorldMut + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("auto_retry", &self.auto_retry)
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}
