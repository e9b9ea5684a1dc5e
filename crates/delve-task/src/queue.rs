use delve_core::{WorldMut, WorldView};
use tracing::{debug, trace};

use crate::{Priority, Task, TaskId};

/// An agent's pending tasks, in insertion order.
///
/// Selection never depends on anything but that order and the tasks' own answers, so two queues
/// built the same way always choose the same task.
pub struct TaskQueue<W>
where
    W: WorldMut + 'static,
{
    tasks: Vec<Task<W>>,
    next_id: u64,
}

impl<W> Default for TaskQueue<W>
where
    W: WorldMut + 'static,
{
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl<W> TaskQueue<W>
where
    W: WorldMut + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task<W>> {
        self.tasks.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Task<W>> {
        self.tasks.get(index)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id() == Some(id))
    }

    /// Gives `task` an id if it has none yet and returns it.
    pub fn assign_id(&mut self, task: &mut Task<W>) -> TaskId {
        match task.id() {
            Some(id) => {
                self.next_id = self.next_id.max(id.0.saturating_add(1));
                id
            }
            None => {
                let id = TaskId(self.next_id);
                self.next_id += 1;
                task.set_id(id);
                id
            }
        }
    }

    /// Queues `task`. A task whose id is already queued is handed back unchanged.
    pub fn push(&mut self, mut task: Task<W>) -> Result<TaskId, Task<W>> {
        if let Some(id) = task.id() {
            if self.contains(id) {
                trace!(task = task.name(), %id, "task already queued");
                return Err(task);
            }
        }
        let id = self.assign_id(&mut task);
        self.tasks.push(task);
        Ok(id)
    }

    /// Index of the task to run next: feasible with a finite cost, highest priority, then lowest
    /// cost; the earliest queued wins ties.
    pub fn select_best(&self, agent: <W as WorldView>::Agent, world: &W) -> Option<usize> {
        let mut best: Option<(usize, Priority, f32)> = None;
        for (i, task) in self.tasks.iter().enumerate() {
            if !task.is_feasible(agent, world) {
                continue;
            }
            let cost = task.cost(agent, world);
            if !cost.is_finite() {
                continue;
            }
            let priority = task.priority();
            let better = match best {
                None => true,
                Some((_, p, c)) => priority > p || (priority == p && cost < c),
            };
            if better {
                best = Some((i, priority, cost));
            }
        }
        best.map(|(i, _, _)| i)
    }

    pub fn pop_best(&mut self, agent: <W as WorldView>::Agent, world: &W) -> Option<Task<W>> {
        let index = self.select_best(agent, world)?;
        Some(self.tasks.remove(index))
    }

    /// The task that should interrupt one running at `current`, if any ranks strictly higher.
    pub fn preempt_candidate(
        &self,
        current: Priority,
        agent: <W as WorldView>::Agent,
        world: &W,
    ) -> Option<usize> {
        let index = self.select_best(agent, world)?;
        self.tasks[index]
            .priority()
            .outranks(current)
            .then_some(index)
    }

    /// Drops tasks whose delete predicate holds. Returns how many were removed.
    pub fn prune(&mut self, agent: <W as WorldView>::Agent, world: &W) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| {
            let delete = task.should_delete(agent, world);
            if delete {
                debug!(agent = ?agent, task = task.name(), "pruned task");
            }
            !delete
        });
        before - self.tasks.len()
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task<W>> {
        let index = self.tasks.iter().position(|t| t.id() == Some(id))?;
        Some(self.tasks.remove(index))
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
