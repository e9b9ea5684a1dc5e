use delve_act::{ActContext, PlanLink, Script, ScriptState};
use delve_core::{AgentId, Blackboard, Status, TickContext, TraceEvent, TraceLog, WorldMut, WorldView};
use delve_plan::{PlanService, PlanSubscriber};
use tracing::{debug, trace};

use crate::{IdleProvider, SchedulerConfig, Task, TaskId, TaskQueue};

struct Current<W>
where
    W: WorldMut + 'static,
{
    task: Task<W>,
    script: Script<W>,
}

/// One agent's scheduling state: its queue, the task it is running and its planning endpoint.
///
/// Call [`AgentBrain::tick`] exactly once per simulation tick.
pub struct AgentBrain<W>
where
    W: WorldMut + 'static,
{
    agent: <W as WorldView>::Agent,
    config: SchedulerConfig,
    pub blackboard: Blackboard,
    queue: TaskQueue<W>,
    current: Option<Current<W>>,
    idle: Option<Box<dyn IdleProvider<W>>>,
    subscriber: PlanSubscriber,
    trace: TraceLog,
    idle_ticks: u64,
    ticks_on_task: u64,
}

impl<W> AgentBrain<W>
where
    W: WorldMut + 'static,
{
    pub fn new(agent: <W as WorldView>::Agent, planner: &PlanService) -> Self {
        Self {
            agent,
            config: SchedulerConfig::default(),
            blackboard: Blackboard::new(),
            queue: TaskQueue::new(),
            current: None,
            idle: None,
            subscriber: planner.subscribe(),
            trace: TraceLog::default(),
            idle_ticks: 0,
            ticks_on_task: 0,
        }
    }

    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self.trace.set_enabled(config.record_trace);
        self
    }

    pub fn with_idle(mut self, idle: impl IdleProvider<W>) -> Self {
        self.idle = Some(Box::new(idle));
        self
    }

    pub fn agent(&self) -> <W as WorldView>::Agent {
        self.agent
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn queue(&self) -> &TaskQueue<W> {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut TaskQueue<W> {
        &mut self.queue
    }

    pub fn push(&mut self, task: Task<W>) -> Result<TaskId, Task<W>> {
        self.queue.push(task)
    }

    pub fn current_task(&self) -> Option<&Task<W>> {
        self.current.as_ref().map(|c| &c.task)
    }

    pub fn script_state(&self) -> Option<ScriptState> {
        self.current.as_ref().map(|c| c.script.state())
    }

    /// Consecutive ticks that started without a current task.
    pub fn idle_ticks(&self) -> u64 {
        self.idle_ticks
    }

    /// Ticks the current task has been running.
    pub fn ticks_on_task(&self) -> u64 {
        self.ticks_on_task
    }

    pub fn trace(&self) -> &TraceLog {
        &self.trace
    }

    pub fn trace_mut(&mut self) -> &mut TraceLog {
        &mut self.trace
    }

    pub fn subscriber(&self) -> &PlanSubscriber {
        &self.subscriber
    }

    pub fn tick(&mut self, clock: &TickContext, world: &mut W, planner: &PlanService) {
        if self.current.is_some() {
            self.ticks_on_task += 1;
            self.idle_ticks = 0;
        } else {
            self.idle_ticks += 1;
        }

        self.queue.prune(self.agent, world);
        let deleted = self
            .current
            .as_ref()
            .is_some_and(|c| c.task.should_delete(self.agent, &*world));
        if deleted {
            self.interrupt(clock, world, planner, "task.deleted", false);
        }

        let running_at = self.current.as_ref().map(|c| c.task.priority());
        if let Some(priority) = running_at {
            if self
                .queue
                .preempt_candidate(priority, self.agent, &*world)
                .is_some()
            {
                self.interrupt(clock, world, planner, "task.preempted", true);
            }
        }

        self.run_current(clock, world, planner);

        if self.current.is_none() {
            self.select_next(clock, world);
        }
    }

    /// Stops the current task without re-queueing it.
    pub fn cancel_current(&mut self, clock: &TickContext, world: &mut W, planner: &PlanService) {
        self.interrupt(clock, world, planner, "task.canceled", false);
    }

    fn emit(&mut self, clock: &TickContext, tag: &'static str, task: Option<TaskId>) {
        let id = task.map_or(0, |id| id.0);
        self.trace.push(TraceEvent::new(clock.tick, tag).with_a(id).with_b(self.agent.stable_id()));
    }

    fn retry_allowed(&self, task: &Task<W>, world: &W) -> bool {
        let under_cap = self
            .config
            .max_attempts
            .map_or(true, |max| task.attempts() < max);
        under_cap && task.should_retry(self.agent, world)
    }

    fn requeue(&mut self, task: Task<W>) {
        if let Err(task) = self.queue.push(task) {
            debug!(agent = ?self.agent, task = task.name(), "duplicate task not re-queued");
        }
    }

    fn interrupt(
        &mut self,
        clock: &TickContext,
        world: &mut W,
        planner: &PlanService,
        tag: &'static str,
        allow_retry: bool,
    ) {
        let Some(mut current) = self.current.take() else {
            return;
        };
        {
            let mut ctx = ActContext {
                clock,
                agent: self.agent,
                world: &mut *world,
                blackboard: &mut self.blackboard,
                planner: PlanLink {
                    service: planner,
                    subscriber: &mut self.subscriber,
                },
                trace: &mut self.trace,
            };
            current.script.cancel(&mut ctx);
        }
        self.subscriber.cancel();
        self.ticks_on_task = 0;

        let task = current.task;
        self.emit(clock, tag, task.id());
        if allow_retry && task.should_retry(self.agent, world) {
            debug!(agent = ?self.agent, task = task.name(), reason = tag, "task interrupted; re-queued");
            self.requeue(task);
        } else {
            debug!(agent = ?self.agent, task = task.name(), reason = tag, "task interrupted; dropped");
        }
    }

    fn run_current(&mut self, clock: &TickContext, world: &mut W, planner: &PlanService) {
        let Some(current) = self.current.as_mut() else {
            return;
        };
        let status = {
            let mut ctx = ActContext {
                clock,
                agent: self.agent,
                world: &mut *world,
                blackboard: &mut self.blackboard,
                planner: PlanLink {
                    service: planner,
                    subscriber: &mut self.subscriber,
                },
                trace: &mut self.trace,
            };
            current.script.tick(&mut ctx)
        };
        if status == Status::Running {
            return;
        }

        let Some(current) = self.current.take() else {
            return;
        };
        self.subscriber.cancel();
        self.ticks_on_task = 0;
        let mut task = current.task;

        if status == Status::Success {
            debug!(agent = ?self.agent, task = task.name(), "task done");
            self.emit(clock, "task.done", task.id());
            return;
        }

        if self.retry_allowed(&task, world) {
            let from = task.priority();
            task.demote();
            debug!(
                agent = ?self.agent,
                task = task.name(),
                %from,
                to = %task.priority(),
                attempts = task.attempts(),
                "task failed; retrying"
            );
            self.emit(clock, "task.retry", task.id());
            self.requeue(task);
        } else {
            debug!(agent = ?self.agent, task = task.name(), attempts = task.attempts(), "task failed");
            self.emit(clock, "task.failed", task.id());
        }
    }

    fn select_next(&mut self, clock: &TickContext, world: &W) {
        let task = match self.queue.pop_best(self.agent, world) {
            Some(task) => Some(task),
            None => self.idle_task(clock, world),
        };
        let Some(mut task) = task else {
            return;
        };

        let script = task.build_script(self.agent, world);
        trace!(
            agent = ?self.agent,
            task = task.name(),
            priority = %task.priority(),
            attempt = task.attempts(),
            "task started"
        );
        self.emit(clock, "task.start", task.id());
        self.ticks_on_task = 0;
        self.current = Some(Current { task, script });
    }

    fn idle_task(&mut self, clock: &TickContext, world: &W) -> Option<Task<W>> {
        let idle = self.idle.as_mut()?;
        let mut task = idle.act_on_idle(clock, self.agent, world)?;
        if !task.is_feasible(self.agent, world) {
            return None;
        }
        self.queue.assign_id(&mut task);
        Some(task)
    }
}

/// Ticks every brain once, in stable agent id order.
pub fn tick_agents<W>(
    clock: &TickContext,
    world: &mut W,
    planner: &PlanService,
    brains: &mut [AgentBrain<W>],
) where
    W: WorldMut + 'static,
{
    brains.sort_by_key(|b| b.agent.stable_id());
    for brain in brains.iter_mut() {
        brain.tick(clock, world, planner);
    }
}
