use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use delve_nav::MovementGraph;
use tracing::{debug, info, warn};

use crate::worker::{self, Job};
use crate::config::MIN_RESPONSE_CAPACITY;
use crate::{PlanError, PlanServiceConfig, PlanSubscriber, SubscriberId};

/// Owns the planning workers. Dropping the service closes the request channels and joins them.
pub struct PlanService {
    config: PlanServiceConfig,
    graph: MovementGraph,
    senders: Vec<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    next_subscriber: AtomicU64,
}

impl PlanService {
    pub fn new(mut config: PlanServiceConfig) -> Result<Self, PlanError> {
        if config.response_capacity < MIN_RESPONSE_CAPACITY {
            warn!(
                requested = config.response_capacity,
                used = MIN_RESPONSE_CAPACITY,
                "response capacity raised"
            );
            config.response_capacity = MIN_RESPONSE_CAPACITY;
        }
        let graph = MovementGraph::new(config.rules);
        let mut senders = Vec::with_capacity(config.workers);
        let mut workers = Vec::with_capacity(config.workers);

        for index in 0..config.workers {
            let (tx, rx) = mpsc::channel::<Job>();
            let handle = thread::Builder::new()
                .name(format!("delve-plan-{index}"))
                .spawn(move || worker::worker_main(index, graph, rx))?;
            senders.push(tx);
            workers.push(handle);
        }

        info!(
            workers = config.workers,
            response_capacity = config.response_capacity,
            "planning service started"
        );

        Ok(Self {
            config,
            graph,
            senders,
            workers,
            next_subscriber: AtomicU64::new(0),
        })
    }

    /// Single-threaded service that solves each request during `send`.
    pub fn inline() -> Self {
        Self {
            config: PlanServiceConfig::inline(),
            graph: MovementGraph::default(),
            senders: Vec::new(),
            workers: Vec::new(),
            next_subscriber: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &PlanServiceConfig {
        &self.config
    }

    /// The graph workers search over; callers validate path steps against the same rules.
    pub fn graph(&self) -> &MovementGraph {
        &self.graph
    }

    pub fn is_inline(&self) -> bool {
        self.senders.is_empty()
    }

    pub fn subscribe(&self) -> PlanSubscriber {
        let id = SubscriberId(self.next_subscriber.fetch_add(1, Ordering::Relaxed));
        PlanSubscriber::new(id, self.config.response_capacity.max(MIN_RESPONSE_CAPACITY))
    }

    pub(crate) fn dispatch(&self, job: Job) -> Result<(), PlanError> {
        if self.senders.is_empty() {
            let response = worker::solve(&self.graph, &job);
            worker::deliver(job, response);
            return Ok(());
        }
        let shard = (job.subscriber.0 % self.senders.len() as u64) as usize;
        self.senders[shard]
            .send(job)
            .map_err(|_| PlanError::Shutdown)
    }
}

impl Drop for PlanService {
    fn drop(&mut self) {
        self.senders.clear();
        for handle in self.workers.drain(..) {
            let name = handle.thread().name().map(str::to_owned);
            if handle.join().is_err() {
                warn!(worker = ?name, "planning worker panicked");
            }
        }
        debug!("planning service stopped");
    }
}

impl std::fmt::Debug for PlanService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanService")
            .field("config", &self.config)
            .field("workers", &self.workers.len())
            .finish()
    }
}
