use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, SyncSender, TryRecvError, TrySendError};

use delve_nav::{find_path, MovementGraph, SharedTerrain};
use tracing::{debug, trace, warn};

use crate::{PlanRequest, PlanResponse, SubscriberId};

pub(crate) struct Envelope {
    pub seq: u64,
    pub response: PlanResponse,
}

pub(crate) struct Job {
    pub subscriber: SubscriberId,
    pub seq: u64,
    pub request: PlanRequest,
    pub terrain: SharedTerrain,
    pub reply: SyncSender<Envelope>,
    pub latest: Arc<AtomicU64>,
}

impl Job {
    /// The subscriber has sent a newer request or canceled this one.
    pub fn is_stale(&self) -> bool {
        self.latest.load(Ordering::Acquire) != self.seq
    }
}

pub(crate) fn solve(graph: &MovementGraph, job: &Job) -> PlanResponse {
    let request = &job.request;
    let outcome = find_path(
        graph,
        &*job.terrain,
        request.start,
        &request.goal,
        request.mobility,
        request.limits(),
    );
    trace!(
        subscriber = job.subscriber.0,
        seq = job.seq,
        expansions = outcome.expansions,
        success = outcome.path.is_some(),
        exhausted = outcome.budget_exhausted,
        "plan solved"
    );
    match outcome.path {
        Some(path) => PlanResponse {
            success: true,
            path,
            expansions: outcome.expansions,
        },
        None => PlanResponse::failed(outcome.expansions),
    }
}

/// Stale answers are dropped here rather than queued, so they never hold a slot the latest
/// answer needs.
pub(crate) fn deliver(job: Job, response: PlanResponse) {
    if job.is_stale() {
        trace!(subscriber = job.subscriber.0, seq = job.seq, "superseded while solving");
        return;
    }
    let envelope = Envelope {
        seq: job.seq,
        response,
    };
    match job.reply.try_send(envelope) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            warn!(
                subscriber = job.subscriber.0,
                seq = job.seq,
                "response queue full; dropping plan"
            );
        }
        Err(TrySendError::Disconnected(_)) => {
            trace!(subscriber = job.subscriber.0, "subscriber gone; dropping plan");
        }
    }
}

/// Drains the request channel into a local backlog before each search so a job whose subscriber
/// has already queued a newer request is skipped without being solved.
pub(crate) fn worker_main(index: usize, graph: MovementGraph, requests: Receiver<Job>) {
    debug!(worker = index, "planning worker started");
    let mut backlog: VecDeque<Job> = VecDeque::new();
    let mut solved: u64 = 0;
    let mut skipped: u64 = 0;

    loop {
        if backlog.is_empty() {
            match requests.recv() {
                Ok(job) => backlog.push_back(job),
                Err(_) => break,
            }
        }
        loop {
            match requests.try_recv() {
                Ok(job) => backlog.push_back(job),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        let Some(job) = backlog.pop_front() else {
            continue;
        };
        if job.is_stale() || backlog.iter().any(|queued| queued.subscriber == job.subscriber) {
            trace!(
                worker = index,
                subscriber = job.subscriber.0,
                seq = job.seq,
                "superseded before solving"
            );
            skipped += 1;
            continue;
        }

        let response = solve(&graph, &job);
        deliver(job, response);
        solved += 1;
    }

    debug!(worker = index, solved, skipped, "planning worker stopped");
}
