use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;

use delve_nav::SharedTerrain;
use tracing::debug;

use crate::worker::{Envelope, Job};
use crate::{PlanError, PlanRequest, PlanResponse, PlanService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(pub u64);

/// One agent's endpoint on the planning service.
///
/// Holds at most one outstanding request. Responses arrive on a bounded queue private to this
/// subscriber; anything answering an older request is discarded when polled.
#[derive(Debug)]
pub struct PlanSubscriber {
    id: SubscriberId,
    reply: SyncSender<Envelope>,
    responses: Receiver<Envelope>,
    next_seq: u64,
    awaiting: Option<u64>,
    /// Sequence number workers may still answer; anything else is stale.
    latest: Arc<AtomicU64>,
}

impl PlanSubscriber {
    pub(crate) fn new(id: SubscriberId, capacity: usize) -> Self {
        let (reply, responses) = mpsc::sync_channel(capacity);
        Self {
            id,
            reply,
            responses,
            next_seq: 0,
            awaiting: None,
            latest: Arc::new(AtomicU64::new(u64::MAX)),
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Whether a request has been sent and its response not yet polled.
    pub fn is_pending(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Queues `request` against `terrain` without blocking and returns its sequence number.
    ///
    /// Supersedes any request still in flight.
    pub fn send(
        &mut self,
        service: &PlanService,
        request: PlanRequest,
        terrain: SharedTerrain,
    ) -> Result<u64, PlanError> {
        let weight = request.heuristic_weight;
        if !weight.is_finite() || weight < 1.0 {
            return Err(PlanError::InvalidWeight(weight));
        }
        if let Some(previous) = self.awaiting {
            debug!(subscriber = self.id.0, previous, "superseding plan request");
        }
        self.discard_queued();

        let seq = self.next_seq;
        self.next_seq += 1;
        self.awaiting = Some(seq);
        self.latest.store(seq, Ordering::Release);

        let job = Job {
            subscriber: self.id,
            seq,
            request,
            terrain,
            reply: self.reply.clone(),
            latest: Arc::clone(&self.latest),
        };
        if let Err(err) = service.dispatch(job) {
            self.awaiting = None;
            self.latest.store(u64::MAX, Ordering::Release);
            return Err(err);
        }
        Ok(seq)
    }

    /// Takes the response to the latest request if it has arrived.
    pub fn poll(&mut self) -> Option<PlanResponse> {
        let Some(awaiting) = self.awaiting else {
            self.discard_queued();
            return None;
        };
        while let Ok(envelope) = self.responses.try_recv() {
            if envelope.seq == awaiting {
                self.awaiting = None;
                return Some(envelope.response);
            }
        }
        None
    }

    /// Forgets the outstanding request; its response is never returned.
    pub fn cancel(&mut self) {
        if let Some(seq) = self.awaiting.take() {
            debug!(subscriber = self.id.0, seq, "plan request canceled");
        }
        self.latest.store(u64::MAX, Ordering::Release);
        self.discard_queued();
    }

    fn discard_queued(&mut self) {
        while self.responses.try_recv().is_ok() {}
    }
}
