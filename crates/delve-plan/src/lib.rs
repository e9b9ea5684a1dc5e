//! Off-tick path planning.
//!
//! Callers hold a [`PlanSubscriber`] (one per agent), send [`PlanRequest`]s through it without
//! blocking and poll for the matching [`PlanResponse`] on later ticks. Searches run on worker
//! threads against immutable terrain snapshots; the request and response channels are the only
//! state shared with the tick thread.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod request;
pub mod service;
pub mod subscriber;
mod worker;

pub use config::{PlanServiceConfig, MIN_RESPONSE_CAPACITY};
pub use error::PlanError;
pub use request::{PlanRequest, PlanResponse};
pub use service::PlanService;
pub use subscriber::{PlanSubscriber, SubscriberId};
