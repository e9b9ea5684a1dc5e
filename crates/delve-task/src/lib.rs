//! Task selection and per-agent scheduling.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod idle;
pub mod priority;
pub mod queue;
pub mod scheduler;
pub mod task;

pub use config::SchedulerConfig;
pub use idle::IdleProvider;
pub use priority::Priority;
pub use queue::TaskQueue;
pub use scheduler::{tick_agents, AgentBrain};
pub use task::{Task, TaskId};
