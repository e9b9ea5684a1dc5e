//! Deterministic, engine-agnostic primitives shared by the creature AI crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod cell;
pub mod motion;
pub mod rng;
pub mod status;
pub mod tick;
pub mod trace;
pub mod world;

pub use agent::AgentId;
pub use blackboard::{BbKey, BbType, BbValue, Blackboard};
pub use cell::{Bounds, Cell};
pub use motion::{EntityId, Mobility, MoveAction, MoveType, WindowOffset};
pub use rng::{DeterministicRng, SplitMix64};
pub use status::{Outcome, Status};
pub use tick::TickContext;
pub use trace::{TraceEvent, TraceLog};
pub use world::{WorldMut, WorldView};
