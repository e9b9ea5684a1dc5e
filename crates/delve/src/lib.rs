//! Umbrella crate that re-exports the `delve-*` building blocks.
//!
//! A creature's tick runs through the layers bottom to top: the [`task`] scheduler picks work
//! from the agent's queue, runs its [`act`] script, which asks the [`plan`] service for routes
//! over the [`nav`] movement graph, all on the [`core`] primitives.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use delve_core as core;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use delve_nav as nav;

#[cfg(feature = "plan")]
#[cfg_attr(docsrs, doc(cfg(feature = "plan")))]
pub use delve_plan as plan;

#[cfg(feature = "act")]
#[cfg_attr(docsrs, doc(cfg(feature = "act")))]
pub use delve_act as act;

#[cfg(feature = "task")]
#[cfg_attr(docsrs, doc(cfg(feature = "task")))]
pub use delve_task as task;

/// The names most colony code needs.
#[cfg(feature = "full")]
pub mod prelude {
    pub use delve_act::{
        go_to, Act, ActContext, Condition, Do, FollowPath, Parallel, ParallelPolicy, PlanAct,
        PlanActConfig, PlanGoal, RepeatUntil, Script, Selector, Sequence, Wait,
    };
    pub use delve_core::{
        AgentId, BbKey, Blackboard, Cell, Mobility, MoveAction, MoveType, Status, TickContext,
        TraceLog, WorldMut, WorldView,
    };
    pub use delve_nav::{GoalRegion, NavWorldMut, NavWorldView, SharedTerrain, Terrain, VoxelGrid};
    pub use delve_plan::{PlanService, PlanServiceConfig};
    pub use delve_task::{tick_agents, AgentBrain, IdleProvider, Priority, SchedulerConfig, Task};
}
