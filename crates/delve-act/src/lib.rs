//! Behavior scripts built from acts: small state machines ticked once per simulation step.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod act;
pub mod composites;
pub mod follow_path;
pub mod leaves;
pub mod plan_act;
pub mod script;

pub use act::{Act, ActContext, BoxedAct, PlanLink};
pub use composites::{Parallel, ParallelPolicy, RepeatUntil, Selector, Sequence};
pub use follow_path::{go_to, FollowPath};
pub use leaves::{Condition, Do, Wait};
pub use plan_act::{PlanAct, PlanActConfig, PlanGoal};
pub use script::{Script, ScriptState};
