//! Tasks the sample colonists know how to do.

use delve::act::{go_to, Do, FollowPath, PlanAct, PlanActConfig, PlanGoal, Script, Sequence, Wait};
use delve::core::{BbKey, Cell, DeterministicRng, MoveAction, Status, TickContext};
use delve::nav::{GoalRegion, NavWorldView};
use delve::task::{IdleProvider, Priority, Task};

use crate::colony::{ColonistId, Colony};

const PATH: BbKey<Vec<MoveAction>> = BbKey::new("path");
const DIG_TARGET: BbKey<Cell> = BbKey::new("dig.target");

/// How a colonist moves and plans.
#[derive(Debug, Clone, Copy)]
pub struct Gait {
    pub plan: PlanActConfig,
    pub ticks_per_step: u32,
}

impl Gait {
    fn travel(self, goal: PlanGoal) -> Sequence<Colony> {
        Sequence::new(vec![
            Box::new(PlanAct::new(goal, PATH).with_config(self.plan)),
            Box::new(FollowPath::new(PATH).with_ticks_per_step(self.ticks_per_step)),
        ])
    }
}

/// Walk next to `ore`, swing for `dig_ticks`, then clear it.
pub fn dig(ore: Cell, gait: Gait, dig_ticks: u32) -> Task<Colony> {
    Task::<Colony>::new(format!("dig {ore}"), Priority::Medium, move |_, _| {
        Script::new(Box::new(Sequence::<Colony>::new(vec![
            Box::new(Do::<Colony, _>::new(move |ctx| {
                ctx.blackboard.set(DIG_TARGET, ore);
                Status::Success
            })),
            Box::new(gait.travel(PlanGoal::Adjacent(DIG_TARGET))),
            Box::new(Wait::ticks(dig_ticks)),
            Box::new(Do::<Colony, _>::new(move |ctx| {
                Status::from(ctx.world.dig(ctx.agent, ore))
            })),
        ])))
    })
    .with_cost(move |agent, world: &Colony| match world.position(agent) {
        Some(at) => at.chebyshev(ore) as f32,
        None => f32::INFINITY,
    })
    .with_feasible(move |_, world: &Colony| world.has_ore(ore))
    .with_should_delete(move |_, world: &Colony| !world.has_ore(ore))
    .with_should_retry(move |_, world: &Colony| world.has_ore(ore))
    .with_auto_retry(true)
}

/// Strolls to a random nearby spot and loiters there for a moment.
pub struct Wander {
    pub radius: u32,
}

const WANDER_STREAM: u64 = 0x57A4;

impl IdleProvider<Colony> for Wander {
    fn act_on_idle(
        &mut self,
        clock: &TickContext,
        agent: ColonistId,
        world: &Colony,
    ) -> Option<Task<Colony>> {
        let at = world.position(agent)?;
        let mut rng = clock.rng_for_agent(agent, WANDER_STREAM);
        let spot = at.offset(
            rng.next_offset(self.radius),
            0,
            rng.next_offset(self.radius),
        );
        if spot == at || !world.terrain().bounds().contains(spot) {
            return None;
        }
        let linger = 2 + rng.next_below(6) as u32;

        Some(
            Task::<Colony>::new("wander", Priority::Eventually, move |_, _| {
                Script::new(Box::new(Sequence::<Colony>::new(vec![
                    Box::new(go_to::<Colony>(
                        GoalRegion::Radius {
                            center: spot,
                            radius: 1,
                        },
                        PATH,
                    )),
                    Box::new(Wait::ticks(linger)),
                ])))
            })
            .with_cost(move |_, _| at.chebyshev(spot) as f32),
        )
    }
}
