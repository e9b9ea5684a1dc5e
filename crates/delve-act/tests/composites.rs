mod common;

use common::{slow, step, Burrow, Rig, Tracker};
use delve_act::{
    ActContext, Condition, Parallel, ParallelPolicy, RepeatUntil, Script, ScriptState,
    Selector, Sequence, Wait,
};
use delve_core::Status;

#[test]
fn sequence_resumes_at_running_child() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut seq = Sequence::<Burrow>::new(vec![
        step("a", Status::Success),
        slow("b", 1, Status::Success),
        step("c", Status::Success),
    ]);

    assert_eq!(rig.tick(&mut seq, &mut world), Status::Running);
    assert_eq!(seq.cursor(), 1);
    assert_eq!(rig.tick(&mut seq, &mut world), Status::Success);

    assert_eq!(world.log, vec!["a", "b", "b", "c"]);
    assert_eq!(seq.cursor(), 0);
}

#[test]
fn sequence_fails_on_first_failure() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut seq = Sequence::<Burrow>::new(vec![
        step("a", Status::Success),
        step("b", Status::Failure),
        step("c", Status::Success),
    ]);

    assert_eq!(rig.tick(&mut seq, &mut world), Status::Failure);
    assert_eq!(world.log, vec!["a", "b"]);
}

#[test]
fn selector_returns_first_success_and_resumes() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut sel = Selector::<Burrow>::new(vec![
        step("a", Status::Failure),
        slow("b", 1, Status::Success),
        step("c", Status::Success),
    ]);

    assert_eq!(rig.tick(&mut sel, &mut world), Status::Running);
    assert_eq!(rig.tick(&mut sel, &mut world), Status::Success);
    assert_eq!(world.log, vec!["a", "b", "b"]);
}

#[test]
fn selector_fails_when_every_child_fails() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut sel = Selector::<Burrow>::new(vec![step("a", Status::Failure), step("b", Status::Failure)]);

    assert_eq!(rig.tick(&mut sel, &mut world), Status::Failure);
    assert_eq!(world.log, vec!["a", "b"]);
}

#[test]
fn condition_maps_predicate_to_status() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut cond = Condition::new(|ctx: &ActContext<'_, Burrow>| ctx.world.counter > 0);

    assert_eq!(rig.tick(&mut cond, &mut world), Status::Failure);
    world.counter = 1;
    assert_eq!(rig.tick(&mut cond, &mut world), Status::Success);
}

#[test]
fn parallel_require_all_waits_for_slowest() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut par = Parallel::<Burrow>::new(
        ParallelPolicy::RequireAll,
        vec![Box::new(Wait::ticks(2)), Box::new(Wait::ticks(3))],
    );

    assert_eq!(rig.tick(&mut par, &mut world), Status::Running);
    assert_eq!(rig.tick(&mut par, &mut world), Status::Running);
    assert_eq!(rig.tick(&mut par, &mut world), Status::Success);
}

#[test]
fn parallel_require_all_fails_fast_and_cancels_siblings() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut par = Parallel::<Burrow>::new(
        ParallelPolicy::RequireAll,
        vec![Box::new(Tracker), step("boom", Status::Failure)],
    );

    assert_eq!(rig.tick(&mut par, &mut world), Status::Failure);
    assert_eq!(world.log, vec!["tracker", "boom", "canceled"]);
}

#[test]
fn parallel_require_one_cancels_the_rest() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut par = Parallel::<Burrow>::new(
        ParallelPolicy::RequireOne,
        vec![Box::new(Tracker), slow("quick", 1, Status::Success)],
    );

    assert_eq!(rig.tick(&mut par, &mut world), Status::Running);
    assert_eq!(rig.tick(&mut par, &mut world), Status::Success);
    assert_eq!(
        world.log,
        vec!["tracker", "quick", "tracker", "quick", "canceled"]
    );
}

#[test]
fn parallel_require_one_fails_when_all_fail() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut par = Parallel::<Burrow>::new(
        ParallelPolicy::RequireOne,
        vec![step("a", Status::Failure), slow("b", 1, Status::Failure)],
    );

    assert_eq!(rig.tick(&mut par, &mut world), Status::Running);
    assert_eq!(rig.tick(&mut par, &mut world), Status::Failure);
    assert_eq!(world.log, vec!["a", "b", "b"]);
}

#[test]
fn repeat_until_checks_condition_between_iterations() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let body = delve_act::Do::<Burrow, _>::new(|ctx| {
        ctx.world.counter += 1;
        Status::Success
    });
    let mut repeat = RepeatUntil::<Burrow>::new(
        |ctx: &ActContext<'_, Burrow>| ctx.world.counter >= 3,
        Box::new(body),
    );

    for _ in 0..3 {
        assert_eq!(rig.tick(&mut repeat, &mut world), Status::Running);
    }
    assert_eq!(repeat.iterations(), 3);
    assert_eq!(rig.tick(&mut repeat, &mut world), Status::Success);
    assert_eq!(world.counter, 3);
}

#[test]
fn repeat_until_propagates_body_failure() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut repeat = RepeatUntil::<Burrow>::new(
        |_: &ActContext<'_, Burrow>| false,
        step("fail", Status::Failure),
    );

    assert_eq!(rig.tick(&mut repeat, &mut world), Status::Failure);
}

#[test]
fn cancel_reaches_running_child_only() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut seq = Sequence::<Burrow>::new(vec![step("a", Status::Success), Box::new(Tracker)]);

    assert_eq!(rig.tick(&mut seq, &mut world), Status::Running);
    rig.cancel(&mut seq, &mut world);

    assert_eq!(world.log, vec!["a", "tracker", "canceled"]);
    assert_eq!(seq.cursor(), 0);

    // A sequence that never started has nothing to cancel.
    let mut idle = Sequence::<Burrow>::new(vec![Box::new(Tracker)]);
    rig.cancel(&mut idle, &mut world);
    assert_eq!(world.log.iter().filter(|e| **e == "canceled").count(), 1);
}

#[test]
fn wait_counts_ticks_or_simulated_seconds() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();

    let mut ticks = Wait::ticks(2);
    assert_eq!(rig.tick(&mut ticks, &mut world), Status::Running);
    assert_eq!(rig.tick(&mut ticks, &mut world), Status::Success);

    // The rig advances 0.25s per tick.
    let mut seconds = Wait::seconds(1.0);
    for _ in 0..3 {
        assert_eq!(rig.tick(&mut seconds, &mut world), Status::Running);
    }
    assert_eq!(rig.tick(&mut seconds, &mut world), Status::Success);
}

#[test]
fn script_moves_through_its_states() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut script = Script::<Burrow>::new(slow("dig", 1, Status::Success));
    assert_eq!(script.state(), ScriptState::NotStarted);

    assert_eq!(rig.with_ctx(&mut world, |ctx| script.tick(ctx)), Status::Running);
    assert_eq!(script.state(), ScriptState::Running);
    assert_eq!(rig.with_ctx(&mut world, |ctx| script.tick(ctx)), Status::Success);
    assert_eq!(script.state(), ScriptState::Success);

    // Finished scripts report their outcome without ticking the tree again.
    assert_eq!(rig.with_ctx(&mut world, |ctx| script.tick(ctx)), Status::Success);
    assert_eq!(world.log, vec!["dig", "dig"]);
    assert_eq!(script.ticks(), 2);
}

#[test]
fn script_cancel_invokes_hook_only_while_running() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut script = Script::<Burrow>::from_act(Tracker);

    rig.with_ctx(&mut world, |ctx| script.cancel(ctx));
    assert!(world.log.is_empty());

    rig.with_ctx(&mut world, |ctx| script.tick(ctx));
    rig.with_ctx(&mut world, |ctx| script.cancel(ctx));

    assert_eq!(world.log, vec!["tracker", "canceled"]);
    assert_eq!(script.state(), ScriptState::NotStarted);
}

#[test]
fn trees_are_reusable_after_completion() {
    let mut rig = Rig::inline();
    let mut world = Burrow::open_room();
    let mut seq = Sequence::<Burrow>::new(vec![step("a", Status::Success), step("b", Status::Success)]);

    assert_eq!(rig.tick(&mut seq, &mut world), Status::Success);
    assert_eq!(rig.tick(&mut seq, &mut world), Status::Success);
    assert_eq!(world.log, vec!["a", "b", "a", "b"]);
    assert!(!seq.is_empty());
}
