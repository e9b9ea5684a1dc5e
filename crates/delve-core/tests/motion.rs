use delve_core::{
    Bounds, Cell, DeterministicRng, MoveAction, MoveType, TickContext, TraceEvent, TraceLog,
    WindowOffset,
};

#[test]
fn move_action_origin_is_target_minus_offset() {
    let origin = Cell::new(3, 2, 1);
    let jump = MoveAction::new(origin, (-1, 1, 0), MoveType::Jump);

    assert_eq!(jump.target, Cell::new(2, 3, 1));
    assert_eq!(jump.offset, WindowOffset { x: 0, y: 2, z: 1 });
    assert_eq!(jump.origin(), origin);
    assert_eq!(WindowOffset::CENTER.delta(), (0, 0, 0));
}

#[test]
fn every_move_type_costs_at_least_one_step() {
    let all = [
        MoveType::Walk,
        MoveType::Jump,
        MoveType::Climb,
        MoveType::Swim,
        MoveType::Fall,
        MoveType::Fly,
        MoveType::DestroyObject,
        MoveType::ClimbWalls,
    ];
    assert!(all.iter().all(|m| m.cost() >= 1.0));
}

#[test]
fn bounds_edges() {
    let bounds = Bounds::new(Cell::new(0, 0, 0), Cell::new(4, 1, 4));
    assert!(bounds.on_lateral_edge(Cell::new(0, 0, 2)));
    assert!(bounds.on_lateral_edge(Cell::new(3, 1, 4)));
    assert!(!bounds.on_lateral_edge(Cell::new(2, 0, 2)));
    assert!(!bounds.on_lateral_edge(Cell::new(5, 0, 2)));
    assert_eq!(bounds.lateral_edge_distance(Cell::new(2, 0, 1)), 1);
    assert_eq!(Cell::new(0, 0, 0).chebyshev(Cell::new(4, 1, 3)), 4);
}

#[test]
fn agent_rng_is_reproducible_per_tick() {
    let ctx = TickContext::new(10, 0.1, 99);
    let mut a = ctx.rng_for_agent(3u64, 0);
    let mut b = ctx.rng_for_agent(3u64, 0);
    let xs: Vec<u64> = (0..4).map(|_| a.next_below(100)).collect();
    let ys: Vec<u64> = (0..4).map(|_| b.next_below(100)).collect();
    assert_eq!(xs, ys);
    assert!(xs.iter().all(|x| *x < 100));

    let mut c = ctx.next().rng_for_agent(3u64, 0);
    let zs: Vec<u64> = (0..4).map(|_| c.next_below(100)).collect();
    assert_ne!(xs, zs);
}

#[test]
fn trace_log_records_only_when_enabled() {
    let mut off = TraceLog::default();
    off.push(TraceEvent::new(0, "task.start"));
    assert!(off.events.is_empty());

    let mut on = TraceLog::enabled();
    on.push(TraceEvent::new(0, "task.start").with_a(1));
    on.push(TraceEvent::new(1, "task.done"));
    assert_eq!(on.count("task.start"), 1);
    assert_eq!(on.tags().collect::<Vec<_>>(), vec!["task.start", "task.done"]);
}
