use delve_core::{Cell, Mobility, MoveType};
use delve_nav::{find_path, GoalRegion, MovementGraph, SearchLimits, VoxelGrid, MAX_LIQUID_DEPTH};

fn limits(max_expansions: usize) -> SearchLimits {
    SearchLimits {
        max_expansions,
        heuristic_weight: 1.0,
    }
}

/// Diagonal walks are legal on open floor, so the corner-to-corner route is 4 moves rather than
/// the 8 an orthogonal-only graph would need.
#[test]
fn open_room_path_is_chebyshev_optimal() {
    let grid = VoxelGrid::new(5, 2, 5);
    let graph = MovementGraph::default();
    let start = Cell::new(0, 0, 0);
    let goal = GoalRegion::Into(Cell::new(4, 0, 4));

    let outcome = find_path(&graph, &grid, start, &goal, Mobility::walker(), limits(1000));
    let path = outcome.path.expect("path should exist");

    assert_eq!(path.len(), 4);
    assert!(path.iter().all(|m| m.move_type == MoveType::Walk));
    assert_eq!(path.last().map(|m| m.target), Some(Cell::new(4, 0, 4)));
    assert_eq!(
        graph.first_invalid_step(&grid, Mobility::walker(), start, &path),
        None
    );
}

#[test]
fn search_is_deterministic_for_same_input() {
    let mut grid = VoxelGrid::new(12, 2, 12);
    grid.fill(Cell::new(6, 0, 0), Cell::new(6, 1, 10), true);
    let graph = MovementGraph::default();
    let goal = GoalRegion::Into(Cell::new(11, 0, 0));

    let a = find_path(&graph, &grid, Cell::new(0, 0, 0), &goal, Mobility::walker(), limits(5000));
    let b = find_path(&graph, &grid, Cell::new(0, 0, 0), &goal, Mobility::walker(), limits(5000));

    assert!(a.is_success());
    assert_eq!(a, b);
}

#[test]
fn solid_goal_fails_without_searching() {
    let mut grid = VoxelGrid::new(5, 2, 5);
    grid.set_solid(Cell::new(4, 0, 4), true);

    let outcome = find_path(
        &MovementGraph::default(),
        &grid,
        Cell::new(0, 0, 0),
        &GoalRegion::Into(Cell::new(4, 0, 4)),
        Mobility::walker(),
        limits(1000),
    );

    assert_eq!(outcome.path, None);
    assert_eq!(outcome.expansions, 0);
}

#[test]
fn walled_off_goal_exhausts_the_reachable_set() {
    let mut grid = VoxelGrid::new(5, 2, 5);
    grid.fill(Cell::new(2, 0, 0), Cell::new(2, 1, 4), true);

    let outcome = find_path(
        &MovementGraph::default(),
        &grid,
        Cell::new(0, 0, 0),
        &GoalRegion::Into(Cell::new(4, 0, 4)),
        Mobility::walker(),
        limits(1000),
    );

    assert_eq!(outcome.path, None);
    assert!(!outcome.budget_exhausted);
    // Two columns of five floor cells on the near side.
    assert_eq!(outcome.expansions, 10);
}

#[test]
fn expansion_budget_is_a_hard_limit() {
    let grid = VoxelGrid::new(20, 2, 20);
    let outcome = find_path(
        &MovementGraph::default(),
        &grid,
        Cell::new(0, 0, 0),
        &GoalRegion::Into(Cell::new(19, 0, 19)),
        Mobility::walker(),
        limits(3),
    );

    assert_eq!(outcome.path, None);
    assert!(outcome.budget_exhausted);
    assert_eq!(outcome.expansions, 3);
}

#[test]
fn already_at_goal_yields_empty_path() {
    let grid = VoxelGrid::new(5, 2, 5);
    let outcome = find_path(
        &MovementGraph::default(),
        &grid,
        Cell::new(2, 0, 2),
        &GoalRegion::Radius {
            center: Cell::new(3, 0, 3),
            radius: 1,
        },
        Mobility::walker(),
        limits(0),
    );
    assert_eq!(outcome.path, Some(Vec::new()));
}

#[test]
fn adjacent_goal_stops_next_to_a_solid_target() {
    let mut grid = VoxelGrid::new(5, 2, 5);
    let ore = Cell::new(4, 0, 2);
    grid.set_solid(ore, true);

    let outcome = find_path(
        &MovementGraph::default(),
        &grid,
        Cell::new(0, 0, 2),
        &GoalRegion::Adjacent(ore),
        Mobility::walker(),
        limits(1000),
    );
    let path = outcome.path.expect("path should exist");
    let end = path.last().map(|m| m.target).expect("non-empty path");

    assert_eq!(end.chebyshev(ore), 1);
    assert_eq!(path.len(), 3);
}

#[test]
fn edge_goal_heads_for_the_nearest_face() {
    let grid = VoxelGrid::new(5, 2, 5);
    let outcome = find_path(
        &MovementGraph::default(),
        &grid,
        Cell::new(2, 0, 2),
        &GoalRegion::Edge,
        Mobility::walker(),
        limits(1000),
    );
    assert_eq!(outcome.path.map(|p| p.len()), Some(2));
}

#[test]
fn ledges_need_a_jump_and_a_fall() {
    // A single-file corridor with a one-block step in the middle.
    let mut grid = VoxelGrid::new(4, 3, 1);
    grid.set_solid(Cell::new(2, 0, 0), true);

    let outcome = find_path(
        &MovementGraph::default(),
        &grid,
        Cell::new(0, 0, 0),
        &GoalRegion::Into(Cell::new(3, 0, 0)),
        Mobility::walker(),
        limits(100),
    );
    let kinds: Vec<MoveType> = outcome
        .path
        .expect("path should exist")
        .iter()
        .map(|m| m.move_type)
        .collect();

    assert_eq!(
        kinds,
        vec![MoveType::Walk, MoveType::Jump, MoveType::Walk, MoveType::Fall]
    );
}

#[test]
fn heavier_heuristic_still_returns_a_contiguous_path() {
    let mut grid = VoxelGrid::new(16, 2, 16);
    for z in 0..14 {
        grid.set_solid(Cell::new(8, 0, z), true);
        grid.set_solid(Cell::new(8, 1, z), true);
    }
    let graph = MovementGraph::default();
    let start = Cell::new(0, 0, 0);

    let outcome = find_path(
        &graph,
        &grid,
        start,
        &GoalRegion::Into(Cell::new(15, 0, 0)),
        Mobility::walker(),
        SearchLimits {
            max_expansions: 10_000,
            heuristic_weight: 4.0,
        },
    );
    let path = outcome.path.expect("path should exist");

    assert_eq!(graph.first_invalid_step(&grid, Mobility::walker(), start, &path), None);
    assert_eq!(path.last().map(|m| m.target), Some(Cell::new(15, 0, 0)));
}

#[test]
fn non_swimmers_route_around_deep_water() {
    let mut grid = VoxelGrid::new(5, 2, 5);
    for z in 0..4 {
        grid.set_liquid(Cell::new(2, 0, z), MAX_LIQUID_DEPTH);
    }
    let graph = MovementGraph::default();
    let start = Cell::new(0, 0, 0);
    let goal = GoalRegion::Into(Cell::new(4, 0, 0));

    let swim = find_path(&graph, &grid, start, &goal, Mobility::walker(), limits(1000));
    assert_eq!(swim.path.map(|p| p.len()), Some(4));

    let walk = find_path(&graph, &grid, start, &goal, Mobility::default(), limits(1000));
    let path = walk.path.expect("dry detour exists");
    assert!(path.len() > 4);
    assert!(path.iter().all(|m| m.target.x != 2 || m.target.z == 4));
}
