use delve_core::{Cell, EntityId, Mobility, MoveAction, MoveType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Terrain;

/// Liquid level of a completely flooded cell.
pub const MAX_LIQUID_DEPTH: u8 = 8;

// Fixed orders keep generated move lists (and therefore searches) deterministic.
const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const DIAGONAL: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementRules {
    /// A swimmer whose cell holds more liquid than this floats instead of needing ground.
    pub in_water_threshold: u8,
}

impl Default for MovementRules {
    fn default() -> Self {
        Self {
            in_water_threshold: MAX_LIQUID_DEPTH / 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    empty: bool,
    liquid: u8,
    climbable: Option<EntityId>,
    obstacle: Option<EntityId>,
}

impl Sample {
    const SOLID: Sample = Sample {
        empty: false,
        liquid: 0,
        climbable: None,
        obstacle: None,
    };

    fn passable(&self) -> bool {
        self.empty && self.obstacle.is_none()
    }
}

/// The 3×3×3 neighbourhood around a cell, indexed by window offset.
struct Window {
    cells: [[[Sample; 3]; 3]; 3],
}

impl Window {
    fn sample<T: Terrain + ?Sized>(terrain: &T, origin: Cell) -> Self {
        let bounds = terrain.bounds();
        let mut cells = [[[Sample::SOLID; 3]; 3]; 3];
        for (x, plane) in cells.iter_mut().enumerate() {
            for (y, row) in plane.iter_mut().enumerate() {
                for (z, slot) in row.iter_mut().enumerate() {
                    let cell = origin.offset(x as i32 - 1, y as i32 - 1, z as i32 - 1);
                    if !bounds.contains(cell) {
                        continue;
                    }
                    *slot = Sample {
                        empty: terrain.is_empty(cell),
                        liquid: terrain.liquid_depth(cell),
                        climbable: terrain.climbable(cell),
                        obstacle: terrain.obstacle(cell),
                    };
                }
            }
        }
        Self { cells }
    }

    fn at(&self, dx: i32, dy: i32, dz: i32) -> &Sample {
        &self.cells[(dx + 1) as usize][(dy + 1) as usize][(dz + 1) as usize]
    }
}

/// Enumerates the legal single-step moves out of a cell.
///
/// Stateless apart from its rules: safe to share between the tick thread and planning workers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementGraph {
    rules: MovementRules,
}

impl MovementGraph {
    pub fn new(rules: MovementRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> MovementRules {
        self.rules
    }

    pub fn moves<T: Terrain + ?Sized>(
        &self,
        terrain: &T,
        origin: Cell,
        mobility: Mobility,
    ) -> Vec<MoveAction> {
        let mut out = Vec::with_capacity(16);
        self.moves_into(terrain, origin, mobility, &mut out);
        out
    }

    /// Like [`MovementGraph::moves`], reusing `out` (cleared first).
    pub fn moves_into<T: Terrain + ?Sized>(
        &self,
        terrain: &T,
        origin: Cell,
        mobility: Mobility,
        out: &mut Vec<MoveAction>,
    ) {
        out.clear();
        let w = Window::sample(terrain, origin);
        let here = w.at(0, 0, 0);
        let below = w.at(0, -1, 0);
        let above = w.at(0, 1, 0);

        let standing = !below.empty;
        let in_water = mobility.can_swim && here.liquid > self.rules.in_water_threshold;
        let top_covered = !above.empty;
        let supported = standing || in_water;

        if let Some(ladder) = here.climbable {
            if self.enterable(above, mobility) {
                push_unique(
                    out,
                    MoveAction::new(origin, (0, 1, 0), MoveType::Climb).with_interact(ladder),
                );
            }
            if !standing && self.enterable(below, mobility) {
                push_unique(
                    out,
                    MoveAction::new(origin, (0, -1, 0), MoveType::Climb).with_interact(ladder),
                );
            }
        }

        if mobility.can_climb_walls {
            let against_wall = ORTHOGONAL
                .iter()
                .any(|&(dx, dz)| !w.at(dx, 0, dz).empty);
            if against_wall {
                if self.enterable(above, mobility) {
                    push_unique(out, MoveAction::new(origin, (0, 1, 0), MoveType::ClimbWalls));
                }
                if !standing && self.enterable(below, mobility) {
                    push_unique(out, MoveAction::new(origin, (0, -1, 0), MoveType::ClimbWalls));
                }
            }
        }

        if supported {
            let lateral = if in_water {
                MoveType::Swim
            } else {
                MoveType::Walk
            };

            for &(dx, dz) in ORTHOGONAL.iter() {
                if let Some(action) = self.lateral_move(&w, origin, dx, dz, lateral, mobility) {
                    push_unique(out, action);
                }
            }

            // Diagonals only when both flanking cells are open: no cutting through solid corners.
            for &(dx, dz) in DIAGONAL.iter() {
                if !(w.at(dx, 0, 0).passable() && w.at(0, 0, dz).passable()) {
                    continue;
                }
                if let Some(action) = self.lateral_move(&w, origin, dx, dz, lateral, mobility) {
                    push_unique(out, action);
                }
            }

            if !top_covered {
                for &(dx, dz) in ORTHOGONAL.iter().chain(DIAGONAL.iter()) {
                    let push_off = !w.at(dx, 0, dz).empty;
                    if push_off && self.enterable(w.at(dx, 1, dz), mobility) {
                        push_unique(out, MoveAction::new(origin, (dx, 1, dz), MoveType::Jump));
                    }
                }
            }
        } else if self.enterable(below, mobility) {
            push_unique(out, MoveAction::new(origin, (0, -1, 0), MoveType::Fall));
        }

        if mobility.can_fly {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    for dx in -1..=1 {
                        if (dx, dy, dz) == (0, 0, 0) || !self.enterable(w.at(dx, dy, dz), mobility)
                        {
                            continue;
                        }
                        push_unique(out, MoveAction::new(origin, (dx, dy, dz), MoveType::Fly));
                    }
                }
            }
        }
    }

    /// Open cell the agent may end a move in. Liquid deeper than the swim threshold only admits
    /// swimmers.
    fn enterable(&self, cell: &Sample, mobility: Mobility) -> bool {
        cell.passable() && !self.too_deep(cell, mobility)
    }

    fn too_deep(&self, cell: &Sample, mobility: Mobility) -> bool {
        !mobility.can_swim && cell.liquid > self.rules.in_water_threshold
    }

    fn lateral_move(
        &self,
        w: &Window,
        origin: Cell,
        dx: i32,
        dz: i32,
        move_type: MoveType,
        mobility: Mobility,
    ) -> Option<MoveAction> {
        let dest = w.at(dx, 0, dz);
        if !dest.empty || self.too_deep(dest, mobility) {
            return None;
        }
        match dest.obstacle {
            None => Some(MoveAction::new(origin, (dx, 0, dz), move_type)),
            Some(obstacle) if mobility.can_destroy => Some(
                MoveAction::new(origin, (dx, 0, dz), MoveType::DestroyObject)
                    .with_interact(obstacle),
            ),
            Some(_) => None,
        }
    }

    /// Whether `action` is still one of the moves its origin offers on `terrain`.
    pub fn is_valid_step<T: Terrain + ?Sized>(
        &self,
        terrain: &T,
        mobility: Mobility,
        action: &MoveAction,
    ) -> bool {
        self.moves(terrain, action.origin(), mobility)
            .iter()
            .any(|m| m == action)
    }

    /// Index of the first step of `path` that is discontinuous or no longer generated by the graph.
    pub fn first_invalid_step<T: Terrain + ?Sized>(
        &self,
        terrain: &T,
        mobility: Mobility,
        start: Cell,
        path: &[MoveAction],
    ) -> Option<usize> {
        let mut at = start;
        for (i, action) in path.iter().enumerate() {
            if action.origin() != at || !self.is_valid_step(terrain, mobility, action) {
                return Some(i);
            }
            at = action.target;
        }
        None
    }
}

/// First generated move to a destination wins.
fn push_unique(out: &mut Vec<MoveAction>, action: MoveAction) {
    if out.iter().all(|m| m.target != action.target) {
        out.push(action);
    }
}
