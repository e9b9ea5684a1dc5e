use crate::Cell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to a world entity a move interacts with (ladder, door, barricade) or a task targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveType {
    Walk,
    Jump,
    Climb,
    Swim,
    Fall,
    Fly,
    DestroyObject,
    ClimbWalls,
}

impl MoveType {
    /// Base traversal cost used by the planner. Every move costs at least one step so the
    /// Chebyshev heuristic stays admissible.
    pub fn cost(self) -> f32 {
        match self {
            MoveType::Walk | MoveType::Fall | MoveType::Fly => 1.0,
            MoveType::Jump | MoveType::Climb | MoveType::Swim => 2.0,
            MoveType::ClimbWalls => 3.0,
            MoveType::DestroyObject => 5.0,
        }
    }
}

/// Position of a destination inside the 3×3×3 neighbourhood window; the origin sits at `(1, 1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WindowOffset {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl WindowOffset {
    pub const CENTER: WindowOffset = WindowOffset { x: 1, y: 1, z: 1 };

    /// Build from a signed delta in `-1..=1` per axis.
    pub fn from_delta(dx: i32, dy: i32, dz: i32) -> Self {
        debug_assert!(
            (-1..=1).contains(&dx) && (-1..=1).contains(&dy) && (-1..=1).contains(&dz),
            "window delta out of range: ({dx}, {dy}, {dz})"
        );
        Self {
            x: (dx + 1) as u8,
            y: (dy + 1) as u8,
            z: (dz + 1) as u8,
        }
    }

    pub fn delta(self) -> (i32, i32, i32) {
        (
            self.x as i32 - 1,
            self.y as i32 - 1,
            self.z as i32 - 1,
        )
    }
}

/// One legal single-step transition between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveAction {
    pub target: Cell,
    pub move_type: MoveType,
    pub offset: WindowOffset,
    pub interact: Option<EntityId>,
}

impl MoveAction {
    pub fn new(origin: Cell, delta: (i32, i32, i32), move_type: MoveType) -> Self {
        Self {
            target: origin + delta,
            move_type,
            offset: WindowOffset::from_delta(delta.0, delta.1, delta.2),
            interact: None,
        }
    }

    pub fn with_interact(mut self, entity: EntityId) -> Self {
        self.interact = Some(entity);
        self
    }

    /// The cell this move starts from.
    pub fn origin(&self) -> Cell {
        let (dx, dy, dz) = self.offset.delta();
        self.target.offset(-dx, -dy, -dz)
    }

    pub fn cost(&self) -> f32 {
        self.move_type.cost()
    }
}

/// Movement capabilities of a creature. Plain walking, jumping, climbing ladders and falling are
/// always available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Mobility {
    pub can_swim: bool,
    pub can_climb_walls: bool,
    pub can_fly: bool,
    pub can_destroy: bool,
}

impl Mobility {
    pub fn walker() -> Self {
        Self {
            can_swim: true,
            ..Self::default()
        }
    }
}
