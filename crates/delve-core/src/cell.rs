use core::fmt;
use core::ops::Add;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer voxel coordinate. `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    pub const fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    pub const fn above(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// Number of king moves between two cells (3D Chebyshev distance).
    pub fn chebyshev(self, other: Cell) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }
}

impl Add<(i32, i32, i32)> for Cell {
    type Output = Cell;

    fn add(self, rhs: (i32, i32, i32)) -> Self::Output {
        self.offset(rhs.0, rhs.1, rhs.2)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Inclusive axis-aligned box of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Cell,
    pub max: Cell,
}

impl Bounds {
    pub const fn new(min: Cell, max: Cell) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x
            && cell.y >= self.min.y
            && cell.z >= self.min.z
            && cell.x <= self.max.x
            && cell.y <= self.max.y
            && cell.z <= self.max.z
    }

    /// Whether `cell` lies on one of the four vertical faces of the box.
    pub fn on_lateral_edge(&self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.x == self.min.x
                || cell.x == self.max.x
                || cell.z == self.min.z
                || cell.z == self.max.z)
    }

    /// Lateral steps from `cell` to the nearest vertical face.
    pub fn lateral_edge_distance(&self, cell: Cell) -> u32 {
        let dx = cell.x.abs_diff(self.min.x).min(cell.x.abs_diff(self.max.x));
        let dz = cell.z.abs_diff(self.min.z).min(cell.z.abs_diff(self.max.z));
        dx.min(dz)
    }
}
