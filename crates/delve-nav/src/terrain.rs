use std::sync::Arc;

use delve_core::{Bounds, Cell, EntityId};

/// Read-only terrain accessor.
///
/// Implementations must be safe to query from planning workers; the planner only ever sees
/// immutable snapshots (see [`SharedTerrain`]). Cells outside [`Terrain::bounds`] are treated as
/// solid by every consumer in this crate.
pub trait Terrain {
    fn bounds(&self) -> Bounds;

    /// `true` when the cell holds no solid voxel. Liquid cells are empty.
    fn is_empty(&self, cell: Cell) -> bool;

    /// Liquid level in `0..=MAX_LIQUID_DEPTH`.
    fn liquid_depth(&self, cell: Cell) -> u8;

    /// Ladder (or other climbable fixture) occupying the cell.
    fn climbable(&self, cell: Cell) -> Option<EntityId>;

    /// Destructible blocker (door, barricade) occupying an otherwise empty cell.
    fn obstacle(&self, _cell: Cell) -> Option<EntityId> {
        None
    }
}

/// Immutable terrain snapshot shared with planning workers.
pub type SharedTerrain = Arc<dyn Terrain + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Voxel {
    pub solid: bool,
    pub liquid: u8,
    pub ladder: Option<EntityId>,
    pub obstacle: Option<EntityId>,
}

/// Dense voxel volume with its minimum corner at the origin.
///
/// Edits go through `&mut self`; owners that share snapshots with the planner hold the grid in
/// an `Arc` and edit through `Arc::make_mut`, so in-flight searches keep reading the old copy.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    width: i32,
    height: i32,
    depth: i32,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        assert!(
            width > 0 && height > 0 && depth > 0,
            "voxel grid must be non-empty"
        );
        let (width, height, depth) = (width as i32, height as i32, depth as i32);
        Self {
            width,
            height,
            depth,
            voxels: vec![Voxel::default(); (width * height * depth) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn depth(&self) -> u32 {
        self.depth as u32
    }

    fn idx(&self, cell: Cell) -> Option<usize> {
        if cell.x < 0
            || cell.y < 0
            || cell.z < 0
            || cell.x >= self.width
            || cell.y >= self.height
            || cell.z >= self.depth
        {
            return None;
        }
        Some(((cell.y * self.depth + cell.z) * self.width + cell.x) as usize)
    }

    pub fn voxel(&self, cell: Cell) -> Option<&Voxel> {
        self.idx(cell).map(|i| &self.voxels[i])
    }

    pub fn voxel_mut(&mut self, cell: Cell) -> Option<&mut Voxel> {
        self.idx(cell).map(|i| &mut self.voxels[i])
    }

    pub fn set_solid(&mut self, cell: Cell, solid: bool) {
        if let Some(v) = self.voxel_mut(cell) {
            v.solid = solid;
        }
    }

    pub fn set_liquid(&mut self, cell: Cell, depth: u8) {
        if let Some(v) = self.voxel_mut(cell) {
            v.liquid = depth.min(crate::MAX_LIQUID_DEPTH);
        }
    }

    pub fn set_ladder(&mut self, cell: Cell, ladder: Option<EntityId>) {
        if let Some(v) = self.voxel_mut(cell) {
            v.ladder = ladder;
        }
    }

    pub fn set_obstacle(&mut self, cell: Cell, obstacle: Option<EntityId>) {
        if let Some(v) = self.voxel_mut(cell) {
            v.obstacle = obstacle;
        }
    }

    /// Mark every cell in the inclusive box `a..=b` solid (or empty).
    pub fn fill(&mut self, a: Cell, b: Cell, solid: bool) {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for z in a.z.min(b.z)..=a.z.max(b.z) {
                for x in a.x.min(b.x)..=a.x.max(b.x) {
                    self.set_solid(Cell::new(x, y, z), solid);
                }
            }
        }
    }
}

impl Terrain for VoxelGrid {
    fn bounds(&self) -> Bounds {
        Bounds::new(
            Cell::new(0, 0, 0),
            Cell::new(self.width - 1, self.height - 1, self.depth - 1),
        )
    }

    fn is_empty(&self, cell: Cell) -> bool {
        self.voxel(cell).map(|v| !v.solid).unwrap_or(false)
    }

    fn liquid_depth(&self, cell: Cell) -> u8 {
        self.voxel(cell).map(|v| v.liquid).unwrap_or(0)
    }

    fn climbable(&self, cell: Cell) -> Option<EntityId> {
        self.voxel(cell).and_then(|v| v.ladder)
    }

    fn obstacle(&self, cell: Cell) -> Option<EntityId> {
        self.voxel(cell).and_then(|v| v.obstacle)
    }
}
