//! Navigation over voxel terrain: terrain access, the per-cell movement graph, goal regions and
//! budgeted weighted A*.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod goal;
pub mod graph;
pub mod search;
pub mod terrain;
pub mod world;

pub use goal::GoalRegion;
pub use graph::{MovementGraph, MovementRules, MAX_LIQUID_DEPTH};
pub use search::{find_path, SearchLimits, SearchOutcome};
pub use terrain::{SharedTerrain, Terrain, Voxel, VoxelGrid};
pub use world::{NavWorldMut, NavWorldView};
