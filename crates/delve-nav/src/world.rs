use delve_core::{Cell, Mobility, MoveType, WorldMut, WorldView};

use crate::{SharedTerrain, Terrain};

pub trait NavWorldView: WorldView {
    fn terrain(&self) -> &dyn Terrain;

    /// Snapshot handed to planning workers; must not observe later edits.
    fn terrain_snapshot(&self) -> SharedTerrain;

    fn position(&self, agent: Self::Agent) -> Option<Cell>;

    fn mobility(&self, _agent: Self::Agent) -> Mobility {
        Mobility::walker()
    }
}

pub trait NavWorldMut: WorldMut + NavWorldView {
    fn set_position(&mut self, agent: Self::Agent, cell: Cell);

    /// Transient locomotion state (animation mode, facing override). `None` means idle.
    fn set_motion(&mut self, _agent: Self::Agent, _motion: Option<MoveType>) {}
}
