use crate::AgentId;

/// Read-only world access.
///
/// The core crate does not prescribe which queries a world must expose; the
/// navigation layer defines extension traits for positions and terrain.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}
