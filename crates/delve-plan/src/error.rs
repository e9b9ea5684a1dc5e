use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("heuristic weight must be a finite value >= 1.0 (got {0})")]
    InvalidWeight(f32),

    #[error("planning service has shut down")]
    Shutdown,

    #[error("failed to spawn planning worker")]
    Spawn(#[from] std::io::Error),
}
