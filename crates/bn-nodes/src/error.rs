use bn_behavior::BehaviorError;
use bn_cell::CellError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Cell(#[from] CellError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("cooldown duration must be finite and non-negative, got {0}")]
    InvalidDuration(f32),
}

pub type NodeResult<T> = Result<T, NodeError>;
