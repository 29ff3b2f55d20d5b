use bn_core::CoreError;
use bn_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("runner configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("world setup error: {0}")]
    World(#[from] WorldError),
}

pub type SimResult<T> = Result<T, SimError>;
