use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("entity parse error: {0}")]
    Parse(String),

    #[error("unknown template `{0}`")]
    UnknownTemplate(String),

    #[error("layer {0} is out of range (0..32)")]
    LayerOutOfRange(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WorldResult<T> = Result<T, WorldError>;
