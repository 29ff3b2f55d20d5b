use thiserror::Error;

/// Configuration-time errors raised while wiring cells.  Tick-time access
/// never fails.
#[derive(Debug, Error)]
pub enum CellError {
    #[error("no cell named `{0}`")]
    UnknownCell(String),

    #[error("cell `{name}` holds {found}, not {expected}")]
    TypeMismatch {
        name:     String,
        expected: &'static str,
        found:    &'static str,
    },

    #[error("singleton slot `{0}` is already claimed")]
    DuplicateSingleton(&'static str),
}

pub type CellResult<T> = Result<T, CellError>;
