use thiserror::Error;

/// Errors surfaced by the store, the console, or an input stream that ended early.
#[derive(Debug, Error)]
pub enum Error {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("console i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input ended before {field} was entered")]
    InputClosed { field: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
