//! Error types for hotcell-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when deriving grid addresses from reference labels
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column letters beyond the last column
    #[error("Column {0} out of bounds (max index: {1})")]
    ColumnOutOfBounds(String, u16),

    /// Named references have no grid address
    #[error("Named reference {0} has no grid address")]
    NamedReference(String),
}
