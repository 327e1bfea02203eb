use thiserror::Error;

/// Errors that can occur during warehouse operations.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// `DuckDB` database error.
    #[error(transparent)]
    DuckDb(#[from] duckdb::Error),

    /// I/O error (file system operations).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A stored row no longer maps onto the domain model.
    #[error("invalid coverage row: {0}")]
    InvalidRow(String),

    /// Timestamp formatting failed.
    #[error("timestamp error: {0}")]
    Timestamp(#[from] time::error::Format),
}
