use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] fiscus_core::ValidationError),

    #[error(transparent)]
    Routing(#[from] fiscus_core::RoutingError),

    #[error(transparent)]
    Fetch(#[from] fiscus_core::FetchError),

    #[error(transparent)]
    Warehouse(#[from] fiscus_warehouse::WarehouseError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Routing(_) => 3,
            Self::Fetch(_) => 6,
            Self::Warehouse(_) => 7,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
