use thiserror::Error;

#[derive(Error, Debug)]
pub enum KefinError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Section not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, KefinError>;

/// Failures of the preference and configuration stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No store is wired up, or the server is unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store rejected the request: {0}")]
    Rejected(String),

    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Failures of the item query service.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("item query service unavailable: {0}")]
    Unavailable(String),

    #[error("unknown data source '{0}'")]
    UnknownDataSource(String),

    #[error("item query failed: {0}")]
    Failed(String),
}

/// A single migration step that could not complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    #[error("default group '{0}' is missing from the catalog")]
    MissingGroup(String),

    #[error("migrated configuration has duplicate section ids: {0:?}")]
    DuplicateIds(Vec<String>),
}

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
