use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("STORE_UNAVAILABLE: {0}")]
    Unavailable(String),
    #[error("SCHEMA_FAILED: {0}")]
    SchemaFailed(String),
    #[error("INVALID_VOLUME: drink volume must be a positive number of ounces, got {0}")]
    InvalidVolume(f64),
    #[error("INVALID_WEIGHT: body weight must be a positive number of pounds, got {0}")]
    InvalidWeight(f64),
    #[error("STORE_FAILURE: {0}")]
    Store(String),
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Unavailable(value.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(value.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
