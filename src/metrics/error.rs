use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Trend estimation needs at least two distinct positions")]
    DegenerateInput,

    #[error("Cannot reduce an empty series")]
    EmptySeries,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Malformed document: {0}")]
    Decode(#[from] bson::de::Error),
}
