use std::time::Duration;

use async_trait::async_trait;
use bson::Document;
use thiserror::Error;

use crate::metrics::{Collection, DateRange};

pub mod mongo;
pub mod retry;

pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Store did not answer within {0:?}")]
    Timeout(Duration),
}

/// Read access to the per-date collections.
#[async_trait]
pub trait MetricStore: Send + Sync {
    /// Documents whose `date` key falls inside the range, ascending by date.
    async fn find_by_date(&self, collection: Collection, range: &DateRange) -> Result<Vec<Document>, StoreError>;
}
