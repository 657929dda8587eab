use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::Document;

use fitdash_backend::db::{MetricStore, StoreError};
use fitdash_backend::metrics::{Collection, DateRange};

/// Collections held in memory, queried the same way the Mongo store does:
/// inclusive on the `date` key, ascending.
#[derive(Default)]
pub struct InMemoryStore {
    collections: HashMap<&'static str, Vec<Document>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, collection: Collection, docs: Vec<Document>) -> Self {
        self.collections.entry(collection.name()).or_default().extend(docs);
        self
    }
}

#[async_trait]
impl MetricStore for InMemoryStore {
    async fn find_by_date(&self, collection: Collection, range: &DateRange) -> Result<Vec<Document>, StoreError> {
        let mut docs: Vec<Document> = self
            .collections
            .get(collection.name())
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.get_str("date").map(|d| range.contains_key(d)).unwrap_or(false))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        docs.sort_by(|a, b| a.get_str("date").unwrap_or("").cmp(b.get_str("date").unwrap_or("")));
        Ok(docs)
    }
}

/// Every read times out.
pub struct UnreachableStore;

#[async_trait]
impl MetricStore for UnreachableStore {
    async fn find_by_date(&self, _collection: Collection, _range: &DateRange) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Timeout(Duration::from_millis(5)))
    }
}
