use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use secrecy::ExposeSecret;

use crate::config::settings::DatabaseSettings;
use crate::db::retry::RetryPolicy;
use crate::db::{MetricStore, StoreError};
use crate::metrics::{Collection, DateRange};

pub struct MongoStore {
    database: Database,
    timeout: Duration,
    retry: RetryPolicy,
}

impl MongoStore {
    /// The driver connects lazily; an unreachable server shows up on the
    /// first read, not here.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(settings.connection_string().expose_secret()).await?;
        options.app_name = Some("fitdash-backend".to_string());
        options.connect_timeout = Some(settings.timeout());
        options.server_selection_timeout = Some(settings.timeout());

        let client = Client::with_options(options)?;
        tracing::info!(db_name = %settings.db_name, "MongoDB client created");

        Ok(Self::new(client.database(&settings.db_name), settings))
    }

    pub fn new(database: Database, settings: &DatabaseSettings) -> Self {
        Self {
            database,
            timeout: settings.timeout(),
            retry: RetryPolicy {
                max_retries: settings.max_retries,
                ..RetryPolicy::default()
            },
        }
    }

    async fn read_once(&self, collection: Collection, filter: Document) -> Result<Vec<Document>, StoreError> {
        let read = async {
            let cursor = self
                .database
                .collection::<Document>(collection.name())
                .find(filter)
                .sort(doc! { "date": 1 })
                .await?;
            let docs: Vec<Document> = cursor.try_collect().await?;
            Ok::<_, StoreError>(docs)
        };

        match tokio::time::timeout(self.timeout, read).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl MetricStore for MongoStore {
    #[tracing::instrument(name = "Find documents by date", skip(self, range), fields(collection = %collection))]
    async fn find_by_date(&self, collection: Collection, range: &DateRange) -> Result<Vec<Document>, StoreError> {
        let filter = doc! {
            "date": {
                "$gte": range.start_key(),
                "$lte": range.end_key(),
            }
        };

        let docs = self
            .retry
            .retry_async(|| self.read_once(collection, filter.clone()))
            .await?;

        tracing::debug!(
            start = %range.start_key(),
            end = %range.end_key(),
            records = docs.len(),
            "Documents read"
        );
        Ok(docs)
    }
}
