use futures::TryStreamExt;
use log::{info, warn};
use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::db::table::{Record, RemoteTable, StoreError};
use crate::models::review::ModerationStatus;

pub async fn create_mongo_client(uri: &str) -> Result<Arc<Client>, StoreError> {
    info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    // Keep startup bounded so an unreachable cluster falls back to bundled data quickly
    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    match client.database("admin").run_command(doc! {"ping": 1}).await {
        Ok(_) => info!("Successfully connected to MongoDB and verified with ping command"),
        Err(e) => {
            warn!("Connected to MongoDB but ping test failed: {}", e);
            warn!("Listings and reviews will be served from bundled data if reads fail");
        }
    }

    Ok(Arc::new(client))
}

pub struct MongoTable<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T: Send + Sync> MongoTable<T> {
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
        }
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.collection
            .client()
            .database("admin")
            .run_command(doc! {"ping": 1})
            .await?;
        Ok(())
    }
}

impl<T> RemoteTable<T> for MongoTable<T>
where
    T: Record + Serialize + DeserializeOwned + Send + Sync + Unpin,
{
    async fn select_all(&self, newest_first: bool) -> Result<Vec<T>, StoreError> {
        let find = self.collection.find(doc! {});
        let cursor = if newest_first {
            find.sort(doc! { "created_at": -1 }).await?
        } else {
            find.await?
        };
        Ok(cursor.try_collect::<Vec<T>>().await?)
    }

    async fn insert_one(&self, record: &T) -> Result<(), StoreError> {
        self.collection.insert_one(record).await?;
        Ok(())
    }

    async fn update_status(&self, id: &str, status: ModerationStatus) -> Result<(), StoreError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "status": status.as_str() } },
            )
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
