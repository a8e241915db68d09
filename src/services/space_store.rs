use chrono::Utc;
use log::info;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::table::{RemoteTable, StoreError};
use crate::models::space::{NewSpace, Space};

/// Reads every listing, newest first.
pub async fn fetch_spaces<T: RemoteTable<Space>>(table: &T) -> Result<Vec<Space>, StoreError> {
    table.select_all(true).await
}

/// In-memory listing collection kept in step with the remote `spaces` table.
pub struct SpaceStore<T> {
    table: T,
    spaces: RwLock<Vec<Space>>,
}

impl<T: RemoteTable<Space>> SpaceStore<T> {
    pub fn new(table: T, spaces: Vec<Space>) -> Self {
        Self {
            table,
            spaces: RwLock::new(spaces),
        }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub async fn all(&self) -> Vec<Space> {
        self.spaces.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Space> {
        self.spaces
            .read()
            .await
            .iter()
            .find(|space| space.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.spaces.read().await.len()
    }

    /// Publishes a listing. It is prepended locally only after the remote insert succeeded.
    pub async fn add(&self, input: NewSpace) -> Result<Space, StoreError> {
        let space = input.into_space(Uuid::new_v4().to_string(), Utc::now());
        self.table.insert_one(&space).await?;

        self.spaces.write().await.insert(0, space.clone());
        info!("Listing {} published: {}", space.id, space.title);
        Ok(space)
    }
}
