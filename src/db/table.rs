//! The three operations the stores need from a remote table: read everything
//! (optionally newest first), insert one row, and change a row's status.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

use crate::db::memory::MemoryTable;
use crate::db::mongo::MongoTable;
use crate::models::review::{ModerationStatus, Review};
use crate::models::space::Space;

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Database(String),
    NotFound(String),
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "Database error: {}", err),
            StoreError::NotFound(id) => write!(f, "No record with id {}", id),
            StoreError::Unavailable(err) => write!(f, "Store unavailable: {}", err),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

pub trait Record: Clone {
    fn id(&self) -> &str;
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn set_status(&mut self, status: ModerationStatus);
}

impl Record for Review {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn set_status(&mut self, status: ModerationStatus) {
        self.status = status;
    }
}

impl Record for Space {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn set_status(&mut self, status: ModerationStatus) {
        self.status = status;
    }
}

#[allow(async_fn_in_trait)]
pub trait RemoteTable<T: Record> {
    async fn select_all(&self, newest_first: bool) -> Result<Vec<T>, StoreError>;
    async fn insert_one(&self, record: &T) -> Result<(), StoreError>;
    /// Fails with `StoreError::NotFound` when no row has the id.
    async fn update_status(&self, id: &str, status: ModerationStatus) -> Result<(), StoreError>;
}

/// The table implementation chosen at startup.
pub enum TableBackend<T: Send + Sync> {
    Mongo(MongoTable<T>),
    Memory(MemoryTable<T>),
}

impl<T> TableBackend<T>
where
    T: Record + Serialize + DeserializeOwned + Send + Sync + Unpin,
{
    pub fn name(&self) -> &'static str {
        match self {
            TableBackend::Mongo(_) => "mongodb",
            TableBackend::Memory(_) => "memory",
        }
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        match self {
            TableBackend::Mongo(table) => table.ping().await,
            TableBackend::Memory(table) => table.ping(),
        }
    }
}

impl<T> RemoteTable<T> for TableBackend<T>
where
    T: Record + Serialize + DeserializeOwned + Send + Sync + Unpin,
{
    async fn select_all(&self, newest_first: bool) -> Result<Vec<T>, StoreError> {
        match self {
            TableBackend::Mongo(table) => table.select_all(newest_first).await,
            TableBackend::Memory(table) => table.select_all(newest_first).await,
        }
    }

    async fn insert_one(&self, record: &T) -> Result<(), StoreError> {
        match self {
            TableBackend::Mongo(table) => table.insert_one(record).await,
            TableBackend::Memory(table) => table.insert_one(record).await,
        }
    }

    async fn update_status(&self, id: &str, status: ModerationStatus) -> Result<(), StoreError> {
        match self {
            TableBackend::Mongo(table) => table.update_status(id, status).await,
            TableBackend::Memory(table) => table.update_status(id, status).await,
        }
    }
}
