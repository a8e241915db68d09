use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::db::table::{Record, RemoteTable, StoreError};
use crate::models::review::ModerationStatus;

/// Process-local table. Can be switched into a failing mode to stand in for an unreachable store.
pub struct MemoryTable<T> {
    rows: Mutex<Vec<T>>,
    failing: AtomicBool,
}

impl<T: Record> Default for MemoryTable<T> {
    fn default() -> Self {
        Self::seeded(Vec::new())
    }
}

impl<T: Record> MemoryTable<T> {
    pub fn seeded(rows: Vec<T>) -> Self {
        Self {
            rows: Mutex::new(rows),
            failing: AtomicBool::new(false),
        }
    }

    pub fn unreachable() -> Self {
        let table = Self::default();
        table.set_failing(true);
        table
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<T> {
        match self.rows.lock() {
            Ok(rows) => rows.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn ping(&self) -> Result<(), StoreError> {
        self.check_reachable()
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory table is offline".to_string()));
        }
        Ok(())
    }

    fn with_rows<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R, StoreError> {
        self.check_reachable()?;
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| StoreError::Database("memory table lock poisoned".to_string()))?;
        Ok(f(&mut rows))
    }
}

impl<T: Record> RemoteTable<T> for MemoryTable<T> {
    async fn select_all(&self, newest_first: bool) -> Result<Vec<T>, StoreError> {
        self.with_rows(|rows| {
            let mut selected = rows.clone();
            if newest_first {
                // Stable, rows without a timestamp sort last.
                selected.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
            }
            selected
        })
    }

    async fn insert_one(&self, record: &T) -> Result<(), StoreError> {
        self.with_rows(|rows| rows.push(record.clone()))
    }

    async fn update_status(&self, id: &str, status: ModerationStatus) -> Result<(), StoreError> {
        self.with_rows(|rows| match rows.iter_mut().find(|row| row.id() == id) {
            Some(row) => {
                row.set_status(status);
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        })?
    }
}
