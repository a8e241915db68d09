use chrono::Utc;
use log::info;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::table::{RemoteTable, StoreError};
use crate::models::review::{ModerationStatus, NewReview, Review};

/// Reads every review, newest first. Substituting bundled reviews on failure is the caller's call.
pub async fn fetch_reviews<T: RemoteTable<Review>>(table: &T) -> Result<Vec<Review>, StoreError> {
    table.select_all(true).await
}

/// In-memory review collection kept in step with the remote `reviews` table.
///
/// Every mutation goes to the remote table first and only touches the local
/// collection once that call succeeded. The lock is not held across the remote
/// call, so concurrent mutations land in the order their remote calls finish.
pub struct ReviewStore<T> {
    table: T,
    reviews: RwLock<Vec<Review>>,
}

impl<T: RemoteTable<Review>> ReviewStore<T> {
    pub fn new(table: T, reviews: Vec<Review>) -> Self {
        Self {
            table,
            reviews: RwLock::new(reviews),
        }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub async fn all(&self) -> Vec<Review> {
        self.reviews.read().await.clone()
    }

    async fn with_status(&self, keep: impl Fn(ModerationStatus) -> bool) -> Vec<Review> {
        self.reviews
            .read()
            .await
            .iter()
            .filter(|review| keep(review.status))
            .cloned()
            .collect()
    }

    pub async fn approved(&self) -> Vec<Review> {
        self.with_status(|status| status == ModerationStatus::Approved)
            .await
    }

    pub async fn pending(&self) -> Vec<Review> {
        self.with_status(|status| status == ModerationStatus::Pending)
            .await
    }

    /// Reviews a moderator already decided on
    pub async fn history(&self) -> Vec<Review> {
        self.with_status(|status| status != ModerationStatus::Pending)
            .await
    }

    pub async fn pending_count(&self) -> usize {
        self.reviews
            .read()
            .await
            .iter()
            .filter(|review| review.status == ModerationStatus::Pending)
            .count()
    }

    /// Stores a visitor's review as `pending`. Nothing changes locally if the insert fails.
    pub async fn add(&self, input: NewReview) -> Result<Review, StoreError> {
        let review = input.into_review(Uuid::new_v4().to_string(), Utc::now());
        self.table.insert_one(&review).await?;

        self.reviews.write().await.insert(0, review.clone());
        info!("Review {} submitted for moderation", review.id);
        Ok(review)
    }

    pub async fn approve(&self, id: &str) -> Result<Review, StoreError> {
        self.moderate(id, ModerationStatus::Approved).await
    }

    pub async fn reject(&self, id: &str) -> Result<Review, StoreError> {
        self.moderate(id, ModerationStatus::Rejected).await
    }

    /// Only reviews this store has loaded can be moderated, so an unknown id never reaches the table.
    async fn moderate(&self, id: &str, status: ModerationStatus) -> Result<Review, StoreError> {
        if !self.reviews.read().await.iter().any(|review| review.id == id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.table.update_status(id, status).await?;

        let mut reviews = self.reviews.write().await;
        match reviews.iter_mut().find(|review| review.id == id) {
            Some(review) => {
                review.status = status;
                info!("Review {} is now {}", id, status);
                Ok(review.clone())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}
