use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::models::de::{deserialize_rounded_u8, timestamp};
use crate::models::validation::{require_text, ValidationError};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub role: String,
    pub image: String,
    pub text: String,
    pub rating: u8,
    pub status: ModerationStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

const DEFAULT_AVATAR: &str = "https://picsum.photos/150/150";

// The name becomes a single path segment, so `/`, `?` and `#` are escaped too.
fn avatar_for(name: &str) -> Option<Url> {
    let mut url = Url::parse("https://picsum.photos/").ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(["seed", name, "150", "150"]);
    Some(url)
}

fn default_rating() -> u8 {
    5
}

/// What a visitor submits from the review form. Id, status and date are assigned by the store.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NewReview {
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub text: String,
    #[serde(deserialize_with = "deserialize_rounded_u8", default = "default_rating")]
    pub rating: u8,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("text", &self.text)?;
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::new("rating", "must be between 1 and 5"));
        }
        Ok(())
    }

    pub fn avatar_url(&self) -> String {
        avatar_for(self.name.trim())
            .map(String::from)
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string())
    }

    pub fn into_review(self, id: String, created_at: DateTime<Utc>) -> Review {
        let image = self.avatar_url();
        Review {
            id,
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            image,
            text: self.text.trim().to_string(),
            rating: self.rating,
            status: ModerationStatus::Pending,
            created_at,
        }
    }
}
