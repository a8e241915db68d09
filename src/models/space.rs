use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::coordinate::Coordinate;
use crate::models::de::{
    deserialize_amenities, deserialize_optional_rounded_u32, deserialize_rounded_u32,
    optional_timestamp,
};
use crate::models::fallback::{DEFAULT_COORDINATES, GALLERY_IMAGES};
use crate::models::review::ModerationStatus;
use crate::models::validation::{is_valid_email, require_text, ValidationError};

pub const DEFAULT_SPACE_IMAGE: &str =
    "https://images.unsplash.com/photo-1497366216548-37526070297c?auto=format&fit=crop&w=800&q=80";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceCategory {
    PrivateOffice,
    HotDesk,
    MeetingRoom,
    Other(String),
}

impl SpaceCategory {
    pub fn as_str(&self) -> &str {
        match self {
            SpaceCategory::PrivateOffice => "Private Office",
            SpaceCategory::HotDesk => "Hot Desk",
            SpaceCategory::MeetingRoom => "Meeting Room",
            SpaceCategory::Other(name) => name,
        }
    }
}

impl Default for SpaceCategory {
    fn default() -> Self {
        SpaceCategory::HotDesk
    }
}

impl From<&str> for SpaceCategory {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Private Office" => SpaceCategory::PrivateOffice,
            "Hot Desk" => SpaceCategory::HotDesk,
            "Meeting Room" => SpaceCategory::MeetingRoom,
            other => SpaceCategory::Other(other.to_string()),
        }
    }
}

impl Serialize for SpaceCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SpaceCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(SpaceCategory::from(value.as_str()))
    }
}

fn default_coordinates() -> Coordinate {
    DEFAULT_COORDINATES
}

fn default_image() -> String {
    "https://picsum.photos/800/600".to_string()
}

fn approved() -> ModerationStatus {
    ModerationStatus::Approved
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Space {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub location: String,
    // Rows stored without coordinates are placed at the default city centre.
    #[serde(default = "default_coordinates")]
    pub coordinates: Coordinate,
    pub price: u32,
    #[serde(rename = "type", default)]
    pub category: SpaceCategory,
    #[serde(default = "default_image")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Kilometres from the observer, only present on ranked results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default = "approved")]
    pub status: ModerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

pub const MAX_GALLERY_IMAGES: usize = 4;

impl Space {
    /// Main image first, then stock photos of the same kind of space, without repeats.
    pub fn gallery(&self) -> Vec<String> {
        let mut gallery = vec![self.image.clone()];
        for image in GALLERY_IMAGES {
            if gallery.len() == MAX_GALLERY_IMAGES {
                break;
            }
            if !gallery.iter().any(|existing| existing == image) {
                gallery.push(image.to_string());
            }
        }
        gallery
    }
}

/// Listing form submission
#[derive(Debug, Deserialize, Clone)]
pub struct NewSpace {
    pub title: String,
    pub location: String,
    #[serde(deserialize_with = "deserialize_rounded_u32")]
    pub price: u32,
    #[serde(rename = "type", default)]
    pub category: SpaceCategory,
    #[serde(deserialize_with = "deserialize_optional_rounded_u32", default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(deserialize_with = "deserialize_amenities", default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinate>,
}

impl NewSpace {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("location", &self.location)?;
        if self.price == 0 {
            return Err(ValidationError::new("price", "must be a positive amount"));
        }
        if let Some(email) = self.contact_email.as_deref().map(str::trim) {
            if !email.is_empty() && !is_valid_email(email) {
                return Err(ValidationError::new("contact_email", "is not a valid address"));
            }
        }
        if let Some(coordinates) = &self.coordinates {
            if !coordinates.is_valid() {
                return Err(ValidationError::new("coordinates", "out of range"));
            }
        }
        Ok(())
    }

    /// New listings are published straight away; reviews go through moderation instead.
    pub fn into_space(self, id: String, created_at: DateTime<Utc>) -> Space {
        let image = self
            .image
            .map(|image| image.trim().to_string())
            .filter(|image| !image.is_empty())
            .unwrap_or_else(|| DEFAULT_SPACE_IMAGE.to_string());
        let contact_email = self
            .contact_email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());

        Space {
            id,
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            coordinates: self.coordinates.unwrap_or(DEFAULT_COORDINATES),
            price: self.price,
            category: self.category,
            image,
            rating: None,
            amenities: self.amenities,
            distance: None,
            capacity: self.capacity,
            contact_email,
            status: ModerationStatus::Approved,
            created_at: Some(created_at),
        }
    }
}
