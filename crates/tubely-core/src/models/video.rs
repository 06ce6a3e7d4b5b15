use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::media::AssetKind;

/// A video record. Locators are set by the upload pipeline and are otherwise
/// immutable from the API's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Video {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub user_id: Uuid,
}

impl Video {
    /// Build a fresh record with no assets attached yet.
    pub fn new(user_id: Uuid, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title,
            description,
            thumbnail_url: None,
            video_url: None,
            user_id,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Write `locator` into the field that corresponds to `kind`.
    pub fn set_locator(&mut self, kind: AssetKind, locator: String) {
        match kind {
            AssetKind::Video => self.video_url = Some(locator),
            AssetKind::Thumbnail => self.thumbnail_url = Some(locator),
        }
    }

    pub fn locator(&self, kind: AssetKind) -> Option<&str> {
        match kind {
            AssetKind::Video => self.video_url.as_deref(),
            AssetKind::Thumbnail => self.thumbnail_url.as_deref(),
        }
    }
}

/// Body of `POST /api/videos`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}
