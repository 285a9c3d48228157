use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Column, Columns, Resource};
use crate::error::AppError;

/// Wedding show clip: just the uploaded video and an optional thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WeddingShowVideoItem {
    pub id: i64,
    pub video_path: String,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWeddingShowVideo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeddingShowVideoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Resource for WeddingShowVideoItem {
    const TABLE: &'static str = "wedding_show_videos";
    const PATH: &'static str = "wedding-show-videos";
    const LABEL: &'static str = "Wedding show video";

    type Create = NewWeddingShowVideo;
    type Patch = WeddingShowVideoPatch;

    fn insert_columns(input: NewWeddingShowVideo) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .required("video_path", input.video_path)
            .optional("thumbnail", input.thumbnail)
            .for_insert("Video path is required")
    }

    fn update_columns(patch: WeddingShowVideoPatch) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .non_blank("video_path", patch.video_path)
            .optional("thumbnail", patch.thumbnail)
            .for_update()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stored_files(&self) -> Vec<&str> {
        let mut files = vec![self.video_path.as_str()];
        files.extend(self.thumbnail.as_deref().filter(|t| !t.is_empty()));
        files
    }
}
