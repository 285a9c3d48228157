use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Column, Columns, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub video_path: String,
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Resource for VideoItem {
    const TABLE: &'static str = "videos";
    const PATH: &'static str = "videos";
    const LABEL: &'static str = "Video";

    type Create = NewVideo;
    type Patch = VideoPatch;

    fn insert_columns(input: NewVideo) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .required("title", input.title)
            .required("description", input.description)
            .required("video_path", input.video_path)
            .optional("thumbnail", input.thumbnail)
            .for_insert("Title, description, and video path are required")
    }

    fn update_columns(patch: VideoPatch) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .non_blank("title", patch.title)
            .non_blank("description", patch.description)
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
