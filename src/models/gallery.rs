use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Column, Columns, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGalleryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Resource for GalleryItem {
    const TABLE: &'static str = "gallery";
    const PATH: &'static str = "gallery";
    const LABEL: &'static str = "Gallery item";

    type Create = NewGalleryItem;
    type Patch = GalleryPatch;

    fn insert_columns(input: NewGalleryItem) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .required("title", input.title)
            .required("category", input.category)
            .required("image", input.image)
            .for_insert("Title, category, and image are required")
    }

    fn update_columns(patch: GalleryPatch) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .non_blank("title", patch.title)
            .non_blank("category", patch.category)
            .non_blank("image", patch.image)
            .for_update()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
