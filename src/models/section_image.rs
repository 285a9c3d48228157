use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Column, Columns, Resource};
use crate::error::AppError;

/// Image slot of a page section (hero, about, ...). Own fields are snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SectionImageItem {
    pub id: i64,
    pub section: String,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub order_index: i64,
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSectionImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionImagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Resource for SectionImageItem {
    const TABLE: &'static str = "section_images";
    const PATH: &'static str = "section-images";
    const LABEL: &'static str = "Section image";
    const ORDER_BY: &'static str = "order_index ASC, id ASC";

    type Create = NewSectionImage;
    type Patch = SectionImagePatch;

    fn insert_columns(input: NewSectionImage) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .required("section", input.section)
            .required("image_url", input.image_url)
            .optional("alt_text", input.alt_text)
            .or_default("order_index", input.order_index, 0)
            .or_default("is_active", input.is_active, true)
            .for_insert("Section and image_url are required")
    }

    fn update_columns(patch: SectionImagePatch) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .non_blank("section", patch.section)
            .non_blank("image_url", patch.image_url)
            .optional("alt_text", patch.alt_text)
            .optional("order_index", patch.order_index)
            .optional("is_active", patch.is_active)
            .for_update()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
