use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Column, Columns, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VenueItem {
    pub id: i64,
    pub title: String,
    pub category: String,
    /// Free-form, e.g. "15-30 juta"
    pub price: String,
    pub capacity: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVenue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenuePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Resource for VenueItem {
    const TABLE: &'static str = "venues";
    const PATH: &'static str = "venues";
    const LABEL: &'static str = "Venue";

    type Create = NewVenue;
    type Patch = VenuePatch;

    fn insert_columns(input: NewVenue) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .required("title", input.title)
            .required("category", input.category)
            .required("price", input.price)
            .optional("capacity", input.capacity)
            .optional("description", input.description)
            .optional("image", input.image)
            .for_insert("Title, category, and price are required")
    }

    fn update_columns(patch: VenuePatch) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .non_blank("title", patch.title)
            .non_blank("category", patch.category)
            .non_blank("price", patch.price)
            .optional("capacity", patch.capacity)
            .optional("description", patch.description)
            .optional("image", patch.image)
            .for_update()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
