use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Column, Columns, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatItem {
    pub id: i64,
    pub label: String,
    pub value: i64,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewStat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Resource for StatItem {
    const TABLE: &'static str = "stats";
    const PATH: &'static str = "stats";
    const LABEL: &'static str = "Stat";

    type Create = NewStat;
    type Patch = StatPatch;

    fn insert_columns(input: NewStat) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .required("label", input.label)
            .required("value", input.value)
            .optional("image", input.image)
            .for_insert("Label and value are required")
    }

    fn update_columns(patch: StatPatch) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .non_blank("label", patch.label)
            .non_blank("value", patch.value)
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
