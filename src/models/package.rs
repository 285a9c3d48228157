use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow, Row};

use super::{Column, Columns, Resource};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub highlighted: bool,
    pub features: Option<Vec<String>>,
    pub long_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// `features` lives in a TEXT column as a JSON array
impl<'r> FromRow<'r, SqliteRow> for PackageItem {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let features: Option<String> = row.try_get("features")?;
        let features = match features {
            Some(raw) => Some(serde_json::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
                index: "features".to_string(),
                source: Box::new(e),
            })?),
            None => None,
        };

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            description: row.try_get("description")?,
            highlighted: row.try_get("highlighted")?,
            features,
            long_description: row.try_get("long_description")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
}

impl Resource for PackageItem {
    const TABLE: &'static str = "packages";
    const PATH: &'static str = "packages";
    const LABEL: &'static str = "Package";

    type Create = NewPackage;
    type Patch = PackagePatch;

    fn insert_columns(input: NewPackage) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .required("name", input.name)
            .required("price", input.price)
            .optional("description", input.description)
            .or_default("highlighted", input.highlighted, false)
            .optional("features", input.features)
            .optional("long_description", input.long_description)
            .for_insert("Name and price are required")
    }

    fn update_columns(patch: PackagePatch) -> Result<Vec<Column>, AppError> {
        Columns::new()
            .non_blank("name", patch.name)
            .non_blank("price", patch.price)
            .optional("description", patch.description)
            .optional("highlighted", patch.highlighted)
            .optional("features", patch.features)
            .optional("long_description", patch.long_description)
            .for_update()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
