use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{sqlite::SqliteRow, FromRow};

use crate::{db::SqlValue, error::AppError};

pub mod admin;
pub mod gallery;
pub mod package;
pub mod response;
pub mod section_image;
pub mod setting;
pub mod stat;
pub mod testimonial;
pub mod venue;
pub mod video;
pub mod wedding_show_video;

pub use gallery::GalleryItem;
pub use package::PackageItem;
pub use section_image::SectionImageItem;
pub use setting::SettingItem;
pub use stat::StatItem;
pub use testimonial::TestimonialItem;
pub use venue::VenueItem;
pub use video::VideoItem;
pub use wedding_show_video::WeddingShowVideoItem;

/// A column name paired with the value to write into it.
pub type Column = (&'static str, SqlValue);

/// Schema of an id-addressed content table served by the generic controller.
///
/// Column names returned by `insert_columns` / `update_columns` are spliced
/// into SQL, so they must be `'static` literals owned by the implementation.
pub trait Resource:
    Serialize + DeserializeOwned + for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;
    /// URL segment under `/api`
    const PATH: &'static str;
    /// Human name used in response messages
    const LABEL: &'static str;
    const ORDER_BY: &'static str = "created_at DESC, id DESC";

    type Create: Serialize + DeserializeOwned + Send + 'static;
    type Patch: Serialize + DeserializeOwned + Send + 'static;

    fn insert_columns(input: Self::Create) -> Result<Vec<Column>, AppError>;
    fn update_columns(patch: Self::Patch) -> Result<Vec<Column>, AppError>;

    fn id(&self) -> i64;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Public paths of uploaded files owned by this row, removed on delete.
    fn stored_files(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Collects the columns present in a create or patch payload.
#[derive(Debug, Default)]
pub struct Columns {
    values: Vec<Column>,
    blank: Vec<&'static str>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must be present and non-blank.
    pub fn required<V: Into<SqlValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        match value.map(Into::into) {
            Some(v) if !v.is_blank() => self.values.push((column, v)),
            _ => self.blank.push(column),
        }
        self
    }

    /// May be absent; when present in a patch it must not be blank.
    pub fn non_blank<V: Into<SqlValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(v) = value.map(Into::into) {
            if v.is_blank() {
                self.blank.push(column);
            } else {
                self.values.push((column, v));
            }
        }
        self
    }

    pub fn optional<V: Into<SqlValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.values.push((column, v.into()));
        }
        self
    }

    pub fn or_default<V: Into<SqlValue>>(
        self,
        column: &'static str,
        value: Option<V>,
        default: V,
    ) -> Self {
        self.optional(column, Some(value.unwrap_or(default)))
    }

    pub fn for_insert(self, requirement: &str) -> Result<Vec<Column>, AppError> {
        if !self.blank.is_empty() {
            return Err(AppError::validation(requirement));
        }
        Ok(self.values)
    }

    pub fn for_update(self) -> Result<Vec<Column>, AppError> {
        if !self.blank.is_empty() {
            return Err(AppError::Validation(format!(
                "{} cannot be empty",
                self.blank.join(", ")
            )));
        }
        if self.values.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        Ok(self.values)
    }
}
