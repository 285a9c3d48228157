use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Column, Columns, Resource};
use crate::error::AppError;

pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialItem {
    pub id: i64,
    pub name: String,
    pub text: String,
    pub rating: i64,
    /// ISO date as entered by the admin, e.g. `2024-06-15`
    pub date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTestimonial {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestimonialPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

fn check_rating(rating: Option<i64>) -> Result<(), AppError> {
    match rating {
        Some(r) if !RATING_RANGE.contains(&r) => {
            Err(AppError::validation("Rating must be between 1 and 5"))
        }
        _ => Ok(()),
    }
}

impl Resource for TestimonialItem {
    const TABLE: &'static str = "testimonials";
    const PATH: &'static str = "testimonials";
    const LABEL: &'static str = "Testimonial";

    type Create = NewTestimonial;
    type Patch = TestimonialPatch;

    fn insert_columns(input: NewTestimonial) -> Result<Vec<Column>, AppError> {
        let rating = input.rating;
        let columns = Columns::new()
            .required("name", input.name)
            .required("text", input.text)
            .required("rating", rating)
            .required("date", input.date)
            .for_insert("Name, text, rating, and date are required")?;
        check_rating(rating)?;
        Ok(columns)
    }

    fn update_columns(patch: TestimonialPatch) -> Result<Vec<Column>, AppError> {
        check_rating(patch.rating)?;
        Columns::new()
            .non_blank("name", patch.name)
            .non_blank("text", patch.text)
            .non_blank("rating", patch.rating)
            .non_blank("date", patch.date)
            .for_update()
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
