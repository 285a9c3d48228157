use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::{
    db::{self, DbPool, SqlValue},
    error::AppError,
    models::{response::ApiResponse, Column, Resource},
    state::AppState,
    utils::files,
};

type IdPath = WithRejection<Path<i64>, AppError>;

pub async fn find<R: Resource>(pool: &DbPool, id: i64) -> Result<Option<R>, AppError> {
    let sql = format!("SELECT * FROM {} WHERE id = ?", R::TABLE);
    Ok(db::get::<R>(pool, &sql, vec![id.into()]).await?)
}

async fn find_existing<R: Resource>(pool: &DbPool, id: i64) -> Result<R, AppError> {
    find::<R>(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(R::LABEL))
}

// GET /api/{resource}
pub async fn list<R: Resource>(
    State(pool): State<DbPool>,
) -> Result<Json<ApiResponse<Vec<R>>>, AppError> {
    let sql = format!("SELECT * FROM {} ORDER BY {}", R::TABLE, R::ORDER_BY);
    let rows = db::all::<R>(&pool, &sql, vec![]).await?;
    Ok(Json(ApiResponse::list(rows)))
}

// GET /api/{resource}/:id
pub async fn get_one<R: Resource>(
    WithRejection(Path(id), _): IdPath,
    State(pool): State<DbPool>,
) -> Result<Json<ApiResponse<R>>, AppError> {
    let row = find_existing::<R>(&pool, id).await?;
    Ok(Json(ApiResponse::ok(row)))
}

// POST /api/{resource}
pub async fn create<R: Resource>(
    State(pool): State<DbPool>,
    WithRejection(Json(body), _): WithRejection<Json<R::Create>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<R>>), AppError> {
    // Validation happens before anything touches the store
    let mut columns = R::insert_columns(body)?;

    let stamp = SqlValue::timestamp(db::now());
    columns.push(("created_at", stamp.clone()));
    columns.push(("updated_at", stamp));

    let (names, params) = split(columns);
    let placeholders = vec!["?"; names.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::TABLE,
        names.join(", "),
        placeholders
    );

    let write = db::run(&pool, &sql, params).await?;
    let row = find_existing::<R>(&pool, write.last_id).await?;
    tracing::info!(table = R::TABLE, id = write.last_id, "created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            row,
            format!("{} created successfully", R::LABEL),
        )),
    ))
}

// PUT /api/{resource}/:id
pub async fn update<R: Resource>(
    WithRejection(Path(id), _): IdPath,
    State(pool): State<DbPool>,
    WithRejection(Json(body), _): WithRejection<Json<R::Patch>, AppError>,
) -> Result<Json<ApiResponse<R>>, AppError> {
    let existing = find_existing::<R>(&pool, id).await?;

    // Only the fields present in the body; an empty set is refused here
    let mut columns = R::update_columns(body)?;
    columns.push((
        "updated_at",
        SqlValue::timestamp(db::next_timestamp(Some(existing.updated_at()))),
    ));

    let (names, mut params) = split(columns);
    let assignments = names
        .iter()
        .map(|name| format!("{name} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    params.push(id.into());
    let sql = format!("UPDATE {} SET {} WHERE id = ?", R::TABLE, assignments);

    db::run(&pool, &sql, params).await?;
    let row = find_existing::<R>(&pool, id).await?;
    tracing::info!(table = R::TABLE, id, fields = names.len() - 1, "updated");

    Ok(Json(ApiResponse::with_message(
        row,
        format!("{} updated successfully", R::LABEL),
    )))
}

// DELETE /api/{resource}/:id
pub async fn delete<R: Resource>(
    WithRejection(Path(id), _): IdPath,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let existing = find_existing::<R>(&state.pool, id).await?;

    let stored = existing.stored_files();
    if !stored.is_empty() {
        files::remove_public_files(&state.config.upload_dir, &stored).await;
    }

    let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
    db::run(&state.pool, &sql, vec![id.into()]).await?;
    tracing::info!(table = R::TABLE, id, "deleted");

    Ok(Json(ApiResponse::done(format!(
        "{} deleted successfully",
        R::LABEL
    ))))
}

fn split(columns: Vec<Column>) -> (Vec<&'static str>, Vec<SqlValue>) {
    columns.into_iter().unzip()
}
