use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::{
    db::{self, DbPool, SqlValue},
    error::AppError,
    models::{
        response::ApiResponse,
        setting::{normalize_key, SettingEntry, SettingItem, SettingValue},
    },
};

const LABEL: &str = "Setting";

pub async fn find_setting(pool: &DbPool, key: &str) -> Result<Option<SettingItem>, AppError> {
    Ok(db::get(pool, "SELECT * FROM settings WHERE key = ?", vec![key.into()]).await?)
}

async fn all_settings(pool: &DbPool) -> Result<Vec<SettingItem>, AppError> {
    Ok(db::all(pool, "SELECT * FROM settings ORDER BY key ASC", vec![]).await?)
}

/// Insert-or-update by key. Returns the stored row and whether it was created.
pub async fn upsert_setting(
    pool: &DbPool,
    key: &str,
    value: &str,
) -> Result<(SettingItem, bool), AppError> {
    let existing = find_setting(pool, key).await?;
    let created = existing.is_none();
    let stamp = db::next_timestamp(existing.map(|s| s.updated_at));

    // created_at only lands on insert; the conflict branch leaves it alone
    db::run(
        pool,
        r#"
        INSERT INTO settings (key, value, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
        vec![
            key.into(),
            value.into(),
            SqlValue::timestamp(stamp),
            SqlValue::timestamp(stamp),
        ],
    )
    .await?;

    let row = find_setting(pool, key)
        .await?
        .ok_or_else(|| AppError::Internal(format!("setting {key} vanished after upsert")))?;
    Ok((row, created))
}

// GET /api/settings (public, the site theme reads it)
pub async fn list_settings_handler(
    State(pool): State<DbPool>,
) -> Result<Json<ApiResponse<Vec<SettingItem>>>, AppError> {
    Ok(Json(ApiResponse::list(all_settings(&pool).await?)))
}

// GET /api/settings/:key
pub async fn get_setting_handler(
    Path(key): Path<String>,
    State(pool): State<DbPool>,
) -> Result<Json<ApiResponse<SettingItem>>, AppError> {
    let row = find_setting(&pool, normalize_key(&key))
        .await?
        .ok_or_else(|| AppError::not_found(LABEL))?;
    Ok(Json(ApiResponse::ok(row)))
}

// PUT /api/settings/:key
pub async fn update_setting_handler(
    Path(key): Path<String>,
    State(pool): State<DbPool>,
    WithRejection(Json(body), _): WithRejection<Json<SettingValue>, AppError>,
) -> Result<(StatusCode, Json<ApiResponse<SettingItem>>), AppError> {
    let value = body
        .value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::validation("Value is required"))?;
    let key = normalize_key(&key);
    if key.is_empty() {
        return Err(AppError::validation("Key is required"));
    }

    let (row, created) = upsert_setting(&pool, key, &value).await?;
    tracing::info!(key = %key, created, "setting saved");

    if created {
        Ok((
            StatusCode::CREATED,
            Json(ApiResponse::with_message(row, "Setting created successfully")),
        ))
    } else {
        Ok((
            StatusCode::OK,
            Json(ApiResponse::with_message(row, "Setting updated successfully")),
        ))
    }
}

// POST /api/settings  [{key, value}, ...]
pub async fn bulk_update_settings_handler(
    State(pool): State<DbPool>,
    WithRejection(Json(body), _): WithRejection<Json<serde_json::Value>, AppError>,
) -> Result<Json<ApiResponse<Vec<SettingItem>>>, AppError> {
    let entries = body
        .as_array()
        .ok_or_else(|| AppError::validation("Settings must be an array"))?;

    let mut applied = 0usize;
    for raw in entries {
        // Malformed entries are skipped, the rest of the batch still applies
        let Some(entry) = SettingEntry::from_json(raw) else {
            tracing::debug!(entry = %raw, "skipping malformed setting entry");
            continue;
        };
        upsert_setting(&pool, &entry.key, &entry.value).await?;
        applied += 1;
    }
    tracing::info!(applied, skipped = entries.len() - applied, "bulk settings update");

    let mut response = ApiResponse::list(all_settings(&pool).await?);
    response.message = Some("Settings updated successfully".to_string());
    Ok(Json(response))
}

// DELETE /api/settings/:key
pub async fn delete_setting_handler(
    Path(key): Path<String>,
    State(pool): State<DbPool>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let write = db::run(
        &pool,
        "DELETE FROM settings WHERE key = ?",
        vec![normalize_key(&key).into()],
    )
    .await?;

    if write.rows_affected == 0 {
        return Err(AppError::not_found(LABEL));
    }
    Ok(Json(ApiResponse::done("Setting deleted successfully")))
}
