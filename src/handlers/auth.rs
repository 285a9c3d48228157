use axum::{
    extract::{Json, State},
    Extension,
};
use axum_extra::extract::WithRejection;

use crate::{
    config::AppConfig,
    db::{self, DbPool, SqlValue},
    error::AppError,
    models::{
        admin::{AdminCredential, AuthResponse, Claims, CredentialsPayload},
        response::ApiResponse,
    },
    state::AppState,
    utils::{
        jwt::issue_token,
        security::{hash_password, verify_password},
    },
};

const MISSING_CREDENTIALS: &str = "Username and password are required";

async fn find_by_username(
    pool: &DbPool,
    username: &str,
) -> Result<Option<AdminCredential>, AppError> {
    Ok(db::get(
        pool,
        "SELECT * FROM admin_credentials WHERE username = ?",
        vec![username.into()],
    )
    .await?)
}

async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<AdminCredential>, AppError> {
    Ok(db::get(pool, "SELECT * FROM admin_credentials WHERE id = ?", vec![id.into()]).await?)
}

/// Creates the first admin from configuration when none exists. There is no built-in default.
pub async fn seed_admin(pool: &DbPool, config: &AppConfig) -> Result<(), AppError> {
    let existing: Option<(i64,)> =
        db::get(pool, "SELECT COUNT(*) FROM admin_credentials", vec![]).await?;
    if existing.map(|(n,)| n).unwrap_or(0) > 0 {
        return Ok(());
    }

    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        tracing::warn!(
            "no admin account exists; set ADMIN_USERNAME and ADMIN_PASSWORD to create one"
        );
        return Ok(());
    };

    let stamp = SqlValue::timestamp(db::now());
    db::run(
        pool,
        r#"
        INSERT INTO admin_credentials (username, password_hash, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        "#,
        vec![
            username.as_str().into(),
            hash_password(password)?.into(),
            stamp.clone(),
            stamp,
        ],
    )
    .await?;
    tracing::info!(username = %username, "seeded admin account");
    Ok(())
}

// POST /api/admin/login
pub async fn login_handler(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CredentialsPayload>, AppError>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let (username, password) = payload
        .complete()
        .ok_or_else(|| AppError::validation(MISSING_CREDENTIALS))?;

    // Same answer for unknown user and wrong password
    let admin = match find_by_username(&state.pool, username).await? {
        Some(admin) if verify_password(password, &admin.password_hash) => admin,
        _ => {
            tracing::warn!(username = %username, "failed admin login");
            return Err(AppError::InvalidCredentials);
        }
    };

    let token = issue_token(&state.config, &admin)?;
    tracing::info!(username = %admin.username, "admin logged in");

    Ok(Json(ApiResponse::ok(AuthResponse {
        token,
        token_type: "Bearer".to_string(),
        username: admin.username,
    })))
}

// GET /api/admin/credentials
pub async fn get_credentials_handler(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<AdminCredential>>, AppError> {
    let admin = find_by_id(&pool, claims.admin_id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(ApiResponse::ok(admin)))
}

// PUT /api/admin/credentials
pub async fn update_credentials_handler(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(payload), _): WithRejection<Json<CredentialsPayload>, AppError>,
) -> Result<Json<ApiResponse<AdminCredential>>, AppError> {
    let (username, password) = payload
        .complete()
        .ok_or_else(|| AppError::validation(MISSING_CREDENTIALS))?;

    let admin = find_by_id(&pool, claims.admin_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if let Some(other) = find_by_username(&pool, username).await? {
        if other.id != admin.id {
            return Err(AppError::validation("Username is already taken"));
        }
    }

    db::run(
        &pool,
        "UPDATE admin_credentials SET username = ?, password_hash = ?, updated_at = ? WHERE id = ?",
        vec![
            username.into(),
            hash_password(password)?.into(),
            SqlValue::timestamp(db::next_timestamp(Some(admin.updated_at))),
            admin.id.into(),
        ],
    )
    .await?;
    tracing::info!(admin_id = admin.id, "admin credentials updated");

    let updated = find_by_id(&pool, admin.id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(Json(ApiResponse::with_message(
        updated,
        "Admin credentials updated successfully",
    )))
}
