use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    config::AppConfig,
    error::AppError,
    models::admin::{AdminCredential, Claims},
    state::AppState,
};

pub fn issue_token(config: &AppConfig, admin: &AdminCredential) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(config.jwt_ttl_hours))
        .ok_or_else(|| AppError::Internal("token expiry overflow".to_string()))?;

    let claims = Claims {
        sub: admin.username.clone(),
        exp: expiration.timestamp() as usize,
        iat: now.timestamp() as usize,
        admin_id: admin.id,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
}

pub fn verify_token(config: &AppConfig, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        AppError::Unauthorized
    })
}

// Runs in front of every mutating route; handlers read the claims from extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(auth) = auth.ok_or(AppError::Unauthorized)?;
    let claims = verify_token(&state.config, auth.token())?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn admin() -> AdminCredential {
        AdminCredential {
            id: 7,
            username: "admin".into(),
            password_hash: String::new(),
            created_at: db::now(),
            updated_at: db::now(),
        }
    }

    #[test]
    fn issued_token_verifies_with_the_same_secret() {
        let cfg = AppConfig::in_memory("/tmp/unused", "s3cret");
        let token = issue_token(&cfg, &admin()).unwrap();
        let claims = verify_token(&cfg, &token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.admin_id, 7);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = issue_token(&AppConfig::in_memory("/tmp/unused", "one"), &admin()).unwrap();
        let err = verify_token(&AppConfig::in_memory("/tmp/unused", "two"), &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
