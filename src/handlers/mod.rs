pub mod auth;
pub mod resource;
pub mod settings;
pub mod upload;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

// GET /api/ping
pub async fn ping_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "message": state.config.ping_message }))
}
