pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;

/// Opens the store, creates the schema, seeds the admin account and builds the router.
pub async fn build_app(config: AppConfig) -> Result<axum::Router, AppError> {
    let pool = db::init_db(&config).await?;
    handlers::auth::seed_admin(&pool, &config).await?;
    Ok(routes::create_routes(AppState::new(pool, config)))
}
