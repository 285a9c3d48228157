use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    config::AppConfig,
    handlers::{auth, ping_handler, resource, settings, upload},
    models::{
        GalleryItem, PackageItem, Resource, SectionImageItem, StatItem, TestimonialItem, VenueItem,
        VideoItem, WeddingShowVideoItem,
    },
    state::AppState,
    utils::{files::PUBLIC_UPLOAD_PREFIX, jwt::auth_middleware},
};

pub fn create_routes(state: AppState) -> Router {
    // 1. Public: everything the site reads
    let public_routes = Router::new()
        .route("/api/ping", get(ping_handler))
        .route("/api/admin/login", post(auth::login_handler))
        .route("/api/settings", get(settings::list_settings_handler))
        .route("/api/settings/:key", get(settings::get_setting_handler));
    let public_routes = read_routes::<GalleryItem>(public_routes);
    let public_routes = read_routes::<TestimonialItem>(public_routes);
    let public_routes = read_routes::<PackageItem>(public_routes);
    let public_routes = read_routes::<VenueItem>(public_routes);
    let public_routes = read_routes::<VideoItem>(public_routes);
    let public_routes = read_routes::<WeddingShowVideoItem>(public_routes);
    let public_routes = read_routes::<StatItem>(public_routes);
    let public_routes = read_routes::<SectionImageItem>(public_routes);

    // 2. Admin: every write requires a valid bearer token
    let admin_routes = Router::new()
        .route("/api/settings", post(settings::bulk_update_settings_handler))
        .route(
            "/api/settings/:key",
            put(settings::update_setting_handler).delete(settings::delete_setting_handler),
        )
        .route("/api/upload", post(upload::upload_image_handler))
        .route("/api/upload-video", post(upload::upload_video_handler))
        .route(
            "/api/admin/credentials",
            get(auth::get_credentials_handler).put(auth::update_credentials_handler),
        );
    let admin_routes = write_routes::<GalleryItem>(admin_routes);
    let admin_routes = write_routes::<TestimonialItem>(admin_routes);
    let admin_routes = write_routes::<PackageItem>(admin_routes);
    let admin_routes = write_routes::<VenueItem>(admin_routes);
    let admin_routes = write_routes::<VideoItem>(admin_routes);
    let admin_routes = write_routes::<WeddingShowVideoItem>(admin_routes);
    let admin_routes = write_routes::<StatItem>(admin_routes);
    let admin_routes = write_routes::<SectionImageItem>(admin_routes);
    let admin_routes = admin_routes
        .layer(DefaultBodyLimit::max(state.config.upload_body_limit_bytes))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let uploads = ServeDir::new(&state.config.upload_dir);
    let cors = build_cors(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .nest_service(PUBLIC_UPLOAD_PREFIX, uploads)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn read_routes<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    router
        .route(&format!("/api/{}", R::PATH), get(resource::list::<R>))
        .route(&format!("/api/{}/:id", R::PATH), get(resource::get_one::<R>))
}

fn write_routes<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    router
        .route(&format!("/api/{}", R::PATH), post(resource::create::<R>))
        .route(
            &format!("/api/{}/:id", R::PATH),
            put(resource::update::<R>).delete(resource::delete::<R>),
        )
}

// No origins configured means any origin
pub fn build_cors(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}
