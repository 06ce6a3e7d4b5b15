//! Route configuration and setup

use crate::handlers;
use crate::middleware::error_details_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::constants::{API_PREFIX, ASSETS_PREFIX};
use tubely_core::Config;

/// Build the application router.
///
/// Each upload route carries its own body limit; nothing else accepts a body
/// larger than axum's default.
pub fn build_router(config: &Config, state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/videos", post(handlers::videos::create_video))
        .route("/videos/{video_id}", get(handlers::videos::get_video))
        .route(
            "/video_upload/{video_id}",
            post(handlers::video_upload::upload_video)
                .layer(DefaultBodyLimit::max(config.max_video_size_bytes())),
        )
        .route(
            "/thumbnail_upload/{video_id}",
            post(handlers::thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(config.max_thumbnail_size_bytes())),
        )
        .route(
            "/openapi.json",
            get(|| async { Json(crate::api_doc::openapi_spec()) }),
        );

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest(API_PREFIX, api);

    if let Some(root) = config.assets_root() {
        tracing::info!(root = %root.display(), "Serving local assets");
        app = app.nest_service(ASSETS_PREFIX, ServeDir::new(root));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors())
            .layer(axum::middleware::from_fn_with_state(
                config.is_production(),
                error_details_middleware,
            )),
    )
    .with_state(state)
}

fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
