use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use fyyur_db::AppState;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub mod api;

#[derive(Serialize)]
struct ApiStatus {
    status: &'static str,
    version: &'static str,
}

async fn healthz() -> Json<ApiStatus> {
    Json(ApiStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Routes under `/api`.
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/home", get(api::home::overview))
        .route(
            "/venues",
            get(api::venues::list_venues).post(api::venues::create_venue),
        )
        .route("/venues/search", post(api::venues::search_venues))
        .route(
            "/venues/{id}",
            get(api::venues::get_venue)
                .put(api::venues::update_venue)
                .delete(api::venues::delete_venue),
        )
        .route("/venues/{id}/edit", get(api::venues::edit_venue))
        .route(
            "/artists",
            get(api::artists::list_artists).post(api::artists::create_artist),
        )
        .route("/artists/search", post(api::artists::search_artists))
        .route(
            "/artists/{id}",
            get(api::artists::get_artist)
                .put(api::artists::update_artist)
                .delete(api::artists::delete_artist),
        )
        .route("/artists/{id}/edit", get(api::artists::edit_artist))
        .route(
            "/shows",
            get(api::shows::list_shows).post(api::shows::create_show),
        )
}

/// CORS restricted to the comma-separated `origins`. With none configured
/// only same-origin requests are served.
pub fn cors_layer(origins: &str) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if allowed.is_empty() {
        tracing::warn!("CORS_ORIGINS not set, cross-origin requests are refused");
        CorsLayer::new().allow_methods(methods)
    } else {
        tracing::info!("CORS allowed origins: {:?}", allowed);
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// The full application: health check, JSON API, tracing and response
/// hardening.
pub fn router(state: Arc<AppState>) -> Router {
    let origins = std::env::var("CORS_ORIGINS").unwrap_or_default();

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&origins))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}
