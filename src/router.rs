use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

async fn health() -> &'static str {
    "ok"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn init_router(state: AppState) -> Router {
    let cors = {
        let allowed_origins: Vec<HeaderValue> = state
            .cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
    };

    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/health", get(health))
        .nest("/users", init_users_router())
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
}
