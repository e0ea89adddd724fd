// routes.rs
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use http::{header::CONTENT_TYPE, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;
use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/polls", get(handlers::list_polls).post(handlers::create_poll))
        .route("/polls/{id}", get(handlers::get_poll))
        .route("/polls/{id}/responses", post(handlers::vote))
        .route("/polls/{id}/results", get(handlers::get_poll_results))
        .route("/forms", get(handlers::list_forms).post(handlers::create_form))
        .route("/forms/{id}", get(handlers::get_form))
        .route(
            "/forms/{id}/responses",
            get(handlers::list_form_responses).post(handlers::submit_form_response),
        );

    Router::new()
        .nest("/api", api)
        .layer(cors_layer(config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match &config.cors_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}
