pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {
    adapters::stripe::{WebhookVerifier, wh_handler},
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::{get, post},
    },
    domain::{policy::AckPolicy, store::OrderStore},
    std::sync::Arc,
    tower::ServiceBuilder,
    tower_http::trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub verifier: WebhookVerifier,
    pub ack_policy: AckPolicy,
}

pub fn router(state: AppState, webhook_path: &str) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(webhook_path, post(wh_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(64 * 1024)), // 64 KB, Stripe events are typically <20 KB
        )
        .with_state(state)
}
