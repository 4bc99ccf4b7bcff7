pub mod slash;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use common::types::Health;

use crate::metrics;
pub use slash::{CceState, CerinoState, MemeState, ServerState};

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: health, metrics and one POST route per
/// configured slash command.
pub fn build_router(state: ServerState) -> Router {
    let mut app: Router = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .merge(Router::new().route("/meme", post(slash::meme)).with_state(state.meme));
    if let Some(cce) = state.cce {
        app = app.merge(Router::new().route("/cce", post(slash::cce)).with_state(cce));
    }
    if let Some(cerino) = state.cerino {
        app = app.merge(Router::new().route("/cerino", post(slash::cerino)).with_state(cerino));
    }

    app
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    // one INFO span per request with method and path
                    .make_span_with(
                        DefaultMakeSpan::new()
                            .level(Level::INFO)
                            .include_headers(false),
                    )
                    .on_request(
                        DefaultOnRequest::new()
                            .level(Level::DEBUG),
                    )
                    // status code and latency
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .include_headers(false),
                    )
                    // 5xx at ERROR
                    .on_failure(
                        DefaultOnFailure::new()
                            .level(Level::ERROR),
                    ),
            ),
        )
}
