//! API Router configuration

use super::call_handler::{
    dial_call, hangup_call, health_check, mute_call, test_incoming_call, AppState,
};
use super::metrics_handler::{metrics_handler, record_http_request, Timer};
use super::token_handler::generate_token;
use super::voice_handler::{outbound_voice, receive_call};
use axum::{
    extract::Request,
    http::{header, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Health check route
    let health_routes = Router::new().route("/health", get(health_check));

    // Token issuance
    let token_routes = Router::new().route("/api/token", get(generate_token));

    // Call control routes
    let call_routes = Router::new()
        .route("/api/dial", post(dial_call))
        .route("/api/test-incoming-call", post(test_incoming_call))
        .route("/api/mute", post(mute_call))
        .route("/api/hangup", post(hangup_call));

    // Provider voice callbacks
    let voice_routes = Router::new()
        .route("/voice", post(outbound_voice))
        .route("/api/receive-call", post(receive_call));

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    // Combine routes with state
    Router::new()
        .merge(health_routes)
        .merge(token_routes)
        .merge(call_routes)
        .merge(voice_routes)
        .with_state(state)
        .merge(metrics_routes)
        .layer(middleware::from_fn(track_metrics))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
}

/// Record request count and duration for every route
async fn track_metrics(request: Request, next: Next) -> Response {
    let timer = Timer::new();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    record_http_request(
        method.as_str(),
        &path,
        response.status().as_u16(),
        timer.elapsed(),
    );

    response
}
