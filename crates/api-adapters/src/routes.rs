//! Route table and middleware stack.

use std::time::Duration;

use axum::http::Method;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{cases, comments, likes, meta, search, stats, visits};
use crate::metrics;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/api/cases", get(cases::list).post(cases::create))
        .route(
            "/api/cases/{id}",
            get(cases::detail).put(cases::update).delete(cases::remove),
        )
        .route("/api/cases/slug/{slug}", get(cases::by_slug))
        .route("/api/cases/{id}/related", get(cases::related))
        .route("/api/cases/{id}/comments", post(comments::create))
        .route(
            "/api/cases/{id}/comments/{comment_id}",
            axum::routing::put(comments::update).delete(comments::remove),
        )
        .route("/api/cases/{id}/like", get(likes::status).post(likes::toggle))
        .route("/api/search/suggestions", get(search::suggestions))
        .route("/api/search/log", post(search::log))
        .route("/api/search/stats", get(search::stats))
        .route("/api/visits", get(visits::stats).post(visits::log))
        .route("/api/statistics", get(stats::site))
        .route("/api/categories", get(meta::categories))
        .route("/api/health", get(meta::health))
        .route("/sitemap.xml", get(meta::sitemap))
        .route("/robots.txt", get(meta::robots))
        .route("/metrics", get(metrics::export))
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            metrics::track,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .with_state(state)
}
