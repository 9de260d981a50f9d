//! Request metrics via prometheus-client.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

use crate::state::AppState;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RequestLabels {
    pub method: String,
    pub status: u32,
}

pub struct HttpMetrics {
    registry: Registry,
    requests: Family<RequestLabels, Counter>,
}

impl HttpMetrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();
        let requests = Family::<RequestLabels, Counter>::default();
        registry.register("http_requests", "HTTP requests handled", requests.clone());
        Self { registry, requests }
    }

    pub fn observe(&self, method: &Method, status: StatusCode) {
        self.requests
            .get_or_create(&RequestLabels {
                method: method.as_str().to_string(),
                status: u32::from(status.as_u16()),
            })
            .inc();
    }

    pub fn encode_text(&self) -> String {
        let mut buf = String::new();
        if let Err(err) = encode(&mut buf, &self.registry) {
            tracing::error!(error = %err, "metrics encoding failed");
        }
        buf
    }
}

impl Default for HttpMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts every handled request by method and status.
pub async fn track(
    State(metrics): State<Arc<HttpMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let response = next.run(req).await;
    metrics.observe(&method, response.status());
    response
}

pub async fn export(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        state.metrics.encode_text(),
    )
}
