//! Liveness and readiness probes.
//!
//! # Design Decisions
//! - Liveness only says the process is serving requests
//! - Readiness flips to 503 as soon as shutdown starts, so load balancers
//!   stop routing here while in-flight requests drain

use axum::{extract::State, http::StatusCode};

use crate::http::server::AppState;

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.shutdown.is_triggered() {
        (StatusCode::SERVICE_UNAVAILABLE, "shutting down")
    } else {
        (StatusCode::OK, "ready")
    }
}
