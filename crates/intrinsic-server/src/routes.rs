//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `state` - Engine settings shared by every request
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Deterministic valuation
        .route("/api/v1/eps", get(handlers::eps_valuation))
        .route("/api/v1/fcf", get(handlers::fcf_valuation))
        // Uncertainty
        .route("/api/v1/simulate", get(handlers::simulate))
        // Market-implied growth
        .route("/api/v1/reverse-dcf", get(handlers::reverse_dcf))
        // Derived analytics
        .route("/api/v1/metrics", get(handlers::metrics))
        // State
        .with_state(state)
}
