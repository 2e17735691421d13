//! Request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use tracing::{debug, warn};

use intrinsic_analytics::{
    ImpliedGrowth, MetricsReport, MonteCarloSimulator, ProjectionResult, ReverseDcfInputs,
    ReverseDcfSolver, SimulationConfig, SimulationOutcome, ValuationCalculator,
};
use intrinsic_core::{InputValidator, MethodKind, ValuationConfig};

use crate::error::{ApiError, ApiResult};
use crate::query::QueryParams;

/// Application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Valuation engine settings
    pub valuation: ValuationConfig,
    /// Monte Carlo defaults, overridable per request
    pub simulation: SimulationConfig,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn valuate(state: &AppState, query: &QueryParams, method: MethodKind) -> ApiResult<ProjectionResult> {
    let params = query.valuation_params(method)?;
    let result = ValuationCalculator::new(&state.valuation).calculate(&params)?;
    debug!(
        "{} valuation: intrinsic value {:.2}",
        method,
        result.intrinsic_value()
    );
    Ok(result)
}

/// EPS valuation.
pub async fn eps_valuation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<ProjectionResult>> {
    valuate(&state, &query.into(), MethodKind::Eps).map(Json)
}

/// FCF valuation.
pub async fn fcf_valuation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<ProjectionResult>> {
    valuate(&state, &query.into(), MethodKind::Fcf).map(Json)
}

/// Monte Carlo valuation.
///
/// Falls back to a single deterministic valuation when every trial is
/// rejected; the `mode` field tells the two apart.
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<SimulationOutcome>> {
    let query = QueryParams::from(query);
    let method = query.method()?;
    let params = query.valuation_params(method)?;

    let mut simulation = state.simulation.clone();
    if let Some(trials) = query.trials()? {
        simulation.trials = trials;
    }
    if let Some(seed) = query.integer::<u64>("seed")? {
        simulation.seed = Some(seed);
    }

    // Trials are CPU-bound; keep them off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        MonteCarloSimulator::new(&state.valuation, &simulation).simulate_or_fallback(&params)
    })
    .await
    .map_err(|e| {
        warn!("Simulation task failed: {}", e);
        ApiError::Internal("simulation task failed".to_string())
    })??;

    Ok(Json(outcome))
}

/// Reverse DCF: growth implied by the share price.
pub async fn reverse_dcf(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<ImpliedGrowth>> {
    let query = QueryParams::from(query);
    let method = query.method()?;
    let params = query.valuation_params(method)?;

    let validated = InputValidator::new(&state.valuation)
        .validate(&params)
        .map_err(ApiError::Validation)?;
    let market_price = validated
        .share_price
        .ok_or_else(|| ApiError::MissingParameters(vec!["sharePrice".to_string()]))?;

    let inputs = ReverseDcfInputs::from_valuation(validated.inputs(), market_price, &state.valuation);
    let implied = ReverseDcfSolver::new(&state.valuation).solve(&inputs)?;
    debug!(
        "Implied growth {:.4} after {} iterations",
        implied.implied_growth_rate, implied.iterations
    );
    Ok(Json(implied))
}

/// Metrics response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    intrinsic_value: f64,
    margin_of_safety_price: f64,
    metrics: MetricsReport,
}

/// Derived metrics for one valuation. `netCurrentAssets` enables FCF-for-free.
pub async fn metrics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<MetricsResponse>> {
    let query = QueryParams::from(query);
    let method = query.method()?;
    let result = valuate(&state, &query, method)?;
    let net_current_assets = query.number("netCurrentAssets")?;

    Ok(Json(MetricsResponse {
        intrinsic_value: result.intrinsic_value(),
        margin_of_safety_price: result.margin_of_safety_price(),
        metrics: MetricsReport::from_result(&result, net_current_assets),
    }))
}
