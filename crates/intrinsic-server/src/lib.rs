//! # Intrinsic Server
//!
//! REST server for the Intrinsic valuation engine.
//!
//! ## Features
//!
//! - Query-parameter endpoints for EPS and FCF valuations
//! - Monte Carlo and reverse DCF endpoints
//! - Health endpoint
//! - Configuration via TOML file
//!
//! Rates are passed as whole percentages: `growthRate=15` means 15%.
//!
//! ## Usage
//!
//! ```ignore
//! use intrinsic_server::{Server, ServerConfig};
//!
//! let server = Server::new(ServerConfig::default());
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use handlers::AppState;

/// The Intrinsic server.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let state = Arc::new(AppState {
            valuation: self.config.valuation.clone(),
            simulation: self.config.simulation.clone(),
        });

        routes::create_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!("Starting Intrinsic server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
