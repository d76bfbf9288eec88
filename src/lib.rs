//! Market Anomaly API
//!
//! Classifies a snapshot of nine market indicators as anomalous or normal
//! using a classifier trained offline and loaded once at startup.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  MARKET ANOMALY API                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────────┐   ┌───────────────┐  │
//! │  │  Router   │──►│ MarketSnapshot │──►│  Classifier   │  │
//! │  │  (Axum)   │   │  → features    │   │  (Arc, r/o)   │  │
//! │  └───────────┘   └────────────────┘   └───────┬───────┘  │
//! │                                               ▼          │
//! │                                      ┌────────────────┐  │
//! │                                      │ model artifact │  │
//! │                                      │    (JSON)      │  │
//! │                                      └────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod features;
pub mod handlers;
pub mod model;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<model::Model>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(model: model::Model, config: config::Config) -> Self {
        Self {
            model: Arc::new(model),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        .route("/model", get(handlers::model::info))
        .route("/predict", post(handlers::predict::predict))
        .fallback(handlers::health::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
