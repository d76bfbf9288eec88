//! Market Anomaly API Server

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_anomaly_api::config::{Config, LogFormat};
use market_anomaly_api::{create_router, model, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    init_tracing(config.log_format);

    tracing::info!("Market Anomaly API starting...");
    if config.is_production() {
        tracing::info!("Running in production mode");
    }

    // A missing or invalid artifact is fatal
    let model = match model::load_artifact(&config.model_path) {
        Ok(model) => model,
        Err(e) => {
            tracing::error!("Failed to load model: {}", e);
            return Err(e).with_context(|| format!("cannot serve without {}", config.model_path));
        }
    };

    let addr = config.bind_addr();
    let state = AppState::new(model, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "market_anomaly_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
