use std::path::PathBuf;
use std::sync::Arc;

use rift_scout::{
    config::AppConfig,
    lcu::{LcuApi, RestClient},
    score::ScoreEngine,
    scout::{Aggregator, ConversationDelivery, Monitor},
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rift_scout=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting rift-scout");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };
    let (port, token) = match config.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let api: Arc<dyn LcuApi> = match RestClient::new(port, &token) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(error = %e, "failed to build client");
            std::process::exit(1);
        }
    };
    let engine = Arc::new(ScoreEngine::new(config.scoring.clone()));
    let aggregator = Arc::new(Aggregator::new(Arc::clone(&api), engine));
    let delivery = Arc::new(ConversationDelivery::new(Arc::clone(&api)));
    let monitor = Arc::new(Monitor::new(
        api,
        aggregator,
        delivery,
        config.auto_accept,
        config.scoring.enabled,
    ));

    monitor.run(port, token).await;
}
