use std::sync::Arc;

use anyhow::Result;
use country_data::Dataset;
use country_info::RestCountriesClient;
use map_dashboard::{App, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let (settings, config_errors) = Settings::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| settings.default_log_filter().into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    for error in &config_errors {
        tracing::warn!("{}", error);
    }

    let dataset = match &settings.dataset_path {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::load_embedded()?,
    };
    tracing::info!("   Loaded {} countries ({})", dataset.len(), dataset.year());

    let source = RestCountriesClient::new(settings.fetcher_config())?;
    tracing::info!("   Country directory: {}", settings.country_api_url);

    let app = App::new(settings, Arc::new(dataset), Arc::new(source));
    let handle = app.start().await?;
    tracing::info!("🗺️  World map dashboard running at http://{}", handle.local_addr());

    tokio::signal::ctrl_c().await?;
    tracing::info!("   Shutting down");
    handle.stop().await
}
