//! Open Library loader - loads the author dump, then the work dump.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openlibrary_loader::{
    config::{AppConfig, StorageBackend},
    repository::{CatalogStore, MemoryRepository, Repository},
    services::LoaderService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("openlibrary_loader={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Open Library loader v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn CatalogStore> = match config.storage.backend {
        StorageBackend::Postgres => Arc::new(Repository::connect(&config.database).await?),
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, nothing will be persisted");
            Arc::new(MemoryRepository::new())
        }
    };

    let loader = LoaderService::new(store).with_progress_every(config.dump.progress_every);
    let report = loader.run(&config.dump.authors, &config.dump.works).await;

    tracing::info!(
        report = %serde_json::to_string(&report)?,
        "Load report"
    );

    Ok(())
}
