//! Antiposta - Main Entry Point
//!
//! Loads configuration, opens the store, bootstraps the workbench and runs
//! the console on stdin/stdout until end of input.

use std::error::Error;
use std::io::IsTerminal;
use std::sync::Arc;

use antiposta::{AppConfig, Console};
use antiposta_application::{KeyValueStore, StorageAdapter, StorageKeys};
use antiposta_infrastructure::{JsonFileStore, MemoryStore, ReqwestHttpClient};
use antiposta_ui::Workbench;
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level);

    let client = Arc::new(ReqwestHttpClient::with_user_agent(&config.user_agent)?);

    if config.ephemeral {
        tracing::info!("Using in-memory storage");
        run(client, MemoryStore::new(), &config).await
    } else {
        let store = JsonFileStore::open_in(&config.data_dir)?;
        tracing::info!(path = %store.path().display(), "Using file storage");
        run(client, store, &config).await
    }
}

fn init_tracing(default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

async fn run<S: KeyValueStore>(
    client: Arc<ReqwestHttpClient>,
    store: S,
    config: &AppConfig,
) -> Result<(), Box<dyn Error>> {
    let storage = StorageAdapter::new(Arc::new(store), StorageKeys::with_prefix(&config.app_name));
    let mut workbench =
        Workbench::new(client, storage).with_history_limit(config.history_limit);
    workbench.bootstrap().await;

    let mut console = Console::new(workbench);
    let mut stdout = tokio::io::stdout();
    if std::io::stdin().is_terminal() {
        console.run_interactive(&mut stdout).await?;
    } else {
        console
            .run(BufReader::new(tokio::io::stdin()), &mut stdout)
            .await?;
    }

    Ok(())
}
