use nursery_shipping::api::{self, ApiState};
use nursery_shipping::config::AppConfig;
use nursery_shipping::store::{MemoryBackend, PackageStore, load_seed_catalog};

#[tokio::main]
async fn main() {
    // Load .env before the subscriber so RUST_LOG can come from it.
    let dotenv_result = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = dotenv_result {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("Could not load .env: {}", err);
        }
    }

    let app_config = AppConfig::from_env();

    let mut store = match PackageStore::load(MemoryBackend::new()) {
        Ok(store) => store,
        Err(err) => {
            tracing::error!("Could not open package store: {}", err);
            std::process::exit(1);
        }
    };

    if let Some(path) = app_config.shipping.catalog_path() {
        match load_seed_catalog(path).and_then(|drafts| store.seed(drafts)) {
            Ok(count) => tracing::info!("Loaded {} package definitions from {}", count, path.display()),
            Err(err) => {
                tracing::error!("{}", err);
                std::process::exit(1);
            }
        }
    } else {
        tracing::warn!("No package catalog configured; calculations report no configuration until packages are added");
    }

    tracing::info!("Shipping service starting...");
    let state = ApiState::new(store, app_config.shipping.clone());
    if let Err(err) = api::start_api_server(app_config.api, state).await {
        tracing::error!("API server terminated with an error: {}", err);
        std::process::exit(1);
    }
}
