use actix_web::{web, App, HttpServer};
use chain_config_service::{
    api::{self, AppState},
    config,
    representation::ChainSerializer,
    store::{ChainStore, InMemoryChainStore},
};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

/// Application entry point
///
/// This is the main function that:
/// 1. Sets up logging
/// 2. Loads configuration
/// 3. Loads the chain fixture into memory
/// 4. Starts the HTTP server with all endpoints
#[actix_web::main] // Actix will build a multithreaded runtime
async fn main() -> eyre::Result<()> {
    // Info level for our service, errors only for the web framework
    let filter = EnvFilter::from_default_env()
        .add_directive("chain_config_service=info".parse()?)
        .add_directive("actix_web=error".parse()?);

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = config::Config::from_env()?;

    let store: Arc<dyn ChainStore> =
        Arc::new(InMemoryChainStore::from_json_file(&config.chains_fixture).await?);

    let state = Arc::new(AppState::new(
        store,
        ChainSerializer::new(config.media_base_url.clone()),
        config.default_page_limit,
    ));

    info!("Listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            // Add logging middleware
            .wrap(TracingLogger::default())
            // Shared between all workers
            .app_data(web::Data::new(state.clone()))
            .configure(api::configure)
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
