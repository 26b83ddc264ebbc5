use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trip_server::cache::{CacheConfig, CachedSeed};
use trip_server::catalogue::CatalogueView;
use trip_server::config::{AppConfig, SeedChoice};
use trip_server::seed::{AnySeed, RemoteSeed, RemoteSeedConfig, StaticSeed};
use trip_server::web::{AppState, create_router};

/// Build the seed source chosen by configuration.
fn seed_source(config: &AppConfig) -> anyhow::Result<AnySeed> {
    let seed = match &config.seed {
        SeedChoice::Builtin => AnySeed::Static(StaticSeed::builtin()?),
        SeedChoice::File(path) => AnySeed::Static(
            StaticSeed::from_json_file(path)
                .with_context(|| format!("loading seed file {}", path.display()))?,
        ),
        SeedChoice::Remote(url) => {
            let remote = RemoteSeed::new(RemoteSeedConfig::new(url))?;
            let cache_config = CacheConfig {
                ttl: config.seed_cache_ttl,
                ..CacheConfig::default()
            };
            AnySeed::Remote(CachedSeed::new(remote, &cache_config))
        }
    };
    Ok(seed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trip_server=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    info!(seed = ?config.seed, "starting trip catalogue");

    // Load the first page (fail fast if the seed is unavailable)
    let catalogue = CatalogueView::new(seed_source(&config)?, config.catalogue.clone())?;
    catalogue
        .initialize()
        .await
        .context("loading the first catalogue page")?;

    let app = create_router(AppState::new(catalogue));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "trip catalogue listening");
    info!("  GET    /trips                      - Filtered, sorted catalogue");
    info!("  GET    /trips/:id                  - Trip detail");
    info!("  PUT    /search                     - Set search text");
    info!("  GET    /search/popular             - Popular searches");
    info!("  POST   /catalogue/grow             - Load another page");
    info!("  GET    /facets                     - Filter options");
    info!("  POST   /facets/:id/toggle          - Toggle a filter");

    axum::serve(listener, app).await?;
    Ok(())
}
