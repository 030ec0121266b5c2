//! Thumbnail service binary.
//!
//! Parses configuration, sets up logging and serves the HTTP API.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thumbnail_service::{
    config::Config,
    fetch::HttpImageSource,
    server::{create_router, RouterConfig},
    thumbnail::ThumbnailService,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Thumbnail service v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Default JPEG quality: {}", config.jpeg_quality);
    info!("  Fill color: {}", config.fill_color);
    info!(
        "  Fetch: timeout {}s, max {} bytes",
        config.fetch_timeout, config.max_source_bytes
    );
    info!("  Max thumbnail dimension: {}px", config.max_dimension);

    let source = match HttpImageSource::new(config.fetch_timeout(), config.max_source_bytes) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = ThumbnailService::new(source)
        .with_fill(config.fill_color)
        .with_default_quality(config.jpeg_quality);

    let router = create_router(service, build_router_config(&config));

    let addr = config.bind_address();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server listening on: http://{}", addr);
    info!(
        "  Try: curl -o thumb.jpg 'http://{}/thumbnail?url=<image-url>&x=200&y=200'",
        addr
    );

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "thumbnail_service=debug,tower_http=debug"
    } else {
        "thumbnail_service=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new()
        .with_cache_max_age(config.cache_max_age)
        .with_max_dimension(config.max_dimension)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}
