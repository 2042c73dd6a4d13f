//! Gallery API - image listing and profile proxy server.
//!
//! This binary starts the HTTP server and wires up all components.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gallery_api::{
    create_router, create_s3_client,
    profile::{create_secrets_client, TwitterProfileSource},
    storage::LISTING_PREFIX,
    AppState, Config, RouterConfig, S3ImageStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    info!("Configuration:");
    info!("  Bind address: {}", config.bind_address());
    info!(
        "  S3 bucket: {}",
        config.bucket.as_deref().unwrap_or("(unset)")
    );
    if let Some(ref endpoint) = config.s3_endpoint {
        info!("  S3 endpoint: {}", endpoint);
    }
    info!("  S3 region: {}", config.s3_region);
    info!(
        "  Origin header: {}",
        config.origin_header_name.as_deref().unwrap_or("(unset)")
    );
    info!(
        "  Twitter secret: {}",
        if config.twitter_secret_arn.is_some() {
            "configured"
        } else {
            "(unset)"
        }
    );

    // Missing values are not fatal at startup: the gate reports them as a
    // 500 with the exact names on every request.
    let missing = config.missing_required();
    if !missing.is_empty() {
        warn!(
            ?missing,
            "Required configuration unset; API requests will answer 500 until provided"
        );
    }

    // Create AWS clients
    let s3_client = create_s3_client(config.s3_endpoint.as_deref(), &config.s3_region).await;
    let secrets_client = create_secrets_client(&config.s3_region).await;

    // Probe the bucket so a bad deployment is visible in the logs at start
    if let Some(ref bucket) = config.bucket {
        info!("Connecting to S3...");
        match probe_bucket(&s3_client, bucket).await {
            Ok(count) => {
                info!("  Connected successfully");
                info!("  Found {} image(s) under '{}'", count, LISTING_PREFIX);
            }
            Err(e) => {
                warn!("  Failed to list bucket '{}': {}", bucket, e);
                warn!("  Please check:");
                warn!("    - Your AWS credentials are configured correctly");
                warn!("    - The bucket exists and is accessible");
                warn!("    - The S3 endpoint is correct (if using MinIO/custom S3)");
            }
        }
    }

    let store = S3ImageStore::new(s3_client, config.bucket.clone().unwrap_or_default());
    let profile = TwitterProfileSource::new(secrets_client, config.twitter_secret_arn.clone());
    let state = AppState::new(store, profile);

    let router_config = build_router_config(&config);
    let addr = config.bind_address();
    let router = create_router(state, Arc::new(config), router_config);

    info!("");
    info!("Server listening on: http://{}", addr);
    info!("  Health check: curl http://{}/health", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Count images under the gallery prefix with a single listing call.
async fn probe_bucket(client: &aws_sdk_s3::Client, bucket: &str) -> Result<usize, String> {
    let result = client
        .list_objects_v2()
        .bucket(bucket)
        .prefix(LISTING_PREFIX)
        .max_keys(1000)
        .send()
        .await
        .map_err(|e| format!("{}", e))?;

    let count = result
        .contents()
        .iter()
        .filter(|obj| obj.key().map(|k| !k.ends_with('/')).unwrap_or(false))
        .count();

    Ok(count)
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "gallery_api=debug,tower_http=debug"
    } else {
        "gallery_api=info,tower_http=info"
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
    let mut router_config = RouterConfig::new();

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}
