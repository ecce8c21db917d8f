use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use voice_clone_orchestrator::services::cloning::ElevenLabsClient;
use voice_clone_orchestrator::services::merge::MergeServiceClient;
use voice_clone_orchestrator::services::storage::{self, S3VoiceStore};
use voice_clone_orchestrator::{config, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = config::Config::from_env();

    let _sentry = config.is_sentry_enabled().then(|| {
        sentry::init((
            config.sentry_dsn.clone(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    // Initialize tracing
    let json_logs = config.log_json;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .with(sentry::integrations::tracing::layer())
        .init();

    if config.api_key.is_empty() {
        tracing::warn!("API_KEY is not set; every /clone-voice request will be rejected");
    }

    let s3 = storage::create_s3_client(&config).await;
    tracing::info!(
        "Object store configured: bucket={} endpoint={}",
        config.bucket,
        config.storage_endpoint
    );

    let merger = MergeServiceClient::new(&config.merge_service_url, &config.merge_service_api_key)?;
    let cloner = ElevenLabsClient::new(&config.elevenlabs_api_url, &config.elevenlabs_api_key)?;

    let port = config.port;
    let state = AppState {
        store: Arc::new(S3VoiceStore::new(s3, config.bucket.clone())),
        merger: Arc::new(merger),
        cloner: Arc::new(cloner),
        config,
    };

    let app = routes::create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
