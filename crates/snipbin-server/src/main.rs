use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use snipbin_server::config::{LogFormat, ServerConfig, StoreKind};
use snipbin_server::service::SnippetService;
use snipbin_server::state::AppState;
use snipbin_storage::{MemoryRepository, S3Repository, SnippetRepository, client};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ServerConfig::from_env()?;
    init_tracing(config.log_format);

    let repo: Arc<dyn SnippetRepository> = match config.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; snippets are lost on restart");
            Arc::new(MemoryRepository::new())
        }
        StoreKind::S3 => {
            let bucket = config
                .bucket
                .clone()
                .ok_or_else(|| eyre::eyre!("SNIPBIN_BUCKET is required for the s3 store"))?;
            let s3 = match &config.s3_endpoint {
                Some(endpoint) => client::build_client_with_endpoint(endpoint).await,
                None => client::build_client().await,
            };
            tracing::info!(bucket = %bucket, prefix = %config.key_prefix, "using s3 store");
            Arc::new(S3Repository::new(s3, bucket, config.key_prefix.clone()))
        }
    };

    let service = SnippetService::new(repo).with_max_page_size(config.max_page_size);
    let app = snipbin_server::app(AppState::new(service), config.static_dir.as_deref());

    if config.lambda {
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
