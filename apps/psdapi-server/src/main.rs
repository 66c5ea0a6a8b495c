//! PSD API Server - PSD number extraction and parent ID lookup over HTTP.
//!
//! Serves two read-only endpoints:
//!
//! - `GET /api/psd?filename=...` extracts the PSD number from a mapping-sheet
//!   filename
//! - `GET /api/id?psd_number=...` looks up the parent ID of the active
//!   `main_parent` record in Cosmos DB
//!
//! # Usage
//!
//! ```text
//! PSD_API_LISTEN=0.0.0.0:8000 psdapi-server
//! ```
//!
//! # Environment Variables
//!
//! Variables may also be set in a `.env` file in the working directory.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PSD_API_LISTEN` | `0.0.0.0:8000` | Bind address |
//! | `COSMOS_DB_URL` | *(unset)* | Cosmos DB account endpoint |
//! | `COSMOS_DB_KEY` | *(unset)* | Cosmos DB master key (base64) |
//! | `COSMOS_DB_DATABASE` | *(unset)* | Database name |
//! | `COSMOS_DB_CONTAINER` | *(unset)* | Container name |
//! | `COSMOS_DB_LOG_PARTITION_KEY` | `/dType` | Container partition-key path |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use psdapi_core::store::UnavailableStore;
use psdapi_core::store::cosmos::CosmosStore;
use psdapi_core::{CosmosConfig, ParentIdLookup, ParentRecordSource, PsdApiCoreHandler};
use psdapi_http::dispatch::PsdApiHandler;
use psdapi_http::service::{PsdApiHttpConfig, PsdApiHttpService};

/// Server version reported in health check responses.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address.
const DEFAULT_LISTEN: &str = "0.0.0.0:8000";

/// Process-level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerConfig {
    listen: String,
    log_level: String,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            listen: non_empty("PSD_API_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.to_owned()),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_owned()),
        }
    }
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the record source for the parent ID lookup.
///
/// An incomplete or invalid Cosmos configuration does not stop the server:
/// the lookup endpoint then reports the configuration error on every call.
fn build_record_source(config: &CosmosConfig) -> Arc<dyn ParentRecordSource> {
    match CosmosStore::new(config) {
        Ok(store) => {
            info!(
                url = %store.docs_url(),
                partition_key_path = %store.partition_key_path(),
                "configured Cosmos DB record source",
            );
            Arc::new(store)
        }
        Err(e) => {
            warn!(error = %e, "Cosmos DB is not configured, parent ID lookups will fail");
            Arc::new(UnavailableStore::new(e.to_string()))
        }
    }
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve<H: PsdApiHandler>(listener: TcpListener, service: PsdApiHttpService<H>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    // Wait for in-flight requests to complete.
    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Perform a health check by connecting to the server and requesting the health endpoint.
///
/// Exits with code 0 if healthy, 1 otherwise.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"status\":\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();

    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = config.listen.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.log_level)?;

    let cosmos = CosmosConfig::from_env();

    info!(
        listen = %config.listen,
        cosmos = ?cosmos,
        version = VERSION,
        "starting PSD API Server",
    );

    let lookup = ParentIdLookup::new(build_record_source(&cosmos));
    let handler = PsdApiCoreHandler::new(Arc::new(lookup));
    let http_config = PsdApiHttpConfig {
        version: VERSION.to_owned(),
    };
    let service = PsdApiHttpService::new(Arc::new(handler), http_config);

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
