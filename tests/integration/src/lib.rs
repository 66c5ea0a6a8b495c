//! End-to-end tests for the PSD API HTTP service.
//!
//! Each test binds the real service on an ephemeral local port with its own
//! record source and talks to it over HTTP with `reqwest`.
//!
//! Tests in `test_live` instead target an already running server and are
//! marked `#[ignore]`. Run them with:
//! ```text
//! PSD_API_ENDPOINT_URL=http://localhost:8000 cargo test -p psdapi-integration -- --ignored
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Once};

use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;

use psdapi_core::store::cosmos::CosmosStore;
use psdapi_core::store::memory::InMemoryStore;
use psdapi_core::{CosmosConfig, ParentIdLookup, ParentRecordSource, PsdApiCoreHandler};
use psdapi_http::service::{PsdApiHttpConfig, PsdApiHttpService};

#[cfg(test)]
mod test_id;
#[cfg(test)]
mod test_live;
#[cfg(test)]
mod test_psd;
#[cfg(test)]
mod test_routing;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL of an externally started server.
#[must_use]
pub fn live_endpoint_url() -> String {
    std::env::var("PSD_API_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8000".to_owned())
}

/// HTTP client that never goes through a proxy.
#[must_use]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("failed to build HTTP client")
}

/// A PSD API service running in the current test's runtime.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
}

impl TestServer {
    /// Start the service over `source` on an ephemeral port.
    pub async fn start(source: Arc<dyn ParentRecordSource>) -> Self {
        init_tracing();

        let lookup = ParentIdLookup::new(source);
        let handler = PsdApiCoreHandler::new(Arc::new(lookup));
        let service = PsdApiHttpService::new(Arc::new(handler), PsdApiHttpConfig::default());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no address");

        tokio::spawn(async move {
            let http = HttpConnBuilder::new(TokioExecutor::new());
            while let Ok((stream, _)) = listener.accept().await {
                let conn = http
                    .serve_connection(TokioIo::new(stream), service.clone())
                    .into_owned();
                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        tracing::debug!(error = %e, "test connection error");
                    }
                });
            }
        });

        Self {
            addr,
            client: http_client(),
        }
    }

    /// Start the service over an in-memory store holding `documents`.
    pub async fn with_documents(documents: impl IntoIterator<Item = serde_json::Value>) -> Self {
        let store = InMemoryStore::new();
        for document in documents {
            store.insert(document);
        }
        Self::start(Arc::new(store)).await
    }

    /// Start the service over an empty in-memory store.
    pub async fn empty() -> Self {
        Self::start(Arc::new(InMemoryStore::new())).await
    }

    /// Absolute URL for `path_and_query`.
    #[must_use]
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{path_and_query}", self.addr)
    }

    /// Send `GET path_and_query`.
    pub async fn get(&self, path_and_query: &str) -> reqwest::Response {
        self.client
            .get(self.url(path_and_query))
            .send()
            .await
            .unwrap_or_else(|e| panic!("GET {path_and_query} failed: {e}"))
    }

    /// Send a request with an arbitrary method.
    pub async fn request(&self, method: reqwest::Method, path_and_query: &str) -> reqwest::Response {
        self.client
            .request(method, self.url(path_and_query))
            .send()
            .await
            .unwrap_or_else(|e| panic!("request to {path_and_query} failed: {e}"))
    }
}

/// An active `main_parent` document.
#[must_use]
pub fn main_parent(psd_number: &str, parent_id: &str, ts: i64) -> serde_json::Value {
    serde_json::json!({
        "id": format!("{psd_number}-{ts}"),
        "dType": "main_parent",
        "psd_number": psd_number,
        "active": true,
        "main_parent_id": parent_id,
        "_ts": ts,
    })
}

/// A Cosmos-backed source whose endpoint refuses connections.
pub async fn unreachable_cosmos_source() -> Arc<dyn ParentRecordSource> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("listener has no address");
    drop(listener);

    let config = CosmosConfig {
        endpoint: Some(format!("http://{addr}/")),
        key: Some("c2VjcmV0LWtleS1mb3ItdGVzdHM=".to_owned()),
        database: Some("psd".to_owned()),
        container: Some("records".to_owned()),
        partition_key_path: "/dType".to_owned(),
    };
    let store = CosmosStore::with_client(&config, http_client())
        .expect("test Cosmos configuration is valid");
    Arc::new(store)
}
