//! Cosmos DB (SQL API) record source over the REST interface.
//!
//! Queries are `POST /dbs/{db}/colls/{coll}/docs` with
//! `content-type: application/query+json`. Results come back in pages;
//! the `x-ms-continuation` response header names the next page and is sent
//! back on the following request until the store stops returning one.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CosmosConfig;
use crate::error::StoreError;
use crate::lookup::{MAIN_PARENT_DTYPE, MainParentRecord, ParentRecordSource};
use crate::store::auth::{decode_master_key, format_request_date, master_key_token};

/// REST API version sent in `x-ms-version`.
pub const API_VERSION: &str = "2018-12-31";

/// Content type of SQL query requests.
pub const QUERY_CONTENT_TYPE: &str = "application/query+json";

/// Continuation header, used in both directions.
pub const CONTINUATION_HEADER: &str = "x-ms-continuation";

/// Upper bound on result pages read for one query.
pub const MAX_QUERY_PAGES: usize = 100;

/// Query for active `main_parent` records of one PSD number.
///
/// `_ts` is projected so the lookup can pick the most recent record.
pub const MAIN_PARENT_QUERY: &str = "SELECT c.main_parent_id, c._ts FROM c \
     WHERE c.dType = @d_type AND c.psd_number = @psd_number AND c.active = @is_active";

/// A named query parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParameter {
    /// Parameter name, including the leading `@`.
    pub name: &'static str,
    /// Bound value.
    pub value: serde_json::Value,
}

/// Body of a SQL query request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    /// SQL text.
    pub query: &'static str,
    /// Named parameters referenced by the query.
    pub parameters: Vec<QueryParameter>,
}

impl QueryRequest {
    /// The main-parent query bound to `psd_number`.
    #[must_use]
    pub fn main_parent(psd_number: &str) -> Self {
        Self {
            query: MAIN_PARENT_QUERY,
            parameters: vec![
                QueryParameter {
                    name: "@d_type",
                    value: serde_json::Value::from(MAIN_PARENT_DTYPE),
                },
                QueryParameter {
                    name: "@psd_number",
                    value: serde_json::Value::from(psd_number),
                },
                QueryParameter {
                    name: "@is_active",
                    value: serde_json::Value::Bool(true),
                },
            ],
        }
    }
}

/// One page of query results.
#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(rename = "Documents", default)]
    documents: Vec<MainParentRecord>,
}

/// Error body returned by the store on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Record source backed by a Cosmos DB container.
///
/// Holds one `reqwest::Client`, so connections are pooled across lookups.
#[derive(Clone)]
pub struct CosmosStore {
    client: reqwest::Client,
    docs_url: String,
    resource_link: String,
    key: Vec<u8>,
    partition_key_path: String,
}

impl fmt::Debug for CosmosStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmosStore")
            .field("docs_url", &self.docs_url)
            .field("resource_link", &self.resource_link)
            .field("key", &"<redacted>")
            .field("partition_key_path", &self.partition_key_path)
            .finish_non_exhaustive()
    }
}

impl CosmosStore {
    /// Create a store with a default HTTP client.
    pub fn new(config: &CosmosConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("psdapi/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(config, client)
    }

    /// Create a store that sends requests through `client`.
    pub fn with_client(config: &CosmosConfig, client: reqwest::Client) -> Result<Self, StoreError> {
        let (Some(endpoint), Some(key)) = (config.endpoint.as_deref(), config.key.as_deref())
        else {
            return Err(StoreError::config(
                "Missing required environment variables: COSMOS_DB_URL and COSMOS_DB_KEY must be set",
            ));
        };
        let database = config.database.as_deref().ok_or_else(|| {
            StoreError::config("Missing required environment variable: COSMOS_DB_DATABASE")
        })?;
        let container = config.container.as_deref().ok_or_else(|| {
            StoreError::config("Missing required environment variable: COSMOS_DB_CONTAINER")
        })?;

        let key = decode_master_key(key)?;
        let resource_link = format!("dbs/{database}/colls/{container}");
        let docs_url = format!("{}/{resource_link}/docs", endpoint.trim_end_matches('/'));

        Ok(Self {
            client,
            docs_url,
            resource_link,
            key,
            partition_key_path: config.partition_key_path.clone(),
        })
    }

    /// URL that queries are posted to.
    #[must_use]
    pub fn docs_url(&self) -> &str {
        &self.docs_url
    }

    /// Partition-key path of the container.
    #[must_use]
    pub fn partition_key_path(&self) -> &str {
        &self.partition_key_path
    }

    /// Run `request` across all partitions and collect every page.
    pub async fn query(&self, request: &QueryRequest) -> Result<Vec<MainParentRecord>, StoreError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| StoreError::Decode(format!("failed to encode query: {e}")))?;

        let mut records = Vec::new();
        let mut continuation: Option<String> = None;
        let mut pages = 0_usize;

        loop {
            let (page, next) = self.query_page(&body, continuation.as_deref()).await?;
            pages += 1;
            records.extend(page);
            let Some(token) = next else {
                break;
            };
            if continuation.as_deref() == Some(token.as_str()) {
                return Err(StoreError::Decode(format!(
                    "continuation token repeated after {pages} pages"
                )));
            }
            if pages >= MAX_QUERY_PAGES {
                return Err(StoreError::Decode(format!(
                    "query returned more than {MAX_QUERY_PAGES} pages"
                )));
            }
            continuation = Some(token);
        }

        debug!(
            url = %self.docs_url,
            pages,
            records = records.len(),
            "document store query completed",
        );
        Ok(records)
    }

    /// Fetch one page of results.
    async fn query_page(
        &self,
        body: &[u8],
        continuation: Option<&str>,
    ) -> Result<(Vec<MainParentRecord>, Option<String>), StoreError> {
        let date = format_request_date(Utc::now());
        let authorization = master_key_token(&self.key, "post", "docs", &self.resource_link, &date);

        let mut request = self
            .client
            .post(&self.docs_url)
            .header("authorization", authorization)
            .header("x-ms-date", &date)
            .header("x-ms-version", API_VERSION)
            .header("content-type", QUERY_CONTENT_TYPE)
            .header("x-ms-documentdb-isquery", "True")
            .header("x-ms-documentdb-query-enablecrosspartition", "True")
            .body(body.to_vec());
        if let Some(token) = continuation {
            request = request.header(CONTINUATION_HEADER, token);
        }

        let response = request.send().await?;
        let status = response.status();
        let next = response
            .headers()
            .get(CONTINUATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(ToOwned::to_owned);
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(status_error(status, &bytes));
        }

        let page: QueryPage = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok((page.documents, next))
    }
}

/// Build a status error from a non-success response body.
fn status_error(status: reqwest::StatusCode, body: &[u8]) -> StoreError {
    let (code, message) = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => (parsed.code, parsed.message),
        Err(_) => (None, None),
    };
    let message = message.unwrap_or_else(|| {
        let raw = String::from_utf8_lossy(body).trim().to_owned();
        if raw.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_owned()
        } else {
            raw
        }
    });
    StoreError::Status {
        status: status.as_u16(),
        code,
        message,
    }
}

#[async_trait::async_trait]
impl ParentRecordSource for CosmosStore {
    async fn find_active_main_parents(
        &self,
        psd_number: &str,
    ) -> Result<Vec<MainParentRecord>, StoreError> {
        self.query(&QueryRequest::main_parent(psd_number)).await
    }
}
