// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the ZeroDB data platform API.
//!
//! Provides [`ZeroDbClient`] which handles connection lifecycle, request
//! construction, authentication headers, and translation of transport
//! failures and HTTP status codes into the application error taxonomy.

use std::time::Duration;

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use serde_json::{Map, Value, json};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use docflow_config::ZeroDbConfig;
use docflow_core::{DocflowError, ErrorDetail};

/// Service name attached to upstream-failure errors.
const SERVICE_NAME: &str = "ZeroDB";

/// Async client for all ZeroDB operations.
///
/// The underlying HTTP handle is created lazily on first use and shared
/// across concurrent requests; reqwest's connection pool makes concurrent
/// use safe without locking around individual calls. [`close`](Self::close)
/// drops the handle, and a later request transparently reconnects.
///
/// Own the client once at process start and share it via `Arc`; scoped
/// instances (e.g. for isolated test runs) can be built and torn down
/// independently.
pub struct ZeroDbClient {
    base_url: String,
    api_key: String,
    project_id: String,
    timeout: Duration,
    http: RwLock<Option<reqwest::Client>>,
}

impl std::fmt::Debug for ZeroDbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroDbClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("project_id", &self.project_id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ZeroDbClient {
    /// Creates a new client from configuration. No connection is opened
    /// until the first request or an explicit [`connect`](Self::connect).
    pub fn new(config: &ZeroDbConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            project_id: config.project_id.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            http: RwLock::new(None),
        }
    }

    /// Initialize the HTTP connection handle.
    ///
    /// Idempotent: a no-op when a live handle already exists.
    pub async fn connect(&self) -> Result<(), DocflowError> {
        let mut guard = self.http.write().await;
        if guard.is_none() {
            *guard = Some(self.build_http()?);
            info!(base_url = %self.base_url, "ZeroDB client connected");
        }
        Ok(())
    }

    /// Release the HTTP connection handle.
    ///
    /// Safe to call when already closed. A subsequent request reconnects.
    pub async fn close(&self) {
        let mut guard = self.http.write().await;
        if guard.take().is_some() {
            info!("ZeroDB client connection closed");
        }
    }

    fn build_http(&self) -> Result<reqwest::Client, DocflowError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|e| {
                DocflowError::internal(format!("invalid ZeroDB api key header value: {e}"))
            })?,
        );
        headers.insert(
            "x-project-id",
            HeaderValue::from_str(&self.project_id).map_err(|e| {
                DocflowError::internal(format!("invalid ZeroDB project id header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(|e| DocflowError::internal(format!("failed to build HTTP client: {e}")))
    }

    /// Get the connection handle, creating it if absent.
    async fn handle(&self) -> Result<reqwest::Client, DocflowError> {
        {
            let guard = self.http.read().await;
            if let Some(client) = guard.as_ref() {
                return Ok(client.clone());
            }
        }
        let mut guard = self.http.write().await;
        if let Some(client) = guard.as_ref() {
            return Ok(client.clone());
        }
        let client = self.build_http()?;
        *guard = Some(client.clone());
        info!(base_url = %self.base_url, "ZeroDB client connected");
        Ok(client)
    }

    /// Make an HTTP request to the project-scoped database API.
    ///
    /// Builds the final path as `/projects/{project_id}/database{path}`,
    /// attaches the bearer/project headers, and interprets the response.
    ///
    /// # Errors
    ///
    /// Transport timeouts and connection failures surface as
    /// `ExternalService`; non-2xx statuses map to the taxonomy kind fixed
    /// for that status.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: Option<&[(String, String)]>,
    ) -> Result<Value, DocflowError> {
        let client = self.handle().await?;
        let url = format!(
            "{}/projects/{}/database{}",
            self.base_url, self.project_id, path
        );
        debug!(%method, %url, "ZeroDB request");

        let mut builder = client.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(query) = query {
            builder = builder.query(query);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        self.interpret_response(response).await
    }

    fn transport_error(&self, err: reqwest::Error) -> DocflowError {
        if err.is_timeout() {
            warn!(error = %err, "ZeroDB request timeout");
            DocflowError::external_service(
                format!(
                    "Request to ZeroDB timed out after {}s",
                    self.timeout.as_secs()
                ),
                Some(SERVICE_NAME),
            )
        } else if err.is_connect() {
            warn!(error = %err, "ZeroDB connection error");
            DocflowError::external_service(
                format!("Failed to connect to ZeroDB API: {err}"),
                Some(SERVICE_NAME),
            )
        } else {
            warn!(error = %err, "ZeroDB HTTP error");
            DocflowError::external_service(
                format!("HTTP error occurred: {err}"),
                Some(SERVICE_NAME),
            )
        }
    }

    /// Interpret a ZeroDB response, mapping non-2xx statuses to taxonomy errors.
    async fn interpret_response(&self, response: reqwest::Response) -> Result<Value, DocflowError> {
        let status = response.status();
        // Retry-After must be read before the body consumes the response.
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        let data: Value = if bytes.is_empty() {
            json!({})
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| json!({ "raw": String::from_utf8_lossy(&bytes) }))
        };

        if status.is_success() {
            debug!(status = %status, "ZeroDB response");
            return Ok(data);
        }

        let error_message = data
            .get("error")
            .or_else(|| data.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        warn!(status = %status, error = %error_message, "ZeroDB error response");

        Err(match status.as_u16() {
            401 => DocflowError::authentication(format!(
                "ZeroDB authentication failed: {error_message}"
            )),
            403 => DocflowError::authorization(format!("ZeroDB access denied: {error_message}")),
            404 => DocflowError::not_found(format!("Resource not found: {error_message}")),
            409 => DocflowError::conflict(format!("Resource conflict: {error_message}")),
            422 => DocflowError::validation(
                format!("Validation failed: {error_message}"),
                validation_details(&data),
            ),
            429 => DocflowError::external_service(
                format!("ZeroDB rate limit exceeded. Retry after: {retry_after}"),
                Some(SERVICE_NAME),
            ),
            s if s >= 500 => DocflowError::external_service(
                format!("ZeroDB server error: {error_message}"),
                Some(SERVICE_NAME),
            ),
            s => DocflowError::database(format!("ZeroDB error ({s}): {error_message}"), None),
        })
    }

    // --- Health check ---

    /// Check whether ZeroDB is reachable.
    ///
    /// Never raises: any transport failure is reported as `false`.
    pub async fn health_check(&self) -> bool {
        let Ok(client) = self.handle().await else {
            return false;
        };
        match client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(_) => false,
        }
    }

    // --- Table operations ---

    /// Create a new table with the given schema definition.
    pub async fn table_create(&self, table_name: &str, schema: Value) -> Result<Value, DocflowError> {
        debug!(table = %table_name, "creating table");
        self.request(
            Method::POST,
            "/tables",
            Some(&json!({ "name": table_name, "schema": schema })),
            None,
        )
        .await
    }

    /// Insert rows into a table.
    ///
    /// A single row is sent bare; multiple rows are wrapped as
    /// `{"rows": [...]}` per the remote wire contract.
    pub async fn table_insert(
        &self,
        table_name: &str,
        mut rows: Vec<Value>,
    ) -> Result<Value, DocflowError> {
        debug!(table = %table_name, count = rows.len(), "inserting rows");
        let body = if rows.len() == 1 {
            rows.remove(0)
        } else {
            json!({ "rows": rows })
        };
        self.request(
            Method::POST,
            &format!("/tables/{table_name}/rows"),
            Some(&body),
            None,
        )
        .await
    }

    /// Query rows from a table with optional filters.
    ///
    /// Tolerates the remote service naming its payload field either `rows`
    /// or `data`.
    pub async fn table_query(
        &self,
        table_name: &str,
        filters: Option<Value>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Value>, DocflowError> {
        debug!(table = %table_name, limit, offset, "querying table");
        let params = vec![
            ("limit".to_string(), limit.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        let mut body = json!({});
        if let Some(filters) = filters {
            body = json!({ "filters": filters });
        }
        let response = self
            .request(
                Method::POST,
                &format!("/tables/{table_name}/query"),
                Some(&body),
                Some(params.as_slice()),
            )
            .await?;
        Ok(take_list(response, "rows", "data"))
    }

    /// Update rows in a table matching the filters.
    pub async fn table_update(
        &self,
        table_name: &str,
        filters: Value,
        update: Value,
    ) -> Result<Value, DocflowError> {
        debug!(table = %table_name, "updating rows");
        self.request(
            Method::PATCH,
            &format!("/tables/{table_name}/rows"),
            Some(&json!({ "filters": filters, "update": update })),
            None,
        )
        .await
    }

    /// Delete rows from a table matching the filters.
    pub async fn table_delete(
        &self,
        table_name: &str,
        filters: Value,
    ) -> Result<Value, DocflowError> {
        debug!(table = %table_name, "deleting rows");
        self.request(
            Method::DELETE,
            &format!("/tables/{table_name}/rows"),
            Some(&json!({ "filters": filters })),
            None,
        )
        .await
    }

    // --- Vector operations ---

    /// Upsert vectors into a namespace.
    pub async fn vector_upsert(
        &self,
        namespace: &str,
        vectors: Vec<Value>,
    ) -> Result<Value, DocflowError> {
        debug!(namespace = %namespace, count = vectors.len(), "upserting vectors");
        self.request(
            Method::POST,
            "/vectors/upsert",
            Some(&json!({ "vectors": vectors, "namespace": namespace })),
            None,
        )
        .await
    }

    /// Search a namespace for vectors similar to the query embedding.
    ///
    /// Results come back under either `matches` or `results`.
    pub async fn vector_search(
        &self,
        namespace: &str,
        query_vector: &[f64],
        limit: u32,
        threshold: f64,
    ) -> Result<Vec<Value>, DocflowError> {
        debug!(namespace = %namespace, limit, "searching vectors");
        let response = self
            .request(
                Method::POST,
                "/vectors/search",
                Some(&json!({
                    "vector": query_vector,
                    "namespace": namespace,
                    "top_k": limit,
                    "threshold": threshold,
                })),
                None,
            )
            .await?;
        Ok(take_list(response, "matches", "results"))
    }

    // --- Event operations ---

    /// Record an audit event on the data platform.
    pub async fn event_create(
        &self,
        event_type: &str,
        entity_type: &str,
        entity_id: &str,
        actor_id: &str,
        actor_type: &str,
        payload: Value,
    ) -> Result<Value, DocflowError> {
        debug!(event_type, entity_type, entity_id, "creating event");
        self.request(
            Method::POST,
            "/events",
            Some(&json!({
                "type": event_type,
                "entity_type": entity_type,
                "entity_id": entity_id,
                "actor_id": actor_id,
                "actor_type": actor_type,
                "data": payload,
            })),
            None,
        )
        .await
    }

    /// List audit events, optionally filtered. Filters become query params.
    pub async fn event_list(
        &self,
        filters: Option<&Map<String, Value>>,
        limit: u32,
    ) -> Result<Vec<Value>, DocflowError> {
        debug!(limit, "listing events");
        let mut params = vec![("limit".to_string(), limit.to_string())];
        if let Some(filters) = filters {
            for (key, value) in filters {
                params.push((key.clone(), query_value(value)));
            }
        }
        let response = self
            .request(Method::GET, "/events", None, Some(params.as_slice()))
            .await?;
        Ok(take_list(response, "events", "data"))
    }

    // --- File operations ---

    /// Request a pre-signed URL for uploading a file.
    ///
    /// An empty `folder` is sent as null.
    pub async fn file_upload_url(
        &self,
        file_name: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<Value, DocflowError> {
        debug!(file = %file_name, "requesting upload URL");
        self.request(
            Method::POST,
            "/files",
            Some(&json!({
                "filename": file_name,
                "content_type": content_type,
                "folder": (!folder.is_empty()).then_some(folder),
            })),
            None,
        )
        .await
    }

    /// Request a pre-signed URL for downloading a file.
    pub async fn file_download_url(
        &self,
        file_id: &str,
        expiration_secs: u64,
    ) -> Result<Value, DocflowError> {
        debug!(file_id = %file_id, "requesting download URL");
        self.request(
            Method::POST,
            &format!("/files/{file_id}/presigned-url"),
            Some(&json!({ "expires_in": expiration_secs, "operation": "download" })),
            None,
        )
        .await
    }

    // --- Memory operations ---

    /// Store a memory item (conversation or context).
    pub async fn memory_store(
        &self,
        content: &str,
        role: &str,
        session_id: Option<&str>,
        metadata: Option<Value>,
    ) -> Result<Value, DocflowError> {
        debug!(session_id = ?session_id, "storing memory");
        self.request(
            Method::POST,
            "/memory",
            Some(&json!({
                "content": content,
                "role": role,
                "session_id": session_id,
                "metadata": metadata.unwrap_or_else(|| json!({})),
            })),
            None,
        )
        .await
    }

    /// Search memories by semantic similarity.
    pub async fn memory_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Value>, DocflowError> {
        debug!(limit, "searching memories");
        let response = self
            .request(
                Method::POST,
                "/memory/search",
                Some(&json!({ "query": query, "limit": limit })),
                None,
            )
            .await?;
        Ok(take_list(response, "memories", "results"))
    }
}

/// Unwrap a list payload from whichever of two keys the service used.
///
/// A present-but-non-array value, or neither key present, yields an empty
/// list.
fn take_list(mut response: Value, primary: &str, fallback: &str) -> Vec<Value> {
    let slot = if response.get(primary).is_some() {
        response.get_mut(primary)
    } else {
        response.get_mut(fallback)
    };
    match slot.map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Render a JSON value as a query parameter string (strings unquoted).
fn query_value(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Extract structured validation details from a 422 response body.
fn validation_details(data: &Value) -> Option<Vec<ErrorDetail>> {
    let details = data.get("details")?;
    match details {
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| ErrorDetail {
                    field: item
                        .get("field")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    message: item
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("validation failed")
                        .to_string(),
                    code: item.get("code").and_then(Value::as_str).map(str::to_string),
                })
                .collect(),
        ),
        Value::Null => None,
        other => Some(vec![ErrorDetail::message(other.to_string())]),
    }
}
