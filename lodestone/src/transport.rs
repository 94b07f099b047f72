//! The transport collaborator.
//!
//! A transport owns everything below the GraphQL envelope: HTTP method,
//! headers, endpoint, pooling, timeouts and retries. The runtime hands it
//! the bound document text plus serialized variables and gets back either a
//! raw JSON payload or a [`TransportError`].

use crate::error::TransportError;
use serde_json::Value;

/// One request/response exchange. Implementations must be usable from
/// concurrent calls without external locking.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn call(
        &self,
        query: &'static str,
        operation_name: &'static str,
        variables: Value
    ) -> Result<Value, TransportError>;
}

/// The default GraphQL-over-HTTP transport, built on `reqwest`.
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    extra_headers: Vec<crate::types::HeaderPair>
}

#[cfg(feature = "http")]
impl HttpTransport {
    pub fn new<U: Into<String>>(url: U) -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
            url: url.into(),
            extra_headers: Vec::new()
        }
    }

    pub fn with_header(mut self, header: crate::types::HeaderPair) -> Self {
        self.extra_headers.push(header);
        self
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn call(
        &self,
        query: &'static str,
        operation_name: &'static str,
        variables: Value
    ) -> Result<Value, TransportError> {
        let body = serde_json::json!({
            "query": query,
            "operationName": operation_name,
            "variables": variables
        });

        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&body);

        for crate::types::HeaderPair(key, value) in &self.extra_headers {
            request = request.header(*key, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(Box::new(e)))?;

        serde_json::from_slice(&bytes).map_err(TransportError::InvalidPayload)
    }
}
