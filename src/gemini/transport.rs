use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{Result, StudioError};

/// Raw status and body of one upstream exchange. The retry policy in the
/// image client is driven entirely by this pair.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

/// Seam between the call primitive and the network. Production uses
/// [`HttpTransport`]; tests substitute scripted implementations.
#[async_trait]
pub trait GenerateTransport: Send + Sync {
    async fn send(&self, payload: &Value) -> Result<TransportReply>;
}

/// POSTs the request envelope to the `generateContent` endpoint with the
/// credential as a query parameter.
pub struct HttpTransport {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl GenerateTransport for HttpTransport {
    async fn send(&self, payload: &Value) -> Result<TransportReply> {
        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("Gemini request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| StudioError::ResponseError(format!("Failed to read body: {}", e)))?;

        Ok(TransportReply { status, body })
    }
}
