pub mod image_client;
pub mod transport;
pub mod variations;

use std::sync::Arc;

use crate::{
    config::GeminiConfig,
    error::{Result, StudioError},
};

pub use image_client::ImageClient;
pub use transport::{GenerateTransport, HttpTransport, TransportReply};
pub use variations::VariationPlanner;

/// Entry point to the Gemini image model. Holds the immutable credential
/// for the process lifetime; construction fails without one.
#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| StudioError::ConfigError("GEMINI_API_KEY is required".into()))?;

        let transport = Arc::new(HttpTransport::new(config.api_url, api_key));

        Ok(Self {
            image_client: ImageClient::new(transport, config.max_retries, config.backoff_base),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
