use super::types::{PredictRequest, PredictResponse};
use crate::{Result, config::ImagenConfig};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageClient: Send + Sync {
    /// Asks the upstream for one image. Any JSON body is returned as-is;
    /// deciding whether it holds an image is left to the caller.
    async fn predict(&self, prompt: &str) -> Result<PredictResponse>;
}

pub struct ImagenClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ImagenClient {
    pub fn new(config: ImagenConfig) -> Self {
        let endpoint = format!(
            "{}/v1beta/models/{}:predict",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        debug!("Creating Imagen client for: {}", endpoint);

        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: config.api_key,
        }
    }

    /// The predict URL without the key.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ImageClient for ImagenClient {
    async fn predict(&self, prompt: &str) -> Result<PredictResponse> {
        debug!("Sending predict request ({} prompt chars)", prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&PredictRequest::new(prompt))
            .send()
            .await?;

        // The status is informational only: error bodies are JSON too and
        // are classified by their content.
        let status = response.status();
        debug!("Imagen API responded with status {}", status);

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Imagen API returned a non-JSON body (status {}): {}", status, body);
            e
        })?;

        Ok(PredictResponse::from_value(value))
    }
}
