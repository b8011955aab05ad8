//! OpenAI-compatible embeddings over HTTP.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::config::EmbeddingConfig;
use crate::core::embed::Embedder;
use crate::core::error::{CopaceticError, Result};

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Client for a `/embeddings` endpoint
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
    dimension: usize,
}

impl OpenAiEmbedder {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            dimension,
        })
    }

    /// Build from config, reading the key from `OPENAI_API_KEY` if unset
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                CopaceticError::ConfigError(
                    "The openai embedding provider needs an API key \
                     (embedding.api_key or OPENAI_API_KEY)"
                        .to_string(),
                )
            })?;

        Self::new(
            config.api_base.clone(),
            api_key,
            config.model.clone(),
            config.dimension,
            Duration::from_secs(config.request_timeout_sec),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.api_base)
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CopaceticError::EmbeddingFailed(format!(
                "{} returned {}: {}",
                self.endpoint(),
                status,
                body
            )));
        }

        let parsed: EmbeddingResponse = response.json().await?;
        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                CopaceticError::EmbeddingFailed("response contained no embeddings".to_string())
            })?;

        if embedding.len() != self.dimension {
            return Err(CopaceticError::EmbeddingFailed(format!(
                "expected {} dimensions from {}, got {}",
                self.dimension,
                self.model,
                embedding.len()
            )));
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
