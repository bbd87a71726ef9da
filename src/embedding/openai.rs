//! OpenAI API-based embedder.
//!
//! Talks to the OpenAI Embeddings API (or any endpoint speaking the same
//! protocol) over HTTPS. One request per `embed` call; batching is left to
//! callers that need it.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::embedding::embedder::Embedder;
use crate::error::{KontosError, Result};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

/// Request structure for the OpenAI Embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    /// Model identifier to use for embeddings.
    model: String,
    /// Input text to embed.
    input: String,
}

/// Response structure from the OpenAI Embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    /// List of embedding data objects.
    data: Vec<EmbeddingData>,
}

/// Individual embedding data from the API response.
#[derive(Debug, Deserialize)]
struct EmbeddingData {
    /// The embedding vector.
    embedding: Vec<f32>,
}

/// An embedder backed by the OpenAI Embeddings API.
///
/// # Examples
///
/// ```no_run
/// use kontos::embedding::{Embedder, OpenAiEmbedder};
///
/// # async fn example() -> kontos::error::Result<()> {
/// let embedder = OpenAiEmbedder::new(
///     std::env::var("OPENAI_API_KEY").unwrap_or_default(),
///     "text-embedding-3-small",
/// );
/// let vector = embedder.embed("Rust is awesome!").await?;
/// # Ok(())
/// # }
/// ```
pub struct OpenAiEmbedder {
    /// HTTP client for API requests.
    client: Client,
    /// API key for bearer authentication.
    api_key: String,
    /// Model name (e.g. "text-embedding-3-small").
    model: String,
    /// Embeddings endpoint URL.
    endpoint: String,
}

impl std::fmt::Debug for OpenAiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbedder")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl OpenAiEmbedder {
    /// Create a new embedder for the given API key and model.
    pub fn new<S: Into<String>, M: Into<String>>(api_key: S, model: M) -> Self {
        OpenAiEmbedder {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the embedder at a different endpoint speaking the same
    /// protocol (a proxy or a local server).
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The model this embedder requests.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: self.model.clone(),
            input: text.to_string(),
        };

        let http_response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| KontosError::provider(format!("embedding request failed: {e}")))?;

        let status = http_response.status();
        let body = http_response
            .text()
            .await
            .map_err(|e| KontosError::provider(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(KontosError::provider(format!(
                "embedding API error (status {status}): {body}"
            )));
        }

        let response: EmbeddingResponse = serde_json::from_str(&body).map_err(|e| {
            KontosError::provider(format!("failed to parse embedding response: {e}"))
        })?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| KontosError::provider("no embedding in response"))?
            .embedding;

        Ok(embedding)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
