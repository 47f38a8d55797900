use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;

/// Scores how close a submission is to the reference answer, in `[0, 1]`.
#[async_trait]
pub trait SimilarityOracle: Send + Sync {
    /// # Errors
    ///
    /// Returns `OracleError` when the oracle is unavailable or the request
    /// fails; the caller treats this as a retryable evaluation failure.
    async fn similarity(&self, submission: &str, reference: &str) -> Result<f64, OracleError>;
}

#[derive(Clone, Debug)]
pub struct OracleConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl OracleConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("QUIZ_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("QUIZ_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model =
            env::var("QUIZ_AI_MODEL").unwrap_or_else(|_| "text-embedding-3-small".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Oracle backed by an embeddings endpoint: both texts are embedded in one
/// request and scored by cosine similarity.
#[derive(Clone)]
pub struct EmbeddingSimilarityClient {
    client: Client,
    config: Option<OracleConfig>,
}

impl EmbeddingSimilarityClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(OracleConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<OracleConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl SimilarityOracle for EmbeddingSimilarityClient {
    async fn similarity(&self, submission: &str, reference: &str) -> Result<f64, OracleError> {
        let config = self.config.as_ref().ok_or(OracleError::Disabled)?;

        let url = format!("{}/embeddings", config.base_url.trim_end_matches('/'));
        let payload = EmbeddingRequest {
            model: config.model.clone(),
            input: vec![submission.to_string(), reference.to_string()],
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OracleError::HttpStatus(response.status()));
        }

        let body: EmbeddingResponse = response.json().await?;
        let mut vectors = body.data.into_iter();
        let (Some(first), Some(second)) = (vectors.next(), vectors.next()) else {
            return Err(OracleError::EmptyResponse);
        };

        Ok(cosine_similarity(&first.embedding, &second.embedding))
    }
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f64>,
}
