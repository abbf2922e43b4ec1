use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::types::{GenerationRequest, GenerationResponse, MessageEnvelope};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("description request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("collaborator returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// The external AI collaborator. Implementations receive the generation
/// request and answer with a drafted description, or nothing.
#[async_trait]
pub trait DescriptionBackend: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, BackendError>;
}

/// Backend that POSTs the message envelope to a configured HTTP endpoint.
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(endpoint: String, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            token,
        }
    }
}

#[async_trait]
impl DescriptionBackend for HttpBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, BackendError> {
        debug!(endpoint = %self.endpoint, "requesting generated description");

        let mut builder = self
            .client
            .post(&self.endpoint)
            .json(&MessageEnvelope::generate(request));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let body = builder
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(bytes = body.len(), "received collaborator response");

        serde_json::from_str(&body).map_err(|err| BackendError::InvalidResponse(err.to_string()))
    }
}
