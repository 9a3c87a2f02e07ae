//! `reqwest` implementation of the `StoryGenerator` trait.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use storyweave_core::generation::{
    GenerationError, GenerationReply, GenerationRequest, StoryGenerator,
};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::wire::{StoryRequestBody, StoryResponseBody};

const START_PATH: &str = "/story/start";
const CONTINUE_PATH: &str = "/story/continue";

/// The HTTP client could not be constructed.
#[derive(Debug, Error)]
#[error("failed to build generation HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

/// Generation backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStoryGenerator {
    client: Client,
    base_url: String,
}

impl HttpStoryGenerator {
    /// Creates a client for the backend at `base_url`.
    ///
    /// Only the connection phase is bounded by `connect_timeout`; once
    /// connected, a request waits for the backend however long it takes.
    ///
    /// # Errors
    ///
    /// Returns `ClientBuildError` if the TLS backend cannot be initialised.
    pub fn new(
        base_url: impl Into<String>,
        connect_timeout: Option<Duration>,
    ) -> Result<Self, ClientBuildError> {
        let mut builder = Client::builder();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// The backend base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, request), fields(base_url = %self.base_url))]
    async fn post(
        &self,
        path: &'static str,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(&StoryRequestBody::from(request))
            .send()
            .await
            .map_err(|e| GenerationError::NetworkOrServer(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::NetworkOrServer(format!(
                "backend returned {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::NetworkOrServer(e.to_string()))?;
        let parsed: StoryResponseBody = serde_json::from_str(&body)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        debug!(
            story_len = parsed.story_so_far.len(),
            part_len = parsed.ai_part.len(),
            "generation reply received"
        );
        Ok(parsed.into())
    }
}

#[async_trait]
impl StoryGenerator for HttpStoryGenerator {
    async fn start_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        self.post(START_PATH, request).await
    }

    async fn continue_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationReply, GenerationError> {
        self.post(CONTINUE_PATH, request).await
    }
}
