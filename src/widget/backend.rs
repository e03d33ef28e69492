// src/widget/backend.rs
use std::{future::Future, time::Duration};

use tracing::debug;

use crate::{
    error::BackendError,
    message::{ChatRequest, ChatResponse},
};

/// One request, one settled outcome. No streaming.
pub trait ChatBackend {
    fn post(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, BackendError>> + Send;
}

/// Posts JSON to the chat endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { client: builder.build()?, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChatBackend for HttpBackend {
    async fn post(&self, request: &ChatRequest) -> Result<ChatResponse, BackendError> {
        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status { status: status.as_u16() });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "chat backend responded");
        serde_json::from_slice(&body).map_err(|e| BackendError::Malformed(e.to_string()))
    }
}
