//! HTTP answer fetcher

use super::{AnswerFetcher, FetchError};
use crate::config::ChatConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct AnswerRequest<'a> {
    query: &'a str,
}

/// Body of the service's `/health` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
}

impl ServiceHealth {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

/// Fetcher backed by the remote question-answering service
pub struct HttpFetcher {
    client: Client,
    answer_url: String,
    health_url: String,
}

impl HttpFetcher {
    pub fn new(config: &ChatConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            answer_url: config.answer_url(),
            health_url: config.health_url(),
        })
    }

    pub fn answer_url(&self) -> &str {
        &self.answer_url
    }

    /// Probe the service's liveness endpoint. Not used by the session itself.
    pub async fn health(&self) -> Result<ServiceHealth, FetchError> {
        let response = self.client.get(&self.health_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AnswerFetcher for HttpFetcher {
    async fn fetch_answer(&self, query: &str) -> Result<String, FetchError> {
        tracing::debug!(url = %self.answer_url, "Posting query to answer service");

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(&self.answer_url)
            .json(&AnswerRequest { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http(status.as_u16()));
        }

        // Free-text responder: the body is the answer, unparsed
        Ok(response.text().await?)
    }
}
