//! Answer service client
//!
//! One request per query against the remote question-answering endpoint.
//! Failures come back classified; nothing is retried here.

mod error;
mod http;

pub use error::{FetchError, FetchErrorKind};
pub use http::{HttpFetcher, ServiceHealth};

use async_trait::async_trait;
use std::sync::Arc;

/// Transport seam between the session runtime and the answer service
#[async_trait]
pub trait AnswerFetcher: Send + Sync {
    /// Ask one question and return the service's answer text verbatim
    async fn fetch_answer(&self, query: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: AnswerFetcher + ?Sized> AnswerFetcher for Arc<T> {
    async fn fetch_answer(&self, query: &str) -> Result<String, FetchError> {
        (**self).fetch_answer(query).await
    }
}

/// Logging wrapper for answer fetchers
pub struct LoggingFetcher<F> {
    inner: F,
}

impl<F: AnswerFetcher> LoggingFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<F: AnswerFetcher> AnswerFetcher for LoggingFetcher<F> {
    async fn fetch_answer(&self, query: &str) -> Result<String, FetchError> {
        let start = std::time::Instant::now();
        let result = self.inner.fetch_answer(query).await;
        let duration = start.elapsed();

        match &result {
            Ok(answer) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    query_len = query.len(),
                    answer_len = answer.len(),
                    "Answer request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = %duration.as_millis(),
                    error = %e,
                    kind = ?e.kind(),
                    "Answer request failed"
                );
            }
        }

        result
    }
}
