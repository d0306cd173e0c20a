use async_trait::async_trait;
use thiserror::Error;

/// A GET of one catalog link, identified with the configured User-Agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub url: String,
    pub user_agent: String,
}

impl LinkRequest {
    pub fn new(url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: user_agent.into(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpError {
    /// The request never produced a response (DNS, connect, TLS, reset, timeout).
    #[error("no response: {0}")]
    Transport(String),

    #[error("no mock response registered for {url}")]
    NoMockResponse { url: String },
}

/// Transport boundary for the link check: only the final status matters.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_status(&self, request: LinkRequest) -> Result<u16, HttpError>;
}

#[cfg(feature = "links")]
pub mod reqwest_transport {
    use std::time::Duration;

    use reqwest::header::USER_AGENT;

    use super::*;

    /// Transport backed by reqwest. Redirects are followed, so the status is
    /// the one of the final location. Response bodies are never read.
    #[derive(Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| HttpError::Transport(e.to_string()))?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl HttpTransport for ReqwestTransport {
        async fn get_status(&self, request: LinkRequest) -> Result<u16, HttpError> {
            let resp = self
                .client
                .get(&request.url)
                .header(USER_AGENT, request.user_agent)
                .send()
                .await
                .map_err(|e| HttpError::Transport(e.to_string()))?;

            Ok(resp.status().as_u16())
        }
    }
}

#[cfg(test)]
use std::collections::{HashMap, VecDeque};
#[cfg(test)]
use std::sync::{Arc, Mutex};

/// In-memory transport replaying registered outcomes per URL.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[cfg(test)]
#[derive(Default)]
struct MockTransportInner {
    routes: HashMap<String, VecDeque<Result<u16, HttpError>>>,
    requests: Vec<LinkRequest>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a status for a URL; repeated registrations replay in order.
    pub fn push_status(&self, url: impl Into<String>, status: u16) {
        self.push(url, Ok(status));
    }

    pub fn push_failure(&self, url: impl Into<String>, message: &str) {
        self.push(url, Err(HttpError::Transport(message.to_string())));
    }

    fn push(&self, url: impl Into<String>, outcome: Result<u16, HttpError>) {
        let mut inner = self.inner.lock().expect("mock lock poisoned");
        inner.routes.entry(url.into()).or_default().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<LinkRequest> {
        self.inner.lock().expect("mock lock poisoned").requests.clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|r| r.url == url).count()
    }
}

#[cfg(test)]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn get_status(&self, request: LinkRequest) -> Result<u16, HttpError> {
        let mut inner = self.inner.lock().expect("mock lock poisoned");
        let url = request.url.clone();
        inner.requests.push(request);

        inner
            .routes
            .get_mut(&url)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Err(HttpError::NoMockResponse { url }))
    }
}
