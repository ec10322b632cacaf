// src/fetch/mod.rs

pub mod charset;
pub mod urls;

use reqwest::Client;
use std::future::Future;
use tracing::{debug, trace};
use url::Url;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};

/// The outbound side of every scrape: one plain GET, body back.
///
/// No retries, no custom headers. Failures surface as
/// [`ScrapeError::Transport`].
pub trait HttpFetch {
    fn get_text(&self, url: &Url) -> impl Future<Output = Result<String>> + Send;

    fn get_bytes(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// [`HttpFetch`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client honouring the configured timeout, if any.
    pub fn from_config(cfg: &ScraperConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = cfg.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ScrapeError::transport(cfg.base_url.as_str(), e))?;
        Ok(Self { client })
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response> {
        debug!(%url, "GET");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ScrapeError::transport(url, e))?
            .error_for_status()
            .map_err(|e| ScrapeError::transport(url, e))?;
        trace!(%url, status = %resp.status(), "response");
        Ok(resp)
    }
}

impl Default for ReqwestFetcher {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl HttpFetch for ReqwestFetcher {
    async fn get_text(&self, url: &Url) -> Result<String> {
        self.send(url)
            .await?
            .text()
            .await
            .map_err(|e| ScrapeError::transport(url, e))
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        let bytes = self
            .send(url)
            .await?
            .bytes()
            .await
            .map_err(|e| ScrapeError::transport(url, e))?;
        Ok(bytes.to_vec())
    }
}

/// Canned-response fetcher for unit tests.
#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub(crate) enum Reply {
        Body(String),
        Bytes(Vec<u8>),
        Fail(&'static str),
    }

    /// Replies in order; records every requested URL.
    #[derive(Default)]
    pub(crate) struct ScriptedFetcher {
        replies: Mutex<VecDeque<Reply>>,
        pub(crate) requested: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn bodies<S: Into<String>>(bodies: impl IntoIterator<Item = S>) -> Self {
            Self::new(bodies.into_iter().map(|b| Reply::Body(b.into())))
        }

        pub(crate) fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }

        fn next(&self, url: &Url) -> Result<Vec<u8>> {
            self.requested.lock().unwrap().push(url.to_string());
            match self.replies.lock().unwrap().pop_front() {
                Some(Reply::Body(b)) => Ok(b.into_bytes()),
                Some(Reply::Bytes(b)) => Ok(b),
                Some(Reply::Fail(msg)) => Err(ScrapeError::transport(url, msg)),
                None => Err(ScrapeError::transport(url, "no scripted reply left")),
            }
        }
    }

    impl HttpFetch for ScriptedFetcher {
        async fn get_text(&self, url: &Url) -> Result<String> {
            self.next(url)
                .map(|b| String::from_utf8_lossy(&b).into_owned())
        }

        async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
            self.next(url)
        }
    }
}
