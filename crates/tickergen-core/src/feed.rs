use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::FeedError;
use crate::http_client::{HttpClient, HttpRequest};

pub const DEFAULT_FEED_URL: &str = "https://randomcapital.hu/uploads/ik/basedata.json";

/// Where the raw instrument feed body comes from.
pub trait FeedSource: Send + Sync {
    fn fetch<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<String, FeedError>> + Send + 'a>>;

    /// Human-readable origin used in logs.
    fn describe(&self) -> String;
}

/// Feed fetched with a single HTTP GET; only status 200 is accepted.
pub struct HttpFeed {
    client: Arc<dyn HttpClient>,
    url: String,
    timeout_ms: u64,
}

impl HttpFeed {
    pub fn new(client: Arc<dyn HttpClient>, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl FeedSource for HttpFeed {
    fn fetch<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<String, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            let request = HttpRequest::get(&self.url)
                .with_header("accept", "application/json")
                .with_timeout_ms(self.timeout_ms);

            let response = self.client.execute(request).await?;
            if response.status != 200 {
                return Err(FeedError::UnexpectedStatus {
                    status: response.status,
                });
            }

            Ok(response.body)
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Feed read from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FeedSource for FileFeed {
    fn fetch<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<String, FeedError>> + Send + 'a>> {
        Box::pin(async move {
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|error| FeedError::File {
                    path: self.path.display().to_string(),
                    message: error.to_string(),
                })
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
