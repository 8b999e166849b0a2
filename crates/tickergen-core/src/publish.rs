use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::PublishError;
use crate::http_client::{HttpClient, HttpRequest};
use crate::render::CONTENT_TYPE_HTML;

pub const DEFAULT_OBJECT_KEY: &str = "tickers.html";

/// Rendered object ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub key: String,
    pub body: String,
    pub content_type: String,
}

impl Document {
    pub fn html(key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
            content_type: String::from(CONTENT_TYPE_HTML),
        }
    }
}

/// Where a published document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub location: String,
    pub bytes: usize,
}

/// Destination for the rendered page.
pub trait Publisher: Send + Sync {
    fn publish<'a>(
        &'a self,
        document: &'a Document,
    ) -> Pin<Box<dyn Future<Output = Result<PublishReceipt, PublishError>> + Send + 'a>>;

    fn describe(&self) -> String;
}

/// Uploads with `PUT <base_url>/<key>` to a publicly writable bucket endpoint.
pub struct HttpPublisher {
    client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl HttpPublisher {
    pub fn new(client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

impl Publisher for HttpPublisher {
    fn publish<'a>(
        &'a self,
        document: &'a Document,
    ) -> Pin<Box<dyn Future<Output = Result<PublishReceipt, PublishError>> + Send + 'a>> {
        Box::pin(async move {
            let location = self.object_url(&document.key);
            let request = HttpRequest::put(&location)
                .with_header("content-type", &document.content_type)
                .with_body(document.body.clone())
                .with_timeout_ms(self.timeout_ms);

            let response =
                self.client
                    .execute(request)
                    .await
                    .map_err(|source| PublishError::Transport {
                        key: document.key.clone(),
                        source,
                    })?;

            if !response.is_success() {
                return Err(PublishError::Rejected {
                    key: document.key.clone(),
                    status: response.status,
                });
            }

            Ok(PublishReceipt {
                location,
                bytes: document.body.len(),
            })
        })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Writes documents below a local directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectoryPublisher {
    root: PathBuf,
}

impl DirectoryPublisher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Publisher for DirectoryPublisher {
    fn publish<'a>(
        &'a self,
        document: &'a Document,
    ) -> Pin<Box<dyn Future<Output = Result<PublishReceipt, PublishError>> + Send + 'a>> {
        Box::pin(async move {
            let path = self.root.join(&document.key);
            let io_error = |error: std::io::Error| PublishError::Io {
                path: path.display().to_string(),
                message: error.to_string(),
            };

            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
            }
            tokio::fs::write(&path, document.body.as_bytes())
                .await
                .map_err(io_error)?;

            Ok(PublishReceipt {
                location: path.display().to_string(),
                bytes: document.body.len(),
            })
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpMethod, HttpResponse, ScriptedHttpClient};

    #[tokio::test]
    async fn http_publisher_puts_with_content_type() {
        let client = Arc::new(ScriptedHttpClient::new().with_response(HttpResponse::ok("")));
        let publisher = HttpPublisher::new(client.clone(), "https://bucket.test/site/");
        let document = Document::html(DEFAULT_OBJECT_KEY, "<html></html>");

        let receipt = publisher.publish(&document).await.expect("published");
        assert_eq!(receipt.location, "https://bucket.test/site/tickers.html");
        assert_eq!(receipt.bytes, 13);

        let requests = client.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(
            requests[0].headers.get("content-type").map(String::as_str),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(requests[0].body.as_deref(), Some("<html></html>"));
    }

    #[tokio::test]
    async fn http_publisher_reports_rejection() {
        let client = Arc::new(ScriptedHttpClient::new().with_response(HttpResponse::new(403, "denied")));
        let publisher = HttpPublisher::new(client, "https://bucket.test");

        let err = publisher
            .publish(&Document::html("tickers.html", "x"))
            .await
            .expect_err("403 must fail");
        assert_eq!(
            err,
            PublishError::Rejected {
                key: String::from("tickers.html"),
                status: 403
            }
        );
    }
}
