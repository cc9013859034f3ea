//! Where the user records come from.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::LoadError;
use crate::model::RawRecord;

/// An asynchronous supplier of the raw record payload.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch and decode the full record list.
    async fn load(&self) -> Result<Vec<RawRecord>, LoadError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Decode a JSON array of records.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawRecord>, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Records fetched with a single HTTP GET.
///
/// # Example
///
/// ```ignore
/// let source = HttpSource::new("https://example.com/users.json")?
///     .timeout(Duration::from_secs(10));
/// let records = source.load().await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl HttpSource {
    /// Create a source for `url`. Only `http` and `https` URLs are accepted.
    pub fn new(url: &str) -> Result<Self, LoadError> {
        let url = Url::parse(url).map_err(|e| LoadError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(LoadError::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                url,
                url.scheme()
            )));
        }
        Ok(Self {
            url,
            http_client: Client::new(),
            timeout: None,
        })
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn load(&self) -> Result<Vec<RawRecord>, LoadError> {
        let mut request = self.http_client.get(self.url.clone());
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(LoadError::http(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;
        parse_records(&bytes)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

/// Records read from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for FileSource {
    async fn load(&self) -> Result<Vec<RawRecord>, LoadError> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_records(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
