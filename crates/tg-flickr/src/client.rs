use std::{fmt, time::Duration};

use async_trait::async_trait;
use url::Url;

use crate::{
    error::FlickrError,
    models::{Photo, parse_search_response},
    source::PhotoSearch,
};

/// Public REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.flickr.com/services/rest/";

/// Results requested per search.
pub const DEFAULT_PER_PAGE: u32 = 24;

#[derive(Clone)]
pub struct FlickrConfig {
    pub api_key: String,
    pub endpoint: Url,
    pub per_page: u32,
    /// `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

// Keeps the credential out of logs.
impl fmt::Debug for FlickrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlickrConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .field("per_page", &self.per_page)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Thin wrapper over a `reqwest::Client` issuing `flickr.photos.search`.
#[derive(Clone, Debug)]
pub struct FlickrClient {
    http: reqwest::Client,
    config: FlickrConfig,
}

impl FlickrClient {
    pub fn new(config: FlickrConfig) -> Result<Self, FlickrError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("travel-gallery/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &FlickrConfig {
        &self.config
    }

    /// Full request URL for a text search, query string included.
    pub fn search_url(&self, text: &str) -> Url {
        let per_page = self.config.per_page.to_string();
        let mut url = self.config.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("method", "flickr.photos.search")
            .append_pair("api_key", &self.config.api_key)
            .append_pair("text", text)
            .append_pair("sort", "interestingness-desc")
            .append_pair("safe_search", "1")
            .append_pair("content_type", "1")
            .append_pair("per_page", &per_page)
            .append_pair("format", "json")
            .append_pair("nojsoncallback", "1");
        url
    }

    /// Run one search and return the photos in response order.
    pub async fn search(&self, text: &str) -> Result<Vec<Photo>, FlickrError> {
        tracing::debug!(text, "Requesting photos.search");

        let response = self
            .http
            .get(self.search_url(text))
            .send()
            .await
            .map_err(redact)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FlickrError::Status(status));
        }

        let body = response.text().await.map_err(redact)?;
        let page = parse_search_response(&body)?;

        tracing::debug!(text, count = page.photo.len(), "photos.search returned");
        Ok(page.photo)
    }
}

/// Request URLs carry the API key; strip them before the error is logged.
fn redact(err: reqwest::Error) -> FlickrError {
    FlickrError::Transport(err.without_url())
}

#[async_trait]
impl PhotoSearch for FlickrClient {
    async fn search(&self, text: &str) -> Result<Vec<Photo>, FlickrError> {
        FlickrClient::search(self, text).await
    }
}
