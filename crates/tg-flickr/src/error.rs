use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlickrError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status: {0}")]
    Status(StatusCode),
    #[error("Flickr API error {code}: {message}")]
    Api { code: i64, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FlickrError {
    /// Short label used for logs and metric tags.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Api { .. } => "api",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl From<serde_json::Error> for FlickrError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
