use async_trait::async_trait;

use crate::{error::FlickrError, models::Photo};

/// Anything that can answer a free-text photo search.
///
/// The gallery controller only sees this trait, so tests can script results
/// without a network.
#[async_trait]
pub trait PhotoSearch: Send + Sync {
    async fn search(&self, text: &str) -> Result<Vec<Photo>, FlickrError>;
}
