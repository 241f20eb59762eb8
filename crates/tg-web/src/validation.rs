use serde::Deserialize;
use validator::Validate;

use crate::{error::WebError, normalization::normalize_topic};

/// Query string of the header search form (`GET /search?topic=...`).
#[derive(Debug, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Search topic cannot be empty"))]
    pub topic: String,
}

impl SearchForm {
    /// Normalize then validate, yielding the topic to search for.
    pub fn into_topic(self) -> Result<String, WebError> {
        let form = Self {
            topic: normalize_topic(&self.topic),
        };
        form.validate()
            .map_err(|e| WebError::Validation(e.to_string()))?;
        Ok(form.topic)
    }
}

/// Validate a search topic taken from a route path.
///
/// # Examples
/// ```
/// use tg_web::validation::validate_topic;
///
/// assert_eq!(validate_topic(" rome ").unwrap(), "rome");
/// assert!(validate_topic("   ").is_err());
/// ```
pub fn validate_topic(topic: &str) -> Result<String, WebError> {
    SearchForm {
        topic: topic.to_string(),
    }
    .into_topic()
}
