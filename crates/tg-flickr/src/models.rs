use serde::{Deserialize, Serialize};

use crate::error::FlickrError;

/// One photo record as returned by `flickr.photos.search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub owner: String,
    pub secret: String,
    pub server: String,
    pub farm: u32,
    pub title: String,
}

impl Photo {
    /// Static image URL built from the record's identifying fields.
    pub fn thumbnail_url(&self) -> String {
        format!(
            "https://farm{}.staticflickr.com/{}/{}_{}.jpg",
            self.farm, self.server, self.id, self.secret
        )
    }

    /// Photo page on flickr.com.
    pub fn page_url(&self) -> String {
        format!("https://www.flickr.com/photos/{}/{}", self.owner, self.id)
    }
}

/// The `photos` object of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub perpage: u32,
    pub photo: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    stat: String,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    photos: Option<PhotoPage>,
}

/// Validate a raw response body into a [`PhotoPage`].
///
/// Flickr reports API-level failures with HTTP 200 and `"stat": "fail"`, so
/// the envelope is checked before the `photos.photo` list is trusted.
pub fn parse_search_response(body: &str) -> Result<PhotoPage, FlickrError> {
    let envelope: Envelope = serde_json::from_str(body)?;

    match envelope.stat.as_str() {
        "ok" => envelope
            .photos
            .ok_or_else(|| FlickrError::Malformed("missing `photos` object".to_string())),
        "fail" => Err(FlickrError::Api {
            code: envelope.code.unwrap_or_default(),
            message: envelope
                .message
                .unwrap_or_else(|| "unknown error".to_string()),
        }),
        other => Err(FlickrError::Malformed(format!("unexpected stat `{other}`"))),
    }
}
