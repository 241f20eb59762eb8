use std::sync::Arc;

use axum::extract::FromRef;
use tg_flickr::{FlickrClient, PhotoSearch};

use crate::{
    config::{Environment, GalleryConfig},
    gallery::Gallery,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub gallery: Gallery,
    pub environment: Environment,
}

impl AppState {
    /// Build the state around a real Flickr client.
    pub fn new(config: &GalleryConfig) -> anyhow::Result<Self> {
        let client = FlickrClient::new(config.flickr.clone())?;
        tracing::debug!(endpoint = %config.flickr.endpoint, "Flickr client ready");

        Ok(Self::with_source(Arc::new(client), config.env))
    }

    /// Build the state around any photo source.
    pub fn with_source(source: Arc<dyn PhotoSearch>, environment: Environment) -> Self {
        Self {
            gallery: Gallery::new(source),
            environment,
        }
    }
}

impl FromRef<AppState> for Gallery {
    fn from_ref(state: &AppState) -> Self {
        state.gallery.clone()
    }
}
