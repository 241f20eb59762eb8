//! Flickr photo-search client for the travel gallery.
//!
//! This crate owns everything that talks to the remote API: building the
//! `flickr.photos.search` request, validating the JSON envelope into typed
//! [`Photo`] records, and the [`PhotoSearch`] seam the web controller uses.

pub mod client;
pub mod error;
pub mod models;
pub mod source;

pub use client::{DEFAULT_ENDPOINT, DEFAULT_PER_PAGE, FlickrClient, FlickrConfig};
pub use error::FlickrError;
pub use models::{Photo, PhotoPage, parse_search_response};
pub use source::PhotoSearch;
