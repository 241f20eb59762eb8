pub mod config;
pub mod error;
pub mod gallery;
pub mod metrics;
pub mod middleware;
pub mod normalization;
pub mod router;
pub mod routes;
pub mod state;
pub mod topic;
pub mod tracing;
pub mod validation;
pub mod views;

pub use config::{ConfigError, Environment, GalleryConfig};
pub use gallery::{Completion, Gallery, Slot, SlotStatus};
pub use state::AppState;
pub use topic::Topic;
