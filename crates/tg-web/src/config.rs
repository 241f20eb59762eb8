use std::{net::SocketAddr, time::Duration};

use serde::Deserialize;
use tg_flickr::{DEFAULT_ENDPOINT, DEFAULT_PER_PAGE, FlickrConfig};
use thiserror::Error;
use url::Url;

/// Flickr caps `per_page` at 500.
const MAX_PER_PAGE: u32 = 500;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),
    #[error("FLICKR_API_KEY must not be empty")]
    MissingApiKey,
    #[error("invalid FLICKR_ENDPOINT: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("FLICKR_PER_PAGE must be between 1 and {MAX_PER_PAGE}, got {0}")]
    PerPage(u32),
    #[error("invalid BIND_ADDR `{0}`")]
    BindAddr(String),
}

/// Raw environment variables, one field per variable.
#[derive(Deserialize)]
struct EnvVars {
    flickr_api_key: String,
    #[serde(default = "default_endpoint")]
    flickr_endpoint: String,
    #[serde(default = "default_per_page")]
    flickr_per_page: u32,
    #[serde(default = "default_timeout_secs")]
    flickr_timeout_secs: u64,
    #[serde(default = "default_bind_addr")]
    bind_addr: String,
    #[serde(default)]
    environment: Environment,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

const fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

const fn default_timeout_secs() -> u64 {
    20
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

#[derive(Clone, Debug)]
pub struct GalleryConfig {
    pub flickr: FlickrConfig,
    pub bind_addr: SocketAddr,
    pub env: Environment,
}

impl GalleryConfig {
    /// Read the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Build the configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: EnvVars = envy::from_iter(vars)?;

        let api_key = vars.flickr_api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        if vars.flickr_per_page == 0 || vars.flickr_per_page > MAX_PER_PAGE {
            return Err(ConfigError::PerPage(vars.flickr_per_page));
        }

        let bind_addr = vars
            .bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(vars.bind_addr.clone()))?;

        let timeout =
            (vars.flickr_timeout_secs > 0).then(|| Duration::from_secs(vars.flickr_timeout_secs));

        Ok(Self {
            flickr: FlickrConfig {
                api_key,
                endpoint: Url::parse(&vars.flickr_endpoint)?,
                per_page: vars.flickr_per_page,
                timeout,
            },
            bind_addr,
            env: vars.environment,
        })
    }
}
