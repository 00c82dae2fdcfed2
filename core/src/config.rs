//! Client configuration.
//!
//! The API base URL is an explicit value handed to the client. Only binary
//! entry points consult the environment, once, through
//! [`ClientConfig::from_env`].

use url::Url;

/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/todos";

/// Environment variable holding the base URL override.
pub const BASE_URL_ENV: &str = "TASKBOARD_API_URL";

/// Errors that can occur when resolving the client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL `{value}`: {source}")]
    InvalidUrl {
        value: String,
        source: url::ParseError,
    },

    #[error("API base URL `{0}` must use http or https")]
    UnsupportedScheme(String),
}

/// Where the task collection lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
}

impl ClientConfig {
    /// Parse and validate `base_url`. A trailing slash is dropped so item
    /// URLs come out as `<base>/<id>`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(base_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            value: base_url.to_string(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.to_string()));
        }
        let trimmed = url.path().trim_end_matches('/').to_string();
        if !trimmed.is_empty() {
            url.set_path(&trimmed);
        }
        Ok(Self { base_url: url })
    }

    /// Resolve from an optional override, falling back to
    /// [`DEFAULT_BASE_URL`] when it is absent or blank.
    pub fn resolve(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Self::new(v),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }

    /// Read [`BASE_URL_ENV`] from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = std::env::var(BASE_URL_ENV).ok();
        Self::resolve(value.as_deref())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `host:port` of the server, used in connection failure messages.
    pub fn endpoint(&self) -> String {
        let host = self.base_url.host_str().unwrap_or("unknown-host");
        match self.base_url.port_or_known_default() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    pub(crate) fn collection_url(&self) -> String {
        self.base_url.as_str().to_string()
    }

    /// URL of a single task; `id` is percent-encoded as one path segment.
    pub(crate) fn item_url(&self, id: &str) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url.into()
    }
}
