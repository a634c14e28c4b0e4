//! Explorer configuration.
//!
//! The configuration names the GraphQL endpoint, the DOM container the
//! widget mounts into, and how the fetcher treats credentials. It can be
//! built in code or loaded from TOML or JSON:
//!
//! ```toml
//! title = "My API"
//! container_id = "graphiql"
//! credentials = "include"
//!
//! [endpoint]
//! origin = "https://api.example.com"
//! path = "/graphql"
//! ```

use std::path::Path;
use std::time::Duration;

use graphiql_explorer_net::graphql::GraphQLFetcher;
use graphiql_explorer_net::http::HttpClientBuilder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, Result};

const TARGET: &str = "graphiql_explorer::config";

fn default_path() -> String {
    "/graphql".to_string()
}

fn default_container_id() -> String {
    "graphiql".to_string()
}

fn default_title() -> String {
    "GraphiQL".to_string()
}

/// Whether cookies accompany a fetch, mirroring the browser's `credentials`
/// option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialsMode {
    /// Always send cookies.
    #[default]
    Include,
    /// Send cookies only when the endpoint shares the page's origin.
    SameOrigin,
    /// Never send cookies.
    Omit,
}

impl CredentialsMode {
    /// The value of the browser `credentials` option.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::SameOrigin => "same-origin",
            Self::Omit => "omit",
        }
    }

    /// Whether cookies are sent to `endpoint` from a page served at `page`.
    pub fn sends_cookies(self, page: &Url, endpoint: &Url) -> bool {
        match self {
            Self::Include => true,
            Self::SameOrigin => page.origin() == endpoint.origin(),
            Self::Omit => false,
        }
    }
}

/// Where queries are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Origin the explorer page is served from, e.g. `https://api.example.com`.
    pub origin: String,
    /// Endpoint path, resolved against the origin.
    #[serde(default = "default_path")]
    pub path: String,
}

impl EndpointConfig {
    /// Create an endpoint at the default `/graphql` path.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            path: default_path(),
        }
    }

    /// The endpoint URL.
    pub fn url(&self) -> std::result::Result<Url, ConfigError> {
        let origin = Url::parse(&self.origin)
            .map_err(|e| ConfigError::invalid_value("endpoint.origin", e.to_string()))?;
        origin
            .join(&self.path)
            .map_err(|e| ConfigError::invalid_value("endpoint.path", e.to_string()))
    }
}

/// Configuration for an [`Explorer`](crate::Explorer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Id of the element the widget mounts into.
    #[serde(default = "default_container_id")]
    pub container_id: String,
    /// Page title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Cookie policy for fetches.
    #[serde(default)]
    pub credentials: CredentialsMode,
    /// User agent sent with fetches. The HTTP client's default is used
    /// when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds. Fetches wait indefinitely when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// The GraphQL endpoint.
    pub endpoint: EndpointConfig,
}

impl ExplorerConfig {
    /// Create a configuration with defaults for everything but the origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            container_id: default_container_id(),
            title: default_title(),
            credentials: CredentialsMode::default(),
            user_agent: None,
            timeout_secs: None,
            endpoint: EndpointConfig::new(origin),
        }
    }

    /// Set the endpoint path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint.path = path.into();
        self
    }

    /// Set the container id.
    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = container_id.into();
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the credentials mode.
    pub fn with_credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set a request timeout, rounded up to whole seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let partial = u64::from(timeout.subsec_nanos() > 0);
        self.timeout_secs = Some(timeout.as_secs().saturating_add(partial));
        self
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let config = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                }
                .into());
            }
        };

        tracing::debug!(target: TARGET, path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check that the endpoint resolves and the container id is usable.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.endpoint.path.trim().is_empty() {
            return Err(ConfigError::invalid_value("endpoint.path", "must not be empty"));
        }
        let url = self.endpoint.url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_value(
                "endpoint.origin",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.container_id.is_empty() {
            return Err(ConfigError::invalid_value("container_id", "must not be empty"));
        }
        if self.container_id.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid_value(
                "container_id",
                "must not contain whitespace",
            ));
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::invalid_value("timeout_secs", "must be positive"));
        }
        Ok(())
    }

    /// The endpoint URL.
    pub fn endpoint_url(&self) -> std::result::Result<Url, ConfigError> {
        self.endpoint.url()
    }

    /// The request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The HTTP client settings implied by this configuration.
    pub fn http_client_builder(&self) -> std::result::Result<HttpClientBuilder, ConfigError> {
        let mut builder = HttpClientBuilder::new();

        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(ref user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let page = Url::parse(&self.endpoint.origin)
            .map_err(|e| ConfigError::invalid_value("endpoint.origin", e.to_string()))?;
        if !self.credentials.sends_cookies(&page, &self.endpoint_url()?) {
            builder = builder.no_cookies();
        }

        Ok(builder)
    }

    /// Build the fetcher this configuration describes.
    pub fn fetcher(&self) -> Result<GraphQLFetcher> {
        let fetcher = GraphQLFetcher::builder(self.endpoint.origin.as_str())
            .path(self.endpoint.path.as_str())
            .http_client_builder(self.http_client_builder()?)
            .build()?;
        Ok(fetcher)
    }
}
