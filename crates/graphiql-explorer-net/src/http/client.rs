//! The HTTP client fetches run on.

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;

use crate::error::Result;

/// Redirect limit of the Fetch standard.
const MAX_REDIRECTS: usize = 20;

/// Settings the HTTP client was built with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout. `None` waits indefinitely, like a browser fetch.
    pub timeout: Option<Duration>,
    /// Whether a cookie jar stores `Set-Cookie` responses and replays them.
    pub cookies_enabled: bool,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            cookies_enabled: true,
            user_agent: format!("GraphiQLExplorer/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for an [`HttpClient`].
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Start from the defaults: no timeout, cookies on.
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort requests that take longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Send no cookies and keep none.
    pub fn no_cookies(mut self) -> Self {
        self.config.cookies_enabled = false;
        self
    }

    /// Replace the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = reqwest::Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .cookie_store(self.config.cookies_enabled)
            .user_agent(self.config.user_agent.as_str());

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpClient {
            inner: Arc::new(HttpClientInner {
                client: builder.build()?,
                config: self.config,
            }),
        })
    }
}

struct HttpClientInner {
    client: reqwest::Client,
    config: HttpClientConfig,
}

/// The HTTP client queries are executed with.
///
/// Clones share the connection pool and the cookie jar.
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl HttpClient {
    /// A client with the default settings.
    pub fn new() -> Result<Self> {
        HttpClientBuilder::new().build()
    }

    /// Start configuring a client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// The settings this client was built with.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    pub(crate) fn reqwest_client(&self) -> &reqwest::Client {
        &self.inner.client
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpClientConfig::default();
        assert!(config.timeout.is_none());
        assert!(config.cookies_enabled);
        assert!(config.user_agent.starts_with("GraphiQLExplorer/"));
    }

    #[test]
    fn test_builder_records_settings() {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(3))
            .no_cookies()
            .user_agent("Test/1.0")
            .build()
            .unwrap();

        assert_eq!(
            client.config(),
            &HttpClientConfig {
                timeout: Some(Duration::from_secs(3)),
                cookies_enabled: false,
                user_agent: "Test/1.0".to_string(),
            }
        );
    }
}
