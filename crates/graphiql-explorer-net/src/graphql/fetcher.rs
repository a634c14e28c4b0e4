//! The query fetcher.

use std::sync::Arc;

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use url::Url;

use super::response::FetchResult;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientBuilder, HttpResponse};

const TARGET: &str = "graphiql_explorer_net::graphql";
const APPLICATION_JSON: &str = "application/json";

/// Builder for a [`GraphQLFetcher`].
pub struct GraphQLFetcherBuilder {
    origin: String,
    path: String,
    http_client: Option<HttpClient>,
    http_client_builder: Option<HttpClientBuilder>,
    headers: Vec<(String, String)>,
}

impl GraphQLFetcherBuilder {
    /// Create a builder for the given origin, e.g. `https://api.example.com`.
    ///
    /// The endpoint path defaults to `/graphql`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            path: "/graphql".to_string(),
            http_client: None,
            http_client_builder: None,
            headers: Vec::new(),
        }
    }

    /// Set the endpoint path, resolved against the origin.
    ///
    /// Relative paths resolve the way a browser resolves them against the
    /// page URL; an absolute URL replaces the origin entirely.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Use an existing HTTP client (and its cookie jar).
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Use a custom HTTP client builder.
    pub fn http_client_builder(mut self, builder: HttpClientBuilder) -> Self {
        self.http_client_builder = Some(builder);
        self
    }

    /// Add a header to every fetch.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Build the fetcher.
    pub fn build(self) -> Result<GraphQLFetcher> {
        let http_client = match (self.http_client, self.http_client_builder) {
            (Some(client), _) => client,
            (None, Some(builder)) => builder.build()?,
            (None, None) => HttpClient::new()?,
        };

        let endpoint = Url::parse(&self.origin)?.join(&self.path)?;

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }

        tracing::debug!(target: TARGET, endpoint = %endpoint, "built fetcher");

        Ok(GraphQLFetcher {
            inner: Arc::new(GraphQLFetcherInner {
                http_client,
                endpoint,
                headers,
            }),
        })
    }
}

struct GraphQLFetcherInner {
    http_client: HttpClient,
    endpoint: Url,
    headers: HeaderMap,
}

/// Executes explorer requests against one fixed endpoint.
///
/// Every fetch is a single JSON `POST`; the response body is read in full
/// and returned as JSON when it parses, as text otherwise. HTTP error
/// statuses are not treated as failures. Transport failures are returned
/// as-is, without retries.
///
/// # Example
///
/// ```ignore
/// use graphiql_explorer_net::graphql::{GraphQLFetcher, GraphQLRequest};
///
/// let fetcher = GraphQLFetcher::builder("https://api.example.com")
///     .path("/graphql")
///     .build()?;
///
/// let result = fetcher.fetch(&GraphQLRequest::new("{ __typename }")).await?;
/// println!("{}", result);
/// ```
#[derive(Clone)]
pub struct GraphQLFetcher {
    inner: Arc<GraphQLFetcherInner>,
}

impl GraphQLFetcher {
    /// Create a builder for the given origin.
    pub fn builder(origin: impl Into<String>) -> GraphQLFetcherBuilder {
        GraphQLFetcherBuilder::new(origin)
    }

    /// The resolved endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// The HTTP client used for fetches.
    pub fn http_client(&self) -> &HttpClient {
        &self.inner.http_client
    }

    /// Execute a request object.
    ///
    /// `params` is serialized as the JSON body unchanged; its shape is the
    /// widget's business.
    pub async fn fetch<T: Serialize + ?Sized>(&self, params: &T) -> Result<FetchResult> {
        let body = serde_json::to_vec(params)?;

        let response = self
            .inner
            .http_client
            .reqwest_client()
            .post(self.inner.endpoint.clone())
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .headers(self.inner.headers.clone())
            .body(body)
            .send()
            .await?;
        let response = HttpResponse::from_reqwest(response);

        tracing::debug!(
            target: TARGET,
            status = response.status(),
            content_type = response.content_type().unwrap_or_default(),
            "received response"
        );

        let body = response.text().await?;
        Ok(FetchResult::from_body(body))
    }
}

impl std::fmt::Debug for GraphQLFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQLFetcher")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("http_client", &self.inner.http_client)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn test_endpoint_resolution() {
        let fetcher = GraphQLFetcher::builder("https://api.example.com/app/")
            .path("/graphql")
            .build()
            .unwrap();
        assert_eq!(fetcher.endpoint().as_str(), "https://api.example.com/graphql");

        let fetcher = GraphQLFetcher::builder("https://api.example.com/app/")
            .path("graphql")
            .build()
            .unwrap();
        assert_eq!(
            fetcher.endpoint().as_str(),
            "https://api.example.com/app/graphql"
        );
    }

    #[test]
    fn test_default_path() {
        let fetcher = GraphQLFetcher::builder("http://localhost:8080").build().unwrap();
        assert_eq!(fetcher.endpoint().path(), "/graphql");
    }

    #[test]
    fn test_invalid_origin() {
        let result = GraphQLFetcher::builder("not a url").build();
        assert!(matches!(result, Err(NetworkError::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_header() {
        let result = GraphQLFetcher::builder("http://localhost")
            .header("bad header", "x")
            .build();
        assert!(matches!(result, Err(NetworkError::InvalidHeader(_))));
    }
}
