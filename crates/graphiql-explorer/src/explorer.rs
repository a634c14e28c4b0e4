//! The explorer: URL-synced editor state plus a query fetcher.

use graphiql_explorer_core::{EditEvent, History, Parameters, UrlStateBridge};
use graphiql_explorer_net::graphql::{FetchResult, GraphQLFetcher, GraphQLRequest};
use serde::Serialize;

use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::page::{render_page, PageOptions};

const TARGET: &str = "graphiql_explorer::explorer";

/// Initial values handed to the GraphiQL widget.
///
/// Each field is the matching URL parameter, if present. Variables are
/// already pretty-printed when they were valid JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WidgetProps {
    /// Initial query text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Initial variables text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<String>,
    /// Initial operation name.
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl WidgetProps {
    /// Read the widget props from parameters.
    pub fn from_parameters(parameters: &Parameters) -> Self {
        Self {
            query: parameters.query().map(str::to_string),
            variables: parameters.variables().map(str::to_string),
            operation_name: parameters.operation_name().map(str::to_string),
        }
    }
}

/// An explorer session.
///
/// Owns the [`UrlStateBridge`] that keeps the address bar in sync with the
/// editors, and the [`GraphQLFetcher`] the widget runs queries through.
///
/// # Example
///
/// ```ignore
/// use graphiql_explorer::{Explorer, ExplorerConfig};
/// use graphiql_explorer_core::MemoryHistory;
///
/// let config = ExplorerConfig::new("http://localhost:8080");
/// let history = MemoryHistory::from_url("/graphiql?query=%7B%20a%20%7D");
/// let mut explorer = Explorer::new(config, history)?;
///
/// assert_eq!(explorer.widget_props().query.as_deref(), Some("{ a }"));
///
/// explorer.on_edit_query("{ b }");
/// let result = explorer.execute_current().await?;
/// ```
pub struct Explorer<H: History> {
    config: ExplorerConfig,
    bridge: UrlStateBridge<H>,
    fetcher: GraphQLFetcher,
}

impl<H: History> Explorer<H> {
    /// Start a session from a validated configuration and the current
    /// address bar.
    pub fn new(config: ExplorerConfig, history: H) -> Result<Self> {
        config.validate()?;
        let fetcher = config.fetcher()?;
        Ok(Self::with_fetcher(config, history, fetcher))
    }

    /// Start a session with an externally built fetcher.
    pub fn with_fetcher(config: ExplorerConfig, history: H, fetcher: GraphQLFetcher) -> Self {
        let bridge = UrlStateBridge::from_history(history);
        tracing::debug!(
            target: TARGET,
            endpoint = %fetcher.endpoint(),
            parameters = bridge.parameters().len(),
            "explorer started"
        );
        Self {
            config,
            bridge,
            fetcher,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// The URL-state bridge.
    pub fn bridge(&self) -> &UrlStateBridge<H> {
        &self.bridge
    }

    /// Mutable access to the URL-state bridge, e.g. to drain an edit channel.
    pub fn bridge_mut(&mut self) -> &mut UrlStateBridge<H> {
        &mut self.bridge
    }

    /// The fetcher.
    pub fn fetcher(&self) -> &GraphQLFetcher {
        &self.fetcher
    }

    /// The current parameters.
    pub fn parameters(&self) -> &Parameters {
        self.bridge.parameters()
    }

    /// Initial values for the widget.
    pub fn widget_props(&self) -> WidgetProps {
        WidgetProps::from_parameters(self.bridge.parameters())
    }

    /// Forward a query edit. Returns the new search string.
    pub fn on_edit_query(&mut self, query: impl Into<String>) -> String {
        self.bridge.on_edit_query(query)
    }

    /// Forward a variables edit. Returns the new search string.
    pub fn on_edit_variables(&mut self, variables: impl Into<String>) -> String {
        self.bridge.on_edit_variables(variables)
    }

    /// Forward an operation name edit. Returns the new search string.
    pub fn on_edit_operation_name(&mut self, operation_name: impl Into<String>) -> String {
        self.bridge.on_edit_operation_name(operation_name)
    }

    /// Forward any edit. Returns the new search string.
    pub fn apply(&mut self, event: EditEvent) -> String {
        self.bridge.apply(event)
    }

    /// Run a request object through the fetcher.
    pub async fn execute<T: Serialize + ?Sized>(&self, request: &T) -> Result<FetchResult> {
        Ok(self.fetcher.fetch(request).await?)
    }

    /// Run the query currently held in the parameters.
    pub async fn execute_current(&self) -> Result<FetchResult> {
        let request = GraphQLRequest::from_parameters(self.bridge.parameters());
        self.execute(&request).await
    }

    /// Render the host page for this session's configuration.
    pub fn render_page(&self) -> String {
        render_page(&PageOptions::from(&self.config))
    }

    /// End the session, returning the final parameters and the history.
    pub fn into_parts(self) -> (Parameters, H) {
        self.bridge.into_parts()
    }
}

impl<H: History + std::fmt::Debug> std::fmt::Debug for Explorer<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("config", &self.config)
            .field("bridge", &self.bridge)
            .field("fetcher", &self.fetcher)
            .finish()
    }
}
