//! Host page rendering.
//!
//! The explorer runs in the browser; this module renders the page that
//! loads GraphiQL from a CDN and mounts it with URL-synced state. The
//! page's behaviour matches [`UrlStateBridge`](graphiql_explorer_core::UrlStateBridge)
//! and [`GraphQLFetcher`](graphiql_explorer_net::GraphQLFetcher).
//!
//! Templates use `%%name%%` placeholders and are filled in a single pass,
//! so substituted values are never rescanned.

use crate::config::{CredentialsMode, ExplorerConfig};

static PAGE_TEMPLATE: &str = include_str!("../assets/graphiql.html");
static INIT_SCRIPT_TEMPLATE: &str = include_str!("../assets/graphiql-init.js");

/// GraphiQL release loaded by default.
pub const DEFAULT_GRAPHIQL_VERSION: &str = "1.4.7";

/// React release loaded by default.
pub const DEFAULT_REACT_VERSION: &str = "17.0.2";

/// Options for [`render_page`] and [`render_init_script`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Page title.
    pub title: String,
    /// Endpoint the page fetches from, relative to the page or absolute.
    pub path: String,
    /// Id of the element GraphiQL mounts into.
    pub container_id: String,
    /// Cookie policy passed to the browser's `fetch`.
    pub credentials: CredentialsMode,
    /// GraphiQL version on the CDN.
    pub graphiql_version: String,
    /// React version on the CDN.
    pub react_version: String,
}

impl PageOptions {
    /// Options for an endpoint path, with defaults for the rest.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            title: "GraphiQL".to_string(),
            path: path.into(),
            container_id: "graphiql".to_string(),
            credentials: CredentialsMode::Include,
            graphiql_version: DEFAULT_GRAPHIQL_VERSION.to_string(),
            react_version: DEFAULT_REACT_VERSION.to_string(),
        }
    }

    /// Set the container id.
    pub fn container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = container_id.into();
        self
    }

    /// Set the page title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the credentials mode.
    pub fn credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    /// Pin the GraphiQL version.
    pub fn graphiql_version(mut self, version: impl Into<String>) -> Self {
        self.graphiql_version = version.into();
        self
    }

    /// Pin the React version.
    pub fn react_version(mut self, version: impl Into<String>) -> Self {
        self.react_version = version.into();
        self
    }
}

impl From<&ExplorerConfig> for PageOptions {
    fn from(config: &ExplorerConfig) -> Self {
        PageOptions::new(config.endpoint.path.as_str())
            .title(config.title.as_str())
            .container_id(config.container_id.as_str())
            .credentials(config.credentials)
    }
}

/// Render the init script alone.
///
/// `%%path%%` and `%%container%%` become JavaScript string literals.
pub fn render_init_script(options: &PageOptions) -> String {
    let path = js_string(&options.path);
    let container = js_string(&options.container_id);
    let credentials = js_string(options.credentials.as_str());
    fill(
        INIT_SCRIPT_TEMPLATE,
        &[
            ("path", path.as_str()),
            ("container", container.as_str()),
            ("credentials", credentials.as_str()),
        ],
    )
}

/// Render the complete host page.
pub fn render_page(options: &PageOptions) -> String {
    let title = html_escape(&options.title);
    let container = html_escape(&options.container_id);
    let graphiql_version = html_escape(&options.graphiql_version);
    let react_version = html_escape(&options.react_version);
    let init_script = render_init_script(options);

    let page = fill(
        PAGE_TEMPLATE,
        &[
            ("title", title.as_str()),
            ("container_attr", container.as_str()),
            ("graphiql_version", graphiql_version.as_str()),
            ("react_version", react_version.as_str()),
            ("init_script", init_script.as_str()),
        ],
    );
    tracing::trace!(target: "graphiql_explorer::page", bytes = page.len(), "rendered page");
    page
}

/// Replace each known `%%name%%` with its value. Unknown placeholders are
/// left as written.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("%%") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after.find("%%").and_then(|end| {
            let name = &after[..end];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("%%");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// A double-quoted JavaScript string literal that is safe inside `<script>`.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_owned())
        .to_string()
        .replace('<', "\\u003c")
}

fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
