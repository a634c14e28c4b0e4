//! HTTP transport for GraphiQL Explorer.
//!
//! A thin wrapper over `reqwest` configured the way the explorer needs it:
//! a cookie jar for ambient credentials and no request timeout unless one
//! is asked for.
//!
//! # Example
//!
//! ```ignore
//! use graphiql_explorer_net::http::HttpClient;
//!
//! let client = HttpClient::builder()
//!     .user_agent("MyExplorer/1.0")
//!     .build()?;
//! assert!(client.config().cookies_enabled);
//! ```

mod client;
mod response;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use response::HttpResponse;
