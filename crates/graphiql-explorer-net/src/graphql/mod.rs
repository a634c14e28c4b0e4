//! GraphQL query execution for the explorer.
//!
//! This module provides:
//! - The request object the explorer widget sends
//! - A fetcher that POSTs it to one fixed endpoint
//! - A result type that is either parsed JSON or the raw body text
//! - A signal-based variant for UI event loops
//!
//! # Example
//!
//! ```ignore
//! use graphiql_explorer_net::graphql::{FetchResult, GraphQLFetcher, GraphQLRequest};
//!
//! let fetcher = GraphQLFetcher::builder("https://api.example.com")
//!     .path("/graphql")
//!     .build()?;
//!
//! let request = GraphQLRequest::new("query GetUser($id: ID!) { user(id: $id) { name } }")
//!     .variable("id", "123")
//!     .operation_name("GetUser");
//!
//! match fetcher.fetch(&request).await? {
//!     FetchResult::Json(value) => println!("{:#}", value),
//!     FetchResult::Text(text) => println!("{}", text),
//! }
//! ```

mod async_fetcher;
mod fetcher;
mod request;
mod response;

pub use async_fetcher::{runtime, AsyncFetcher, FetchStatus, RequestId};
pub use fetcher::{GraphQLFetcher, GraphQLFetcherBuilder};
pub use request::GraphQLRequest;
pub use response::FetchResult;
