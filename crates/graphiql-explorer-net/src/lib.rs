//! Networking module for GraphiQL Explorer.
//!
//! This crate executes the explorer's queries:
//!
//! - **Fetcher**: One JSON `POST` per query against a fixed endpoint, with
//!   the client's cookie jar carrying ambient credentials
//! - **Best-effort decoding**: Bodies that are not JSON come back as text
//!   instead of an error
//! - **Signal-based async**: Completion reported through a signal, for UI
//!   event loops
//!
//! # Fetching
//!
//! ```ignore
//! use graphiql_explorer_net::{FetchResult, GraphQLFetcher, GraphQLRequest};
//!
//! let fetcher = GraphQLFetcher::builder("http://localhost:8080")
//!     .path("/graphql")
//!     .build()?;
//!
//! let result = fetcher.fetch(&GraphQLRequest::new("{ __typename }")).await?;
//! if let FetchResult::Text(text) = result {
//!     eprintln!("server did not answer with JSON: {}", text);
//! }
//! ```
//!
//! # Signal-Based Async
//!
//! ```ignore
//! use graphiql_explorer_net::{AsyncFetcher, FetchStatus};
//!
//! let fetcher = AsyncFetcher::new(fetcher)?;
//!
//! fetcher.fetch_finished.connect(|status| match status {
//!     FetchStatus::Completed { id, result } => println!("{:?}: {}", id, result),
//!     FetchStatus::Failed { id, error } => println!("{:?} failed: {}", id, error),
//! });
//!
//! let id = fetcher.fetch_async(&GraphQLRequest::new("{ __typename }"));
//! ```
//!
//! # Failure Model
//!
//! Transport failures surface as [`NetworkError`]. Nothing is retried, no
//! timeout applies unless configured on the [`HttpClient`], and in-flight
//! fetches are never cancelled.

mod error;
pub mod graphql;
pub mod http;

pub use error::{NetworkError, Result};

// Re-export commonly used types at the crate root
pub use graphql::{
    AsyncFetcher, FetchResult, FetchStatus, GraphQLFetcher, GraphQLFetcherBuilder, GraphQLRequest,
    RequestId,
};
pub use http::{HttpClient, HttpClientBuilder, HttpClientConfig, HttpResponse};
