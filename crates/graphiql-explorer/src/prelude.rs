//! Prelude module for GraphiQL Explorer.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use graphiql_explorer::prelude::*;
//! ```
//!
//! This provides access to:
//! - Session wiring (`Explorer`, `ExplorerConfig`)
//! - URL state (`Parameters`, `UrlStateBridge`, `History`)
//! - Query execution (`GraphQLFetcher`, `GraphQLRequest`, `FetchResult`)

// ============================================================================
// Session
// ============================================================================

pub use crate::{CredentialsMode, Explorer, ExplorerConfig, WidgetProps};
pub use crate::{render_page, PageOptions};

// ============================================================================
// URL State and Signals
// ============================================================================

pub use graphiql_explorer_core::{
    EditEvent, History, MemoryHistory, Parameters, Signal, UrlStateBridge,
};

// ============================================================================
// Query Execution
// ============================================================================

pub use graphiql_explorer_net::{FetchResult, GraphQLFetcher, GraphQLRequest};
