//! GraphiQL Explorer - an in-browser GraphQL IDE host whose editor state
//! lives in the page URL.
//!
//! This is the main umbrella crate that re-exports all public APIs.
//!
//! # Example
//!
//! ```no_run
//! use graphiql_explorer::{Explorer, ExplorerConfig, MemoryHistory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExplorerConfig::load("explorer.toml")?;
//!     let history = MemoryHistory::from_url("/graphiql?query=%7B%20__typename%20%7D");
//!     let mut explorer = Explorer::new(config, history)?;
//!
//!     explorer.on_edit_operation_name("Typename");
//!     println!("{}", explorer.execute_current().await?);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod explorer;
pub mod page;
pub mod prelude;

pub use config::{CredentialsMode, EndpointConfig, ExplorerConfig};
pub use error::{ConfigError, Error, Result};
pub use explorer::{Explorer, WidgetProps};
pub use page::{render_init_script, render_page, PageOptions};

pub use graphiql_explorer_core::*;

/// Query execution module.
pub mod net {
    pub use graphiql_explorer_net::*;
}
