//! Logging facilities for GraphiQL Explorer.
//!
//! GraphiQL Explorer uses the `tracing` crate for instrumentation. To see
//! logs, install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter(EnvFilter::new("graphiql_explorer_core::bridge=debug"))
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Both swallowed parse failures (variables pretty-printing, response body
//! decoding) are reported at `trace` level under their subsystem target, so
//! they stay silent unless explicitly enabled.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "graphiql_explorer_core::signal";
    /// Query-string parameters target.
    pub const PARAMS: &str = "graphiql_explorer_core::params";
    /// URL-state bridge target.
    pub const BRIDGE: &str = "graphiql_explorer_core::bridge";
    /// Address-bar history target.
    pub const HISTORY: &str = "graphiql_explorer_core::history";
}
