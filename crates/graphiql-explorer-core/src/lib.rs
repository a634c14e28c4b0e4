//! Core systems for GraphiQL Explorer.
//!
//! This crate provides the state side of the explorer:
//!
//! - **Parameters**: The ordered query-string mapping and its codec
//! - **URL-State Bridge**: Edit hooks that keep the parameters and the
//!   address bar in sync
//! - **History**: The seam standing in for the browser address bar
//! - **Signal/Slot System**: Observer wiring between the bridge and the
//!   rendering layer
//!
//! # Bridge Example
//!
//! ```
//! use graphiql_explorer_core::{MemoryHistory, UrlStateBridge};
//!
//! let history = MemoryHistory::from_url("/graphiql?variables=%7B%22a%22%3A1%7D");
//! let mut bridge = UrlStateBridge::from_history(history);
//!
//! // Variables are pretty-printed on load
//! assert_eq!(bridge.parameters().variables(), Some("{\n  \"a\": 1\n}"));
//!
//! // React to address-bar rewrites
//! bridge.url_changed.connect(|search| {
//!     println!("address bar is now {}", search);
//! });
//!
//! // Clearing a field drops it from the URL
//! assert_eq!(bridge.on_edit_variables(""), "?");
//! ```

pub mod bridge;
mod error;
pub mod history;
pub mod logging;
pub mod params;
pub mod signal;

pub use bridge::{edit_channel, EditEvent, UrlStateBridge};
pub use error::{ExplorerError, ParamsError, Result};
pub use history::{History, MemoryHistory};
pub use params::{decode_component, encode_component, pretty_json, Parameters};
pub use signal::{ConnectionGuard, ConnectionId, Signal};

// Re-export the channel halves used by `edit_channel`
pub use crossbeam_channel::{Receiver, Sender};
