//! URL-state bridge.
//!
//! [`UrlStateBridge`] owns the explorer's [`Parameters`] and the [`History`]
//! they mirror. It is constructed once from the current location, receives
//! the three edit hooks from the explorer widget, and rewrites the address
//! bar after each of them with a non-navigating replace.
//!
//! The rendering layer talks to the bridge in one of two ways:
//!
//! - **Direct calls**: `on_edit_query`, `on_edit_variables`,
//!   `on_edit_operation_name`, or `apply` with an [`EditEvent`].
//! - **Message passing**: the widget keeps the [`Sender`] half of an
//!   [`edit_channel`] and the UI loop calls [`UrlStateBridge::drain`].
//!
//! Either way, the bridge reports back through its signals.
//!
//! # Example
//!
//! ```
//! use graphiql_explorer_core::{MemoryHistory, UrlStateBridge};
//!
//! let history = MemoryHistory::from_url("/graphiql?query=%7Bfoo%7D");
//! let mut bridge = UrlStateBridge::from_history(history);
//! assert_eq!(bridge.parameters().query(), Some("{foo}"));
//!
//! bridge.on_edit_query("{ bar }");
//! assert_eq!(bridge.history().url(), "/graphiql?query=%7B%20bar%20%7D");
//! ```

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::error::{ExplorerError, Result};
use crate::history::History;
use crate::logging::targets;
use crate::params::{Parameters, OPERATION_NAME, QUERY, VARIABLES};
use crate::signal::Signal;

/// An edit made by the user in one of the widget's three editors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// The query editor changed.
    Query(String),
    /// The variables editor changed.
    Variables(String),
    /// The selected operation changed.
    OperationName(String),
}

impl EditEvent {
    /// The parameter key this edit writes to.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Query(_) => QUERY,
            Self::Variables(_) => VARIABLES,
            Self::OperationName(_) => OPERATION_NAME,
        }
    }

    /// The new value.
    pub fn value(&self) -> &str {
        match self {
            Self::Query(v) | Self::Variables(v) | Self::OperationName(v) => v,
        }
    }
}

/// Create an unbounded channel for posting edits to a bridge.
pub fn edit_channel() -> (Sender<EditEvent>, Receiver<EditEvent>) {
    crossbeam_channel::unbounded()
}

/// Keeps [`Parameters`] and the address bar in sync.
pub struct UrlStateBridge<H: History> {
    parameters: Parameters,
    history: H,
    /// Emitted after an edit is stored, before the URL is rewritten.
    pub parameters_changed: Signal<EditEvent>,
    /// Emitted with the new search string after every URL rewrite.
    pub url_changed: Signal<String>,
}

impl<H: History> UrlStateBridge<H> {
    /// Build the bridge from the history's current search string.
    pub fn from_history(history: H) -> Self {
        let search = history.search();
        let parameters = Parameters::parse(&search);
        tracing::debug!(
            target: targets::BRIDGE,
            search = %search,
            entries = parameters.len(),
            "parsed location parameters"
        );
        Self::with_parameters(parameters, history)
    }

    /// Build the bridge from already-parsed parameters.
    ///
    /// The history is left untouched until the first edit or [`sync_url`](Self::sync_url).
    pub fn with_parameters(parameters: Parameters, history: H) -> Self {
        Self {
            parameters,
            history,
            parameters_changed: Signal::new(),
            url_changed: Signal::new(),
        }
    }

    /// The current parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The history the bridge writes to.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Edit hook for the query editor. Returns the new search string.
    pub fn on_edit_query(&mut self, query: impl Into<String>) -> String {
        self.apply(EditEvent::Query(query.into()))
    }

    /// Edit hook for the variables editor. Returns the new search string.
    pub fn on_edit_variables(&mut self, variables: impl Into<String>) -> String {
        self.apply(EditEvent::Variables(variables.into()))
    }

    /// Edit hook for the operation name. Returns the new search string.
    pub fn on_edit_operation_name(&mut self, operation_name: impl Into<String>) -> String {
        self.apply(EditEvent::OperationName(operation_name.into()))
    }

    /// Store an edit verbatim and synchronize the URL.
    ///
    /// No validation is performed: malformed GraphQL or JSON is stored as-is.
    pub fn apply(&mut self, event: EditEvent) -> String {
        tracing::trace!(target: targets::BRIDGE, key = event.key(), "applying edit");
        self.parameters.set(event.key(), event.value());
        self.parameters_changed.emit(event);
        self.sync_url()
    }

    /// Apply every edit currently waiting in `receiver`.
    ///
    /// Returns how many edits were applied. Fails with
    /// [`ExplorerError::EditChannelClosed`] only when nothing was pending and
    /// every sender has been dropped.
    pub fn drain(&mut self, receiver: &Receiver<EditEvent>) -> Result<usize> {
        let mut applied = 0;
        loop {
            match receiver.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => return Ok(applied),
                Err(TryRecvError::Disconnected) if applied == 0 => {
                    return Err(ExplorerError::EditChannelClosed);
                }
                Err(TryRecvError::Disconnected) => return Ok(applied),
            }
        }
    }

    /// Rewrite the address bar from the current parameters.
    ///
    /// Replaces the current history entry; never pushes one.
    pub fn sync_url(&mut self) -> String {
        let search = self.parameters.to_search();
        self.history.replace_search(&search);
        tracing::debug!(target: targets::BRIDGE, search = %search, "synchronized url");
        self.url_changed.emit(search.clone());
        search
    }

    /// Take the parameters and history back out of the bridge.
    pub fn into_parts(self) -> (Parameters, H) {
        (self.parameters, self.history)
    }
}

impl<H: History + std::fmt::Debug> std::fmt::Debug for UrlStateBridge<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlStateBridge")
            .field("parameters", &self.parameters)
            .field("history", &self.history)
            .finish()
    }
}
