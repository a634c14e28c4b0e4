//! Address-bar history.
//!
//! The [`History`] trait is the seam between the URL-state bridge and
//! whatever owns the visible address: a browser's `location` and
//! `history.replaceState` when the bridge is compiled for the web, or a
//! [`MemoryHistory`] in headless embeddings and tests.

use crate::logging::targets;

/// The location search and its non-navigating replacement.
pub trait History {
    /// The current search string, including its leading `?` when non-empty.
    fn search(&self) -> String;

    /// Replace the current entry's search string.
    ///
    /// Implementations must not push a new entry and must not trigger a
    /// navigation or page load.
    fn replace_search(&mut self, search: &str);
}

impl<H: History + ?Sized> History for Box<H> {
    fn search(&self) -> String {
        (**self).search()
    }

    fn replace_search(&mut self, search: &str) {
        (**self).replace_search(search);
    }
}

/// An in-memory history with a single current entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    path: String,
    search: String,
    length: usize,
    replace_count: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    /// Create a history positioned at `path` with an empty search.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            search: String::new(),
            length: 1,
            replace_count: 0,
        }
    }

    /// Create a history from a path that may carry a `?search` suffix.
    ///
    /// ```
    /// use graphiql_explorer_core::{History, MemoryHistory};
    ///
    /// let history = MemoryHistory::from_url("/graphiql?query=%7Bfoo%7D");
    /// assert_eq!(history.path(), "/graphiql");
    /// assert_eq!(history.search(), "?query=%7Bfoo%7D");
    /// ```
    pub fn from_url(url: &str) -> Self {
        let (path, search) = match url.find('?') {
            Some(index) => url.split_at(index),
            None => (url, ""),
        };
        Self {
            search: search.to_string(),
            ..Self::new(path)
        }
    }

    /// The path component of the current entry.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path and search of the current entry.
    pub fn url(&self) -> String {
        format!("{}{}", self.path, self.search)
    }

    /// Number of entries in the history stack.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Always `false`: a history has at least its current entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// How many times the current entry has been replaced.
    pub fn replace_count(&self) -> usize {
        self.replace_count
    }
}

impl History for MemoryHistory {
    fn search(&self) -> String {
        self.search.clone()
    }

    fn replace_search(&mut self, search: &str) {
        tracing::trace!(target: targets::HISTORY, path = %self.path, search, "replacing history entry");
        self.search = search.to_string();
        self.replace_count += 1;
    }
}
