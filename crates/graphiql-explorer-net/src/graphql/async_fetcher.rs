//! Fetcher with signal-based completion.
//!
//! For UI integration: [`AsyncFetcher::fetch_async`] returns immediately
//! and the outcome is emitted on [`AsyncFetcher::fetch_finished`]. Fetches
//! are never aborted, so a slow response may arrive after a newer one; each
//! outcome carries its [`RequestId`] so the receiver can keep only the
//! latest.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use graphiql_explorer_core::Signal;
use serde::Serialize;
use tokio::runtime::Handle;

use super::fetcher::GraphQLFetcher;
use super::response::FetchResult;
use crate::error::{NetworkError, Result};

/// Unique identifier for an async fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw, monotonically increasing value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Outcome of an async fetch.
#[derive(Clone, Debug)]
pub enum FetchStatus {
    /// The response body was read.
    Completed {
        /// The request ID.
        id: RequestId,
        /// The body, as JSON or text.
        result: FetchResult,
    },
    /// The transport failed.
    Failed {
        /// The request ID.
        id: RequestId,
        /// The transport error.
        error: NetworkError,
    },
}

impl FetchStatus {
    /// Get the request ID.
    pub fn id(&self) -> RequestId {
        match self {
            Self::Completed { id, .. } | Self::Failed { id, .. } => *id,
        }
    }

    /// Check if the fetch completed.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// A [`GraphQLFetcher`] that reports through a signal.
pub struct AsyncFetcher {
    fetcher: GraphQLFetcher,
    handle: Handle,
    /// Signal emitted when a fetch completes or fails.
    pub fetch_finished: Arc<Signal<FetchStatus>>,
}

impl AsyncFetcher {
    /// Create an async fetcher running on the shared runtime.
    pub fn new(fetcher: GraphQLFetcher) -> Result<Self> {
        Ok(Self::with_handle(fetcher, runtime::get()?.handle().clone()))
    }

    /// Create an async fetcher running on a specific runtime.
    pub fn with_handle(fetcher: GraphQLFetcher, handle: Handle) -> Self {
        Self {
            fetcher,
            handle,
            fetch_finished: Arc::new(Signal::new()),
        }
    }

    /// Get a reference to the underlying fetcher.
    pub fn fetcher(&self) -> &GraphQLFetcher {
        &self.fetcher
    }

    /// Start a fetch and return its ID without waiting.
    ///
    /// Serialization happens before spawning, so the request only needs to
    /// live for the duration of this call.
    pub fn fetch_async<T: Serialize + ?Sized>(&self, params: &T) -> RequestId {
        let id = RequestId::new();
        let fetcher = self.fetcher.clone();
        let signal = Arc::clone(&self.fetch_finished);
        let body = serde_json::to_value(params);

        self.handle.spawn(async move {
            let outcome = match body {
                Ok(body) => fetcher.fetch(&body).await,
                Err(err) => Err(err.into()),
            };
            let status = match outcome {
                Ok(result) => FetchStatus::Completed { id, result },
                Err(error) => {
                    tracing::debug!(target: "graphiql_explorer_net::graphql", id = id.value(), %error, "fetch failed");
                    FetchStatus::Failed { id, error }
                }
            };
            signal.emit(status);
        });

        id
    }
}

impl std::fmt::Debug for AsyncFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncFetcher")
            .field("fetcher", &self.fetcher)
            .finish()
    }
}

/// Runtime management for async fetches.
///
/// Provides the shared tokio runtime used when the embedding application
/// does not supply its own.
pub mod runtime {
    use std::sync::OnceLock;

    use parking_lot::{const_mutex, Mutex};
    use tokio::runtime::Runtime;

    use crate::error::{NetworkError, Result};

    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    static BUILD: Mutex<()> = const_mutex(());

    /// Get the shared runtime, creating it on first use.
    ///
    /// Only one runtime is ever built; concurrent first callers wait for it.
    pub fn get() -> Result<&'static Runtime> {
        if let Some(runtime) = RUNTIME.get() {
            return Ok(runtime);
        }

        let _building = BUILD.lock();
        if let Some(runtime) = RUNTIME.get() {
            return Ok(runtime);
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("graphiql-explorer-net")
            .enable_all()
            .build()
            .map_err(|e| NetworkError::Runtime(e.to_string()))?;
        Ok(RUNTIME.get_or_init(|| runtime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_increase() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert!(b > a);
    }

    #[test]
    fn test_shared_runtime_is_built_once() {
        let threads: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| runtime::get().map(|rt| rt as *const _ as usize)))
            .collect();
        let addresses: Vec<usize> = threads
            .into_iter()
            .map(|t| t.join().unwrap().unwrap())
            .collect();

        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_status_id() {
        let id = RequestId::new();
        let status = FetchStatus::Failed {
            id,
            error: NetworkError::Timeout,
        };
        assert_eq!(status.id(), id);
        assert!(!status.is_completed());
    }
}
