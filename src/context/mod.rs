//! Request-scoped context store.
//!
//! The store associates a [`ContextRecord`] with the logical task that is
//! currently executing and carries it across every `.await` of that task.
//! It is backed by a tokio task-local, so the record follows the future
//! rather than the worker thread that happens to poll it: two tasks running
//! in parallel on different threads, or two futures interleaved on the same
//! thread, never observe each other's record.
//!
//! Task-locals do not cross `tokio::spawn` or `spawn_blocking` on their own.
//! [`ContextStore::spawn`], [`ContextStore::spawn_blocking`] and
//! [`ContextStore::bind`] capture the current record at the hand-off point
//! and re-install it on the other side.
//!
//! # Example
//! ```ignore
//! use reqscope::{context, ContextRecord};
//!
//! let id = context()
//!     .run(ContextRecord::with_request_id("abc"), async {
//!         tokio::time::sleep(std::time::Duration::from_millis(5)).await;
//!         context().request_id()
//!     })
//!     .await;
//! assert_eq!(id.as_deref(), Some("abc"));
//! ```

mod record;

pub use record::ContextRecord;

use std::future::Future;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;
use tokio::task::JoinHandle;

tokio::task_local! {
    static CURRENT: ContextRecord;
}

static STORE: OnceLock<ContextStore> = OnceLock::new();

/// Returns the process-wide context store, creating it on first use.
///
/// Concurrent first calls race on a `OnceLock`, so exactly one store is
/// ever constructed.
pub fn context() -> &'static ContextStore {
    STORE.get_or_init(ContextStore::new)
}

/// Scope counters exposed for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScopeStats {
    /// Scopes opened since the store was created
    pub opened: u64,
    /// Scopes whose work has not yet settled
    pub active: usize,
}

/// Process-wide facility that scopes a [`ContextRecord`] to a unit of work.
#[derive(Debug)]
pub struct ContextStore {
    opened: AtomicU64,
    active: AtomicUsize,
}

impl ContextStore {
    fn new() -> Self {
        Self {
            opened: AtomicU64::new(0),
            active: AtomicUsize::new(0),
        }
    }

    /// Runs `work` with `record` as the current record.
    ///
    /// Every continuation of `work` sees `record` unless it opens a nested
    /// scope. The output of `work` is returned untouched, so errors
    /// propagate as-is once the scope has been torn down.
    pub async fn run<F>(&self, record: ContextRecord, work: F) -> F::Output
    where
        F: Future,
    {
        let _guard = self.open_scope();
        CURRENT.scope(record, work).await
    }

    /// Synchronous counterpart of [`run`](Self::run).
    pub fn run_sync<F, R>(&self, record: ContextRecord, work: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = self.open_scope();
        CURRENT.sync_scope(record, work)
    }

    /// Returns a handle to the current record, or `None` outside any scope.
    pub fn current(&self) -> Option<ContextRecord> {
        CURRENT.try_with(ContextRecord::clone).ok()
    }

    /// Reads the current record without handing out a handle.
    pub fn with_current<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&ContextRecord) -> R,
    {
        CURRENT.try_with(f).ok()
    }

    /// Returns the non-empty correlation id of the current record.
    pub fn request_id(&self) -> Option<String> {
        CURRENT.try_with(ContextRecord::request_id).ok().flatten()
    }

    /// Binds `fut` to the record that is current right now.
    ///
    /// The returned future re-installs the captured record whenever it is
    /// polled, wherever that happens. Outside any scope `fut` is returned
    /// unscoped.
    pub fn bind<F>(&self, fut: F) -> impl Future<Output = F::Output> + use<F>
    where
        F: Future,
    {
        let record = self.current();
        async move {
            match record {
                Some(record) => CURRENT.scope(record, fut).await,
                None => fut.await,
            }
        }
    }

    /// Spawns a task that inherits the current record.
    pub fn spawn<F>(&self, fut: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        tokio::spawn(self.bind(fut))
    }

    /// Runs `f` on the blocking pool with the current record installed.
    pub fn spawn_blocking<F, R>(&self, f: F) -> JoinHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let record = self.current();
        tokio::task::spawn_blocking(move || match record {
            Some(record) => CURRENT.sync_scope(record, f),
            None => f(),
        })
    }

    pub fn stats(&self) -> ScopeStats {
        ScopeStats {
            opened: self.opened.load(Ordering::Relaxed),
            active: self.active.load(Ordering::Relaxed),
        }
    }

    fn open_scope(&self) -> ScopeGuard<'_> {
        self.opened.fetch_add(1, Ordering::Relaxed);
        self.active.fetch_add(1, Ordering::Relaxed);
        ScopeGuard { store: self }
    }
}

/// Marks a scope as settled when its work completes, fails or is dropped.
struct ScopeGuard<'a> {
    store: &'a ContextStore,
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.store.active.fetch_sub(1, Ordering::Relaxed);
    }
}
