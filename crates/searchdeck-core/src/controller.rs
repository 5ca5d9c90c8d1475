//! Debounced query controller.
//!
//! Turns bursty query input into a minimal, ordered sequence of fetches and
//! publishes only the freshest result.
//!
//! # Lifecycle
//!
//! - [`QueryController::submit_query`] echoes the query and (re)starts the
//!   quiescence timer. Nothing is fetched yet.
//! - When the timer elapses, a blank query resets the state to
//!   [`ResultState::Idle`]; anything else mints a [`RequestToken`], moves to
//!   [`ResultState::Pending`] and invokes the fetch function.
//! - When the fetch settles, its result is committed only if its token is
//!   still the latest. Otherwise it is dropped.
//! - [`QueryController::dispose`] (or dropping the controller) cancels the
//!   timer and stales every outstanding request.
//!
//! All transitions happen while holding the controller's lock, so a timer
//! restart can never interleave with a dispatch. The fetch function itself
//! runs with the lock released and may call back into the controller.
//!
//! The controller spawns onto the ambient Tokio runtime; its input methods
//! must be called from within one.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::state::ResultState;
use crate::token::{RequestToken, TokenCounter};

/// Default quiescence window.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Controller tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// How long input must be quiet before a query is dispatched.
    pub debounce: Duration,
    /// Abort the task driving a superseded request instead of merely
    /// ignoring its result.
    pub abort_superseded: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            abort_superseded: true,
        }
    }
}

impl ControllerConfig {
    /// Set the debounce window.
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Choose whether superseded requests are aborted.
    pub const fn with_abort_superseded(mut self, abort: bool) -> Self {
        self.abort_superseded = abort;
        self
    }
}

/// Mutable controller state, guarded by one lock.
#[derive(Debug, Default)]
struct Inner {
    /// Latest query as typed, for display echo.
    query: String,
    /// Request tokens.
    tokens: TokenCounter,
    /// Bumped on every timer restart or cancellation. A timer only fires if
    /// its sequence number is still current.
    timer_seq: u64,
    /// Pending debounce timer.
    timer: Option<JoinHandle<()>>,
    /// Task driving the latest dispatched request.
    in_flight: Option<JoinHandle<()>>,
    /// Set once by `dispose`.
    disposed: bool,
}

impl Inner {
    fn cancel_timer(&mut self) {
        self.timer_seq += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
            tracing::trace!("debounce timer cancelled");
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }

    /// Returns `false` if already disposed.
    fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        self.cancel_timer();
        self.tokens.invalidate();
        self.abort_in_flight();
        true
    }
}

struct Shared<T> {
    inner: Mutex<Inner>,
    state: watch::Sender<ResultState<T>>,
    fetch: Box<dyn Fetch<T>>,
    config: ControllerConfig,
}

/// Debounced, cancellable, stale-response-safe search controller.
///
/// One controller backs one search surface. Observers read the published
/// [`ResultState`] through [`state`](Self::state) or
/// [`subscribe`](Self::subscribe); only the controller writes it.
pub struct QueryController<T> {
    shared: Arc<Shared<T>>,
}

impl<T> std::fmt::Debug for QueryController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryController")
            .field("config", &self.shared.config)
            .field("inner", &*self.shared.inner.lock())
            .finish_non_exhaustive()
    }
}

impl<T> QueryController<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a controller in the [`ResultState::Idle`] state.
    pub fn new(fetch: impl Fetch<T>, config: ControllerConfig) -> Self {
        let (state, _) = watch::channel(ResultState::Idle);
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                state,
                fetch: Box::new(fetch),
                config,
            }),
        }
    }

    /// Record `query` and restart the quiescence timer.
    ///
    /// The fetch happens only if no further input arrives within the
    /// debounce window.
    pub fn submit_query(&self, query: impl Into<String>) {
        let query = query.into();
        let mut inner = self.shared.inner.lock();
        if inner.disposed {
            tracing::warn!(query = %query, "query submitted to a disposed controller");
            return;
        }

        inner.query.clone_from(&query);
        inner.cancel_timer();

        let seq = inner.timer_seq;
        let delay = self.shared.config.debounce;
        let shared = Arc::clone(&self.shared);
        inner.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            shared.on_timer(seq, query);
        }));
        tracing::trace!(seq, ?delay, "debounce timer started");
    }

    /// Dispatch `query` immediately, skipping the debounce window.
    ///
    /// Any pending debounce timer is cancelled, and a request already in
    /// flight is superseded.
    pub fn search_now(&self, query: impl Into<String>) {
        let query = query.into();
        let mut inner = self.shared.inner.lock();
        if inner.disposed {
            tracing::warn!(query = %query, "query submitted to a disposed controller");
            return;
        }

        inner.query.clone_from(&query);
        inner.cancel_timer();
        self.shared.dispatch(inner, query);
    }

    /// Cancel the pending timer and stale every outstanding request.
    ///
    /// No state change happens after this returns. Calling it again is a
    /// no-op; dropping the controller calls it too.
    pub fn dispose(&self) {
        if self.shared.inner.lock().dispose() {
            tracing::debug!("controller disposed");
        }
    }

    /// Check whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.shared.inner.lock().disposed
    }

    /// Check whether a debounce timer is waiting to fire.
    pub fn is_debouncing(&self) -> bool {
        self.shared.inner.lock().timer.is_some()
    }

    /// The latest query as typed.
    pub fn query(&self) -> String {
        self.shared.inner.lock().query.clone()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ResultState<T> {
        self.shared.state.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ResultState<T>> {
        self.shared.state.subscribe()
    }

    /// The configuration this controller was built with.
    pub fn config(&self) -> ControllerConfig {
        self.shared.config
    }
}

impl<T> Shared<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn on_timer(self: &Arc<Self>, seq: u64, query: String) {
        let mut inner = self.inner.lock();
        // A restart may have raced with this timer's wake-up.
        if inner.disposed || inner.timer_seq != seq {
            return;
        }
        inner.timer = None;
        self.dispatch(inner, query);
    }

    /// Dispatch `query`, consuming the caller's lock.
    ///
    /// The lock is released around the fetch call, and the request is only
    /// spawned if nothing superseded it meanwhile.
    fn dispatch(self: &Arc<Self>, mut inner: MutexGuard<'_, Inner>, query: String) {
        if self.config.abort_superseded {
            inner.abort_in_flight();
        }

        if query.trim().is_empty() {
            inner.tokens.invalidate();
            inner.in_flight = None;
            tracing::debug!("blank query, resetting to idle");
            self.publish(ResultState::Idle);
            return;
        }

        let token = inner.tokens.mint();
        tracing::debug!(%token, query = %query, "dispatching request");
        self.publish(ResultState::Pending {
            query: query.clone(),
        });

        drop(inner);
        let request = self.fetch.fetch(query.clone());

        let mut inner = self.inner.lock();
        if inner.disposed || !inner.tokens.is_latest(token) {
            tracing::debug!(%token, query = %query, "request superseded before it started");
            return;
        }
        let shared = Arc::clone(self);
        inner.in_flight = Some(tokio::spawn(async move {
            let outcome = request.await;
            shared.complete(token, query, outcome);
        }));
    }

    fn complete(&self, token: RequestToken, query: String, outcome: Result<T, FetchError>) {
        let mut inner = self.inner.lock();
        if inner.disposed || !inner.tokens.is_latest(token) {
            tracing::debug!(
                %token,
                latest = ?inner.tokens.latest(),
                query = %query,
                "discarding stale response"
            );
            return;
        }
        inner.in_flight = None;

        let next = match outcome {
            Ok(data) => {
                tracing::debug!(%token, query = %query, "request succeeded");
                ResultState::Success { query, data }
            }
            Err(reason) => {
                tracing::debug!(%token, query = %query, error = %reason, "request failed");
                ResultState::Failure { query, reason }
            }
        };
        self.publish(next);
    }

    fn publish(&self, state: ResultState<T>) {
        self.state.send_replace(state);
    }
}

impl<T> Drop for QueryController<T> {
    fn drop(&mut self) {
        self.shared.inner.lock().dispose();
    }
}
