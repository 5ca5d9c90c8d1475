//! Periodic auto-refresh with a visible countdown.
//!
//! Runs an action immediately and then once per period. A manual refresh
//! runs the action at once and restarts the period, so the next automatic
//! refresh is a full period away.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;

type Action = Arc<dyn Fn() + Send + Sync>;

/// Shortest period a refresh loop will run with.
pub const MIN_PERIOD: Duration = Duration::from_millis(100);

/// Handle to a running refresh loop. Dropping it stops the loop.
pub struct AutoRefresh {
    period: Duration,
    next_at: Arc<Mutex<Instant>>,
    reset: Arc<Notify>,
    action: Action,
    task: JoinHandle<()>,
}

impl std::fmt::Debug for AutoRefresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoRefresh")
            .field("period", &self.period)
            .field("next_at", &*self.next_at.lock())
            .finish_non_exhaustive()
    }
}

impl AutoRefresh {
    /// Run `action` now and then every `period`.
    ///
    /// Periods shorter than [`MIN_PERIOD`] are raised to it. Must be called
    /// from within a Tokio runtime.
    pub fn start(period: Duration, action: impl Fn() + Send + Sync + 'static) -> Self {
        if period < MIN_PERIOD {
            tracing::warn!(?period, min = ?MIN_PERIOD, "refresh period too short, clamping");
        }
        let period = period.max(MIN_PERIOD);
        let action: Action = Arc::new(action);
        let next_at = Arc::new(Mutex::new(Instant::now() + period));
        let reset = Arc::new(Notify::new());

        action();

        let task = tokio::spawn({
            let action = Arc::clone(&action);
            let next_at = Arc::clone(&next_at);
            let reset = Arc::clone(&reset);
            async move {
                loop {
                    let deadline = *next_at.lock();
                    tokio::select! {
                        () = tokio::time::sleep_until(deadline) => {
                            tracing::trace!("auto-refresh tick");
                            *next_at.lock() = Instant::now() + period;
                            action();
                        }
                        () = reset.notified() => {}
                    }
                }
            }
        });

        Self {
            period,
            next_at,
            reset,
            action,
            task,
        }
    }

    /// Run the action now and restart the period.
    pub fn refresh_now(&self) {
        *self.next_at.lock() = Instant::now() + self.period;
        self.reset.notify_one();
        (self.action)();
    }

    /// Time left until the next automatic refresh.
    pub fn remaining(&self) -> Duration {
        self.next_at
            .lock()
            .saturating_duration_since(Instant::now())
    }

    /// Whole seconds left until the next automatic refresh, rounded up.
    pub fn countdown_secs(&self) -> u64 {
        let remaining = self.remaining();
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    /// The refresh period.
    pub const fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.task.abort();
    }
}
