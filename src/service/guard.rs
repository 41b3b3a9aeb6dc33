use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::service::notify::{Notification, NotificationSink};

/// Default minimum time the loading flag stays visible, in milliseconds.
pub const DEFAULT_MIN_VISIBLE_MS: u64 = 1500;

struct GuardState {
    // Re-entrancy lock. Held only while the wrapped action itself runs,
    // released the moment it settles.
    busy: bool,
    // Visible loading flag. Outlives `busy` until the minimum window elapses.
    loading: bool,
    pending: Option<Notification>,
}

/// One-flight action guard for a single UI surface.
///
/// `run` executes at most one asynchronous action at a time: a second call
/// while the first action is still in flight is dropped, not queued. The
/// loading flag stays up for at least the configured minimum duration, and
/// any notification queued by the action is flushed only when the flag goes
/// down, so the user never sees a result pop up under a live loader.
pub struct FlightGuard {
    min_visible: Duration,
    sink: Arc<dyn NotificationSink>,
    state: Arc<Mutex<GuardState>>,
    flush: Mutex<Option<JoinHandle<()>>>,
}

impl FlightGuard {
    pub fn new(min_visible: Duration, sink: Arc<dyn NotificationSink>) -> FlightGuard {
        FlightGuard {
            min_visible,
            sink,
            state: Arc::new(Mutex::new(GuardState {
                busy: false,
                loading: false,
                pending: None,
            })),
            flush: Mutex::new(None),
        }
    }

    pub fn with_default_window(sink: Arc<dyn NotificationSink>) -> FlightGuard {
        FlightGuard::new(Duration::from_millis(DEFAULT_MIN_VISIBLE_MS), sink)
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// Queue a success notification for this run, replacing anything queued
    /// earlier. It is shown once the loader is hidden.
    pub fn notify_success(&self, title: &str, detail: &str) {
        self.state.lock().unwrap().pending = Some(Notification::success(title, detail));
    }

    /// Queue an error notification for this run, replacing anything queued
    /// earlier.
    pub fn notify_error(&self, title: &str, detail: &str) {
        self.state.lock().unwrap().pending = Some(Notification::error(title, detail));
    }

    /// Run `action` unless another one is still in flight on this guard.
    ///
    /// Returns `Ok(None)` when the call was dropped because the guard was
    /// busy. Errors from the action are returned to the caller after the
    /// loader/notification lifecycle has been scheduled; if the action queued
    /// no notification of its own, a generic error alert is queued so a
    /// failure is never silent. Starting a new run discards any notification
    /// still queued by a previous one: only the latest run's result is shown.
    pub async fn run<T, E, F, Fut>(&self, action: F) -> Result<Option<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        {
            let mut state = self.state.lock().unwrap();
            if state.busy {
                tracing::debug!("action dropped: another one is still in flight");
                return Ok(None);
            }
            state.busy = true;
            state.loading = true;
            state.pending = None;
        }
        // A cooldown timer from the previous run must not fire mid-flight; it
        // would hide the loader and flush this run's notification early.
        if let Some(stale) = self.flush.lock().unwrap().take() {
            stale.abort();
        }
        let started = Instant::now();

        let outcome = action().await;

        {
            let mut state = self.state.lock().unwrap();
            state.busy = false;
            if let Err(err) = &outcome {
                tracing::warn!(%err, "guarded action failed");
                if state.pending.is_none() {
                    state.pending = Some(Notification::error("Error", &err.to_string()));
                }
            }
        }
        self.schedule_flush(started);

        outcome.map(Some)
    }

    /// Cancel a pending deferred hide/flush. Call when the owning surface is
    /// torn down; a timer firing afterwards must not touch its state.
    pub fn teardown(&self) {
        if let Some(handle) = self.flush.lock().unwrap().take() {
            handle.abort();
        }
    }

    // The deadline is anchored to the run's start, not to when the timer
    // task first gets polled, so the window is exact.
    fn schedule_flush(&self, started: Instant) {
        let deadline = started + self.min_visible;
        if Instant::now() >= deadline {
            // The action outlasted the minimum window; hide immediately.
            Self::hide_and_flush(&self.state, &self.sink);
            return;
        }
        let state = Arc::clone(&self.state);
        let sink = Arc::clone(&self.sink);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            Self::hide_and_flush(&state, &sink);
        });
        // Any previous timer was cancelled when this run started.
        *self.flush.lock().unwrap() = Some(handle);
    }

    // Hiding the loader and surfacing the notification are one step: the
    // pending alert is taken under the same lock that clears the flag.
    fn hide_and_flush(state: &Mutex<GuardState>, sink: &Arc<dyn NotificationSink>) {
        let shown = {
            let mut state = state.lock().unwrap();
            state.loading = false;
            state.pending.take()
        };
        if let Some(notification) = shown {
            sink.show(&notification);
        }
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.teardown();
    }
}
