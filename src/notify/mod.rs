//! Process-wide transient notifications ("toasts").
//!
//! The session controller never owns the toast surface; it only receives a
//! [`Notify`] capability. [`ToastHost`] is the single always-present sink: an
//! append-only queue whose display lifecycle is driven by host timers.
//!
//! Every pushed toast asks the runtime for exactly one expiry timer. Toasts
//! share one duration, so timers fire in push order and each timer expires the
//! oldest toast still queued.

use std::collections::VecDeque;

/// Number of toasts drawn at once. Older ones stay queued until they expire.
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// Capability to emit a one-shot user notification.
pub trait Notify {
    fn notify(&mut self, message: &str);
}

/// A single queued notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
}

/// Queue of transient notifications with timer-driven expiry.
#[derive(Debug, Clone)]
pub struct ToastHost {
    queue: VecDeque<Toast>,
    duration_secs: f64,
    timers_requested: usize,
}

impl ToastHost {
    #[must_use]
    pub const fn new(duration_secs: f64) -> Self {
        Self {
            queue: VecDeque::new(),
            duration_secs,
            timers_requested: 0,
        }
    }

    /// Seconds each toast stays on screen.
    #[must_use]
    pub const fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Drains the expiry timers requested since the last call.
    ///
    /// Returns one entry (in seconds) per toast pushed in the meantime.
    pub fn take_timer_requests(&mut self) -> Vec<f64> {
        let count = std::mem::take(&mut self.timers_requested);
        vec![self.duration_secs; count]
    }

    /// Expires the oldest toast. Returns `false` when the queue was empty.
    pub fn expire_oldest(&mut self) -> bool {
        let expired = self.queue.pop_front();
        if let Some(toast) = &expired {
            tracing::debug!(message = %toast.message, remaining = self.queue.len(), "toast expired");
        }
        expired.is_some()
    }

    /// Toasts to draw, newest last.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        let skip = self.queue.len().saturating_sub(MAX_VISIBLE_TOASTS);
        self.queue.iter().skip(skip)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for ToastHost {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl Notify for ToastHost {
    fn notify(&mut self, message: &str) {
        tracing::debug!(message = %message, queued = self.queue.len(), "toast queued");
        self.queue.push_back(Toast {
            message: message.to_string(),
        });
        self.timers_requested += 1;
    }
}
