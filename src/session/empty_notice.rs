//! Edge-triggered "no results" notification.
//!
//! The notice is armed once per *activation*: every search submission and
//! every page change that makes a key current. It fires at most once per
//! activation, and only when the current key's outcome is a settled, empty
//! page. Re-observing the same settled state (a re-render, a cursor move) does
//! not fire again; resubmitting the same query does.

use crate::notify::Notify;

/// Message shown when a search settles with zero movies.
pub const EMPTY_RESULT_MESSAGE: &str = "No movies found for your request";

#[derive(Debug, Clone, Default)]
pub struct EmptyResultNotice {
    activation: u64,
    fired_for: Option<u64>,
}

impl EmptyResultNotice {
    /// Starts a new activation; the next settled-empty observation fires.
    pub fn arm(&mut self) {
        self.activation += 1;
    }

    /// Fires through `notifier` if the current key is settled-empty and this
    /// activation has not fired yet. Returns whether it fired.
    pub fn observe(&mut self, settled_empty: bool, notifier: &mut impl Notify) -> bool {
        if !settled_empty || self.fired_for == Some(self.activation) {
            return false;
        }

        tracing::debug!(activation = self.activation, "empty result notification fired");
        notifier.notify(EMPTY_RESULT_MESSAGE);
        self.fired_for = Some(self.activation);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Notify for Recorder {
        fn notify(&mut self, message: &str) {
            self.0.push(message.to_string());
        }
    }

    #[test]
    fn fires_once_per_activation() {
        let mut notice = EmptyResultNotice::default();
        let mut sink = Recorder::default();

        notice.arm();
        assert!(notice.observe(true, &mut sink));
        assert!(!notice.observe(true, &mut sink));
        assert_eq!(sink.0, vec![EMPTY_RESULT_MESSAGE.to_string()]);

        notice.arm();
        assert!(notice.observe(true, &mut sink));
        assert_eq!(sink.0.len(), 2);
    }

    #[test]
    fn non_empty_observations_do_not_consume_the_activation() {
        let mut notice = EmptyResultNotice::default();
        let mut sink = Recorder::default();

        notice.arm();
        assert!(!notice.observe(false, &mut sink));
        assert!(notice.observe(true, &mut sink));
    }
}
