use std::time::{Duration, Instant};

use crate::api::ApiError;
use crate::sync::channel::RefreshSignal;
use crate::sync::query::Phase;

/// Lifecycle of a single in-flight mutation (create or status update).
///
/// The controller never touches the task collection: on success it only
/// toggles the change signal and discards the server's response - the
/// refreshed list is the one state update that gets applied. On failure it
/// records the error and leaves retrying to the caller, so form input is
/// never lost.
#[derive(Debug)]
pub struct TaskMutation {
    phase: Phase,
    error: Option<String>,
}

impl TaskMutation {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            error: None,
        }
    }

    /// A new mutation was dispatched; any previous outcome is reset.
    pub fn begin(&mut self) {
        self.phase = Phase::Pending;
        self.error = None;
    }

    /// Apply the gateway outcome. Success toggles the signal exactly once.
    pub fn finish(&mut self, result: Result<(), ApiError>, signal: &mut RefreshSignal) {
        match result {
            Ok(()) => {
                self.phase = Phase::Success;
                signal.toggle();
            }
            Err(e) => {
                self.phase = Phase::Error;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    pub fn is_success(&self) -> bool {
        self.phase == Phase::Success
    }

    pub fn is_error(&self) -> bool {
        self.phase == Phase::Error
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Default for TaskMutation {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient "task created" indicator: visible for a fixed window after each
/// successful creation, re-arming (not stacking) when a new success lands
/// before the previous window expires. Held as a deadline instead of a
/// spawned timer, so dropping the owning state cancels it outright.
#[derive(Debug, Default)]
pub struct SuccessBanner {
    visible_until: Option<Instant>,
}

impl SuccessBanner {
    /// How long the banner stays visible after a success
    pub const VISIBLE_FOR: Duration = Duration::from_secs(7);

    pub fn new() -> Self {
        Self::default()
    }

    /// Show the banner, replacing any earlier expiry deadline.
    pub fn show(&mut self, now: Instant) {
        self.visible_until = Some(now + Self::VISIBLE_FOR);
    }

    pub fn visible(&self, now: Instant) -> bool {
        matches!(self.visible_until, Some(deadline) if now < deadline)
    }

    /// Drop the deadline without waiting for it (scope exit).
    pub fn dismiss(&mut self) {
        self.visible_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_error() -> ApiError {
        ApiError::Remote {
            status: 422,
            message: "bad request".into(),
        }
    }

    #[test]
    fn success_toggles_signal_exactly_once() {
        let mut mutation = TaskMutation::new();
        let mut signal = RefreshSignal::new();

        mutation.begin();
        assert!(mutation.is_pending());
        mutation.finish(Ok(()), &mut signal);

        assert!(mutation.is_success());
        assert!(signal.updated());
    }

    #[test]
    fn failure_records_error_and_leaves_signal_alone() {
        let mut mutation = TaskMutation::new();
        let mut signal = RefreshSignal::new();

        mutation.begin();
        mutation.finish(Err(remote_error()), &mut signal);

        assert!(mutation.is_error());
        assert!(mutation.error().unwrap().contains("422"));
        assert!(!signal.updated());
    }

    #[test]
    fn redispatch_resets_previous_outcome() {
        let mut mutation = TaskMutation::new();
        let mut signal = RefreshSignal::new();

        mutation.begin();
        mutation.finish(Err(remote_error()), &mut signal);
        assert!(mutation.is_error());

        // the caller re-invokes after surfacing the failure
        mutation.begin();
        assert!(mutation.is_pending());
        assert!(mutation.error().is_none());
        mutation.finish(Ok(()), &mut signal);
        assert!(mutation.is_success());
    }

    #[test]
    fn banner_hides_after_the_window_but_not_before() {
        let mut banner = SuccessBanner::new();
        let t0 = Instant::now();
        assert!(!banner.visible(t0));

        banner.show(t0);
        assert!(banner.visible(t0));
        assert!(banner.visible(t0 + Duration::from_secs(6)));
        assert!(!banner.visible(t0 + SuccessBanner::VISIBLE_FOR));
        assert!(!banner.visible(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn new_success_resets_the_window() {
        let mut banner = SuccessBanner::new();
        let t0 = Instant::now();

        banner.show(t0);
        let t1 = t0 + Duration::from_secs(5);
        banner.show(t1);

        // past the first deadline, still inside the second
        assert!(banner.visible(t0 + Duration::from_secs(8)));
        assert!(!banner.visible(t1 + SuccessBanner::VISIBLE_FOR));
    }

    #[test]
    fn dismiss_cancels_immediately() {
        let mut banner = SuccessBanner::new();
        let t0 = Instant::now();
        banner.show(t0);
        banner.dismiss();
        assert!(!banner.visible(t0));
    }
}
