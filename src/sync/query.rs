use crate::api::ApiError;
use crate::models::{Status, Task};
use crate::sync::channel::RefreshSignal;

/// Lifecycle of an in-flight async operation. Attached independently to the
/// query and to each mutation; reset implicitly when a new operation of the
/// same kind starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Success,
    Error,
}

/// Owns the authoritative in-memory task collection and its fetch lifecycle.
///
/// The controller is a plain state machine: the driver (event loop or test)
/// calls `observe` each tick, spawns a gateway fetch whenever `begin`
/// returns true, and feeds the outcome back through `finish`. Nothing else
/// ever writes the collection, and it is only ever replaced wholesale - a
/// mutation's response is never patched in.
#[derive(Debug)]
pub struct TaskQuery {
    phase: Phase,
    tasks: Option<Vec<Task>>,
    error: Option<String>,
    /// Signal value at the last observation
    seen: bool,
    /// A fetch has been requested but not yet started. Multiple requests
    /// collapse into one pending fetch.
    fetch_requested: bool,
}

impl TaskQuery {
    /// A new controller immediately wants its first fetch (load on mount).
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            tasks: None,
            error: None,
            seen: false,
            fetch_requested: true,
        }
    }

    /// Request a refetch whenever the change signal flipped since the last
    /// observation. Every flip means "refetch everything" - there is no
    /// delta to apply.
    pub fn observe(&mut self, signal: &RefreshSignal) {
        if signal.updated() != self.seen {
            self.seen = signal.updated();
            self.fetch_requested = true;
        }
    }

    /// Manual re-trigger. Idempotent: calling this while a fetch is already
    /// pending does not start a second concurrent fetch.
    pub fn refetch(&mut self) {
        self.fetch_requested = true;
    }

    /// Transition to pending if a fetch is due and none is in flight.
    /// Returns true exactly when the caller should start a gateway call.
    pub fn begin(&mut self) -> bool {
        if !self.fetch_requested || self.phase == Phase::Pending {
            return false;
        }
        self.fetch_requested = false;
        self.phase = Phase::Pending;
        true
    }

    /// Apply a fetch outcome. Success replaces the collection atomically;
    /// failure keeps the last-good collection (if any) next to the error.
    pub fn finish(&mut self, result: Result<Vec<Task>, ApiError>) {
        match result {
            Ok(tasks) => {
                self.tasks = Some(tasks);
                self.error = None;
                self.phase = Phase::Success;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.phase = Phase::Error;
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.phase == Phase::Pending
    }

    pub fn is_error(&self) -> bool {
        self.phase == Phase::Error
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current collection, in server response order. None until the
    /// first successful fetch.
    pub fn tasks(&self) -> Option<&[Task]> {
        self.tasks.as_deref()
    }

    /// Count tasks with the given status. None means "never loaded",
    /// distinct from Some(0) meaning "loaded, zero matched".
    pub fn count_by_status(&self, status: Status) -> Option<usize> {
        self.tasks
            .as_ref()
            .map(|tasks| tasks.iter().filter(|t| t.status == status).count())
    }

    /// Presentation policy: only todo and in-progress tasks appear in the
    /// active list. Completed tasks stay counted but are not rendered.
    pub fn active_tasks(&self) -> Vec<&Task> {
        self.tasks
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .filter(|t| matches!(t.status, Status::Todo | Status::InProgress))
            .collect()
    }
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use pretty_assertions::assert_eq;

    fn task(id: &str, status: Status) -> Task {
        Task {
            id: id.into(),
            title: format!("task {id}"),
            description: String::new(),
            date: "2026-08-25".into(),
            status,
            priority: Priority::Normal,
        }
    }

    fn fetch_error() -> ApiError {
        ApiError::Remote {
            status: 500,
            message: "store unavailable".into(),
        }
    }

    #[test]
    fn fetches_once_on_mount() {
        let mut query = TaskQuery::new();
        assert!(query.begin());
        assert!(query.is_pending());
        // still pending, no second fetch
        assert!(!query.begin());
        query.finish(Ok(vec![]));
        assert!(!query.begin());
    }

    #[test]
    fn three_rapid_toggles_cause_one_refetch() {
        let mut query = TaskQuery::new();
        assert!(query.begin());
        query.finish(Ok(vec![]));

        let mut signal = RefreshSignal::new();
        signal.toggle();
        signal.toggle();
        signal.toggle();

        query.observe(&signal);
        query.observe(&signal);
        query.observe(&signal);
        assert!(query.begin());
        // exactly one pending→success cycle for the burst
        assert!(!query.begin());
        query.finish(Ok(vec![]));
        query.observe(&signal);
        assert!(!query.begin());
    }

    #[test]
    fn refetch_while_pending_is_collapsed() {
        let mut query = TaskQuery::new();
        assert!(query.begin());
        query.refetch();
        query.refetch();
        assert!(!query.begin());
        query.finish(Ok(vec![]));
        // the queued request survives the pending window, but only as one
        assert!(query.begin());
        query.finish(Ok(vec![]));
        assert!(!query.begin());
    }

    #[test]
    fn counts_distinguish_unloaded_from_empty() {
        let mut query = TaskQuery::new();
        for status in Status::ALL {
            assert_eq!(query.count_by_status(status), None);
        }
        query.begin();
        query.finish(Ok(vec![]));
        for status in Status::ALL {
            assert_eq!(query.count_by_status(status), Some(0));
        }
    }

    #[test]
    fn counts_and_active_list_follow_status() {
        let mut query = TaskQuery::new();
        query.begin();
        query.finish(Ok(vec![task("1", Status::Todo), task("2", Status::Completed)]));

        assert_eq!(query.count_by_status(Status::Todo), Some(1));
        assert_eq!(query.count_by_status(Status::InProgress), Some(0));
        assert_eq!(query.count_by_status(Status::Completed), Some(1));

        let active: Vec<&str> = query.active_tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(active, vec!["1"]);
    }

    #[test]
    fn collection_is_replaced_wholesale_in_server_order() {
        let mut query = TaskQuery::new();
        query.begin();
        query.finish(Ok(vec![task("3", Status::Todo), task("1", Status::Todo)]));
        let ids: Vec<&str> = query.tasks().unwrap().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);

        query.refetch();
        query.begin();
        query.finish(Ok(vec![task("2", Status::Todo)]));
        let ids: Vec<&str> = query.tasks().unwrap().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn failed_fetch_keeps_last_good_data() {
        let mut query = TaskQuery::new();
        query.begin();
        query.finish(Err(fetch_error()));
        assert!(query.is_error());
        assert!(query.tasks().is_none());

        query.refetch();
        query.begin();
        query.finish(Ok(vec![task("1", Status::Todo)]));
        assert!(!query.is_error());

        query.refetch();
        query.begin();
        query.finish(Err(fetch_error()));
        assert!(query.is_error());
        // last-good collection survives the failure
        assert_eq!(query.tasks().unwrap().len(), 1);

        // a later successful manual refetch clears the error and replaces data
        query.refetch();
        query.begin();
        query.finish(Ok(vec![]));
        assert!(!query.is_error());
        assert_eq!(query.tasks().unwrap().len(), 0);
    }

    #[test]
    fn observe_tracks_the_latest_flag_value() {
        let mut query = TaskQuery::new();
        query.begin();
        query.finish(Ok(vec![]));

        let mut signal = RefreshSignal::new();
        signal.toggle();
        query.observe(&signal);
        assert!(query.begin());
        query.finish(Ok(vec![]));

        // no further flips, no further fetches
        query.observe(&signal);
        assert!(!query.begin());
    }
}
