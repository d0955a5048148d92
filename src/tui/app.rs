use std::time::{Duration, Instant};

use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::models::{Priority, Status, StatusPatch, Task, TaskDraft};
use crate::sync::{RefreshSignal, SuccessBanner, TaskMutation, TaskQuery};
use crate::tui::widgets::input::Input;
use crate::{Config, utils};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Create,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Date,
    Status,
    Priority,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Date,
            FormField::Date => FormField::Status,
            FormField::Status => FormField::Priority,
            FormField::Priority => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Priority,
            FormField::Description => FormField::Title,
            FormField::Date => FormField::Description,
            FormField::Status => FormField::Date,
            FormField::Priority => FormField::Status,
        }
    }
}

/// Creatable statuses offered by the form (completed is reached through the
/// list, never at creation time)
pub const FORM_STATUSES: [Status; 2] = [Status::Todo, Status::InProgress];

/// State backing the create-task form
#[derive(Debug, Clone)]
pub struct CreateForm {
    pub current_field: FormField,
    pub title: Input,
    pub description: Input,
    pub date: Input,
    pub status_index: usize,
    pub priority_index: usize,
}

impl CreateForm {
    pub fn new() -> Self {
        Self {
            current_field: FormField::Title,
            title: Input::new(),
            description: Input::new(),
            date: Input::with_value(utils::today_string()),
            status_index: 0,
            priority_index: 1, // normal
        }
    }

    pub fn status(&self) -> Status {
        FORM_STATUSES[self.status_index % FORM_STATUSES.len()]
    }

    pub fn priority(&self) -> Priority {
        Priority::ALL[self.priority_index % Priority::ALL.len()]
    }

    /// Assemble the draft for whole-object validation before submission
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.value().to_string(),
            description: self.description.value().to_string(),
            date: self.date.value().to_string(),
            status: self.status(),
            priority: self.priority(),
        }
    }

    pub fn current_input_mut(&mut self) -> Option<&mut Input> {
        match self.current_field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Date => Some(&mut self.date),
            FormField::Status | FormField::Priority => None,
        }
    }

    /// Cycle a select field (status / priority) by the given direction
    pub fn cycle_select(&mut self, forward: bool) {
        let step = |index: usize, len: usize| {
            if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            }
        };
        match self.current_field {
            FormField::Status => self.status_index = step(self.status_index, FORM_STATUSES.len()),
            FormField::Priority => {
                self.priority_index = step(self.priority_index, Priority::ALL.len());
            }
            _ => {}
        }
    }
}

impl Default for CreateForm {
    fn default() -> Self {
        Self::new()
    }
}

/// A gateway call finished; carried back into the UI loop over the channel
#[derive(Debug)]
pub enum NetEvent {
    TasksFetched(Result<Vec<Task>, ApiError>),
    TaskCreated(Result<(), ApiError>),
    StatusUpdated(Result<(), ApiError>),
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub selected_index: usize,
    pub list_state: ListState,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: Option<String>,
    pub message_time: Option<Instant>,
}

pub struct App {
    pub config: Config,
    client: ApiClient,
    runtime: tokio::runtime::Handle,
    net_tx: mpsc::UnboundedSender<NetEvent>,
    net_rx: mpsc::UnboundedReceiver<NetEvent>,

    // Data synchronization layer
    pub signal: RefreshSignal,
    pub query: TaskQuery,
    pub create: TaskMutation,
    pub update: TaskMutation,
    pub banner: SuccessBanner,

    // UI state
    pub mode: Mode,
    pub ui: UiState,
    pub form: Option<CreateForm>,
    pub status: StatusState,
    pub should_quit: bool,
}

impl App {
    /// How long transient status messages stay on screen
    const STATUS_MESSAGE_FOR: Duration = Duration::from_secs(5);

    pub fn new(config: Config, client: ApiClient, runtime: tokio::runtime::Handle) -> Self {
        let (net_tx, net_rx) = mpsc::unbounded_channel();
        Self {
            config,
            client,
            runtime,
            net_tx,
            net_rx,
            signal: RefreshSignal::new(),
            query: TaskQuery::new(),
            create: TaskMutation::new(),
            update: TaskMutation::new(),
            banner: SuccessBanner::new(),
            mode: Mode::View,
            ui: UiState::default(),
            form: None,
            status: StatusState::default(),
            should_quit: false,
        }
    }

    /// One synchronization step, run every loop iteration: apply finished
    /// gateway calls, let the query observe the change signal, and start a
    /// fetch if one is due.
    pub fn drive_sync(&mut self) {
        while let Ok(event) = self.net_rx.try_recv() {
            self.apply_net_event(event);
        }

        self.query.observe(&self.signal);
        if self.query.begin() {
            self.spawn_fetch();
        }
    }

    fn apply_net_event(&mut self, event: NetEvent) {
        match event {
            NetEvent::TasksFetched(result) => {
                self.query.finish(result);
                self.clamp_selection();
            }
            NetEvent::TaskCreated(result) => {
                self.create.finish(result, &mut self.signal);
                if self.create.is_success() {
                    // only touch form state that is still mounted; the
                    // refetch still happens either way
                    if self.form.is_some() {
                        self.banner.show(Instant::now());
                        // fresh form for the next task; on error the input stays
                        self.form = Some(CreateForm::new());
                    }
                } else if let Some(e) = self.create.error() {
                    self.set_status_message(format!("Failed to create task: {e}"));
                }
            }
            NetEvent::StatusUpdated(result) => {
                self.update.finish(result, &mut self.signal);
                if let Some(e) = self.update.error() {
                    self.set_status_message(format!("Failed to update task: {e}"));
                }
            }
        }
    }

    fn spawn_fetch(&self) {
        let client = self.client.clone();
        let tx = self.net_tx.clone();
        self.runtime.spawn(async move {
            // a completion after the UI is gone is silently dropped
            let _ = tx.send(NetEvent::TasksFetched(client.list_tasks().await));
        });
    }

    /// Submit the create form. The mutation controller submits whatever it
    /// is given; the presence check on the draft happens here, caller-side.
    pub fn submit_form(&mut self) {
        if self.create.is_pending() {
            return;
        }
        let Some(form) = &self.form else { return };
        let draft = form.to_draft();
        if !draft.is_complete() {
            self.set_status_message("Title, description and date are required".to_string());
            return;
        }
        if utils::parse_date(&draft.date).is_err() {
            self.set_status_message("Date must be YYYY-MM-DD".to_string());
            return;
        }

        debug!(title = %draft.title, "creating task");
        self.create.begin();
        let request = draft.into_request();
        let client = self.client.clone();
        let tx = self.net_tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(NetEvent::TaskCreated(client.create_task(&request).await));
        });
    }

    fn dispatch_status_update(&mut self, id: String, status: Status) {
        if self.update.is_pending() {
            return;
        }
        debug!(%id, status = status.as_str(), "updating task status");
        self.update.begin();
        let patch = StatusPatch { id, status };
        let client = self.client.clone();
        let tx = self.net_tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(NetEvent::StatusUpdated(client.update_status(&patch).await));
        });
    }

    /// Checkbox semantics on the selected task: checking a todo task moves
    /// it to in progress, unchecking an in-progress task moves it back.
    pub fn toggle_in_progress(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, next) = match task.status {
            Status::Todo => (task.id.clone(), Status::InProgress),
            Status::InProgress => (task.id.clone(), Status::Todo),
            Status::Completed => return, // not in the active list
        };
        self.dispatch_status_update(id, next);
    }

    /// Mark the selected task completed, whatever its current status
    pub fn mark_complete(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        self.dispatch_status_update(id, Status::Completed);
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.query.active_tasks().get(self.ui.selected_index).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.query.active_tasks().len();
        if len > 0 && self.ui.selected_index + 1 < len {
            self.ui.selected_index += 1;
        }
        self.sync_list_state();
    }

    pub fn select_prev(&mut self) {
        self.ui.selected_index = self.ui.selected_index.saturating_sub(1);
        self.sync_list_state();
    }

    /// Keep the selection valid after the collection was replaced
    fn clamp_selection(&mut self) {
        let len = self.query.active_tasks().len();
        if len == 0 {
            self.ui.selected_index = 0;
        } else if self.ui.selected_index >= len {
            self.ui.selected_index = len - 1;
        }
        self.sync_list_state();
    }

    fn sync_list_state(&mut self) {
        if self.query.active_tasks().is_empty() {
            self.ui.list_state.select(None);
        } else {
            self.ui.list_state.select(Some(self.ui.selected_index));
        }
    }

    pub fn open_form(&mut self) {
        self.form = Some(CreateForm::new());
        self.mode = Mode::Create;
    }

    /// Leave the form view. The banner's expiry belongs to the form, so its
    /// deadline goes with it.
    pub fn close_form(&mut self) {
        self.form = None;
        self.banner.dismiss();
        self.mode = Mode::View;
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status.message = Some(message);
        self.status.message_time = Some(Instant::now());
    }

    /// Auto-clear the status message once its window has passed
    pub fn check_status_message_timeout(&mut self) {
        if let Some(time) = self.status.message_time {
            if time.elapsed() >= Self::STATUS_MESSAGE_FOR {
                self.status.message = None;
                self.status.message_time = None;
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use pretty_assertions::assert_eq;

    fn test_app() -> (App, tokio::runtime::Runtime) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let app = App::new(
            Config::default(),
            ApiClient::new("http://localhost:3200"),
            runtime.handle().clone(),
        );
        (app, runtime)
    }

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

    #[test]
    fn fetch_success_flows_into_query_and_selection() {
        let (mut app, _rt) = test_app();
        assert!(app.query.begin());
        app.apply_net_event(NetEvent::TasksFetched(Ok(vec![
            task("1", Status::Todo),
            task("2", Status::Completed),
        ])));

        assert_eq!(app.query.count_by_status(Status::Todo), Some(1));
        assert_eq!(app.query.count_by_status(Status::Completed), Some(1));
        assert_eq!(app.selected_task().unwrap().id, "1");
    }

    #[test]
    fn creation_success_shows_banner_resets_form_and_queues_refetch() {
        let (mut app, _rt) = test_app();
        app.open_form();
        if let Some(form) = &mut app.form {
            form.title = Input::with_value("A");
        }

        app.create.begin();
        app.apply_net_event(NetEvent::TaskCreated(Ok(())));

        assert!(app.create.is_success());
        assert!(app.banner.visible(Instant::now()));
        assert!(app.signal.updated());
        // the form is blank again for the next task
        assert!(app.form.as_ref().unwrap().title.is_empty());

        // the query picks the toggle up on the next sync step
        app.query.observe(&app.signal);
        assert!(app.query.begin());
    }

    #[test]
    fn creation_failure_keeps_form_input() {
        let (mut app, _rt) = test_app();
        app.open_form();
        if let Some(form) = &mut app.form {
            form.title = Input::with_value("Keep me");
        }

        app.create.begin();
        app.apply_net_event(NetEvent::TaskCreated(Err(ApiError::Remote {
            status: 500,
            message: "boom".into(),
        })));

        assert!(app.create.is_error());
        assert!(!app.signal.updated());
        assert_eq!(app.form.as_ref().unwrap().title.value(), "Keep me");
        assert!(app.status.message.as_ref().unwrap().contains("500"));
    }

    #[test]
    fn checkbox_toggle_maps_todo_to_in_progress_and_back() {
        let (mut app, _rt) = test_app();
        app.query.begin();
        app.query.finish(Ok(vec![task("1", Status::Todo)]));
        app.toggle_in_progress();
        assert!(app.update.is_pending());

        // simulate the round trip: success toggles the signal, refetch sees
        // the new status, and unchecking maps back to todo
        app.apply_net_event(NetEvent::StatusUpdated(Ok(())));
        assert!(app.signal.updated());
        app.query.observe(&app.signal);
        assert!(app.query.begin());
        app.apply_net_event(NetEvent::TasksFetched(Ok(vec![task(
            "1",
            Status::InProgress,
        )])));
        assert_eq!(app.selected_task().unwrap().status, Status::InProgress);
    }

    #[test]
    fn completed_tasks_are_not_toggleable() {
        let (mut app, _rt) = test_app();
        app.query.begin();
        app.query.finish(Ok(vec![task("1", Status::Completed)]));
        app.toggle_in_progress();
        assert!(!app.update.is_pending());
    }

    #[test]
    fn selection_is_clamped_when_the_list_shrinks() {
        let (mut app, _rt) = test_app();
        app.query.begin();
        app.query.finish(Ok(vec![
            task("1", Status::Todo),
            task("2", Status::Todo),
            task("3", Status::Todo),
        ]));
        app.clamp_selection();
        app.select_next();
        app.select_next();
        assert_eq!(app.ui.selected_index, 2);

        app.apply_net_event(NetEvent::TasksFetched(Ok(vec![task("1", Status::Todo)])));
        assert_eq!(app.ui.selected_index, 0);
        assert_eq!(app.selected_task().unwrap().id, "1");
    }

    #[test]
    fn closing_the_form_dismisses_the_banner() {
        let (mut app, _rt) = test_app();
        app.open_form();
        app.banner.show(Instant::now());
        app.close_form();
        assert!(!app.banner.visible(Instant::now()));
        assert_eq!(app.mode, Mode::View);
    }

    #[test]
    fn incomplete_draft_is_not_submitted() {
        let (mut app, _rt) = test_app();
        app.open_form();
        app.submit_form();
        assert!(!app.create.is_pending());
        assert!(app.status.message.is_some());
    }

    #[test]
    fn form_select_fields_cycle() {
        let mut form = CreateForm::new();
        assert_eq!(form.status(), Status::Todo);
        form.current_field = FormField::Status;
        form.cycle_select(true);
        assert_eq!(form.status(), Status::InProgress);
        form.cycle_select(true);
        assert_eq!(form.status(), Status::Todo);

        form.current_field = FormField::Priority;
        assert_eq!(form.priority(), Priority::Normal);
        form.cycle_select(false);
        assert_eq!(form.priority(), Priority::Low);
    }
}
