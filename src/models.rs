use serde::{Deserialize, Serialize};

/// Lifecycle stage of a task. Wire form: "todo", "inProgress", "completed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Todo,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "inProgress",
            Status::Completed => "completed",
        }
    }

    /// Uppercase label for counters and headers
    pub fn label(&self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::InProgress => "IN PROGRESS",
            Status::Completed => "COMPLETED",
        }
    }
}

/// Task priority. Wire form: "low", "normal", "high".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Normal, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

/// A task as stored remotely. The id is server-assigned and immutable;
/// the date is carried as the ISO-ish wire string and only parsed for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub status: Status,
    pub priority: Priority,
}

/// Creation request: a full task minus the id (the server assigns one).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub date: String,
    pub status: Status,
    pub priority: Priority,
}

/// Partial update request. Only the status is ever changed post-creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub id: String,
    pub status: Status,
}

/// Draft task held by the create form until submission. One value object
/// with field-level setters instead of scattered per-field variables, so a
/// partially-initialized request can't be submitted by accident.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub status: Status,
    pub priority: Priority,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            status: Status::Todo,
            priority: Priority::Normal,
        }
    }
}

impl TaskDraft {
    /// Title, description and date must all be present before submission.
    /// The mutation controller itself does not validate; this is the
    /// caller-side precondition.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.description.trim().is_empty()
            && !self.date.trim().is_empty()
    }

    pub fn into_request(self) -> NewTask {
        NewTask {
            title: self.title,
            description: self.description,
            date: self.date,
            status: self.status,
            priority: self.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_wire_strings() {
        assert_eq!(serde_json::to_string(&Status::Todo).unwrap(), "\"todo\"");
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!(
            serde_json::to_string(&Status::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn priority_wire_strings() {
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"low\"");
        assert_eq!(
            serde_json::to_string(&Priority::Normal).unwrap(),
            "\"normal\""
        );
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn task_round_trips_server_shape() {
        let json = r#"{
            "id": "1",
            "title": "A",
            "description": "B",
            "date": "2026-08-25",
            "status": "inProgress",
            "priority": "high"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "1");
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn new_task_has_no_id_field() {
        let req = NewTask {
            title: "A".into(),
            description: "B".into(),
            date: "2026-08-25".into(),
            status: Status::Todo,
            priority: Priority::Normal,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert!(value.get("id").is_none());
    }

    #[test]
    fn status_patch_is_partial() {
        let patch = StatusPatch {
            id: "1".into(),
            status: Status::Completed,
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"id":"1","status":"completed"}"#
        );
    }

    #[test]
    fn incomplete_draft_is_rejected() {
        let mut draft = TaskDraft::default();
        assert!(!draft.is_complete());
        draft.title = "Write report".into();
        assert!(!draft.is_complete());
        draft.description = "Quarterly numbers".into();
        assert!(draft.is_complete());
        draft.date.clear();
        assert!(!draft.is_complete());
    }
}
