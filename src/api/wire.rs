use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request header that selects the server dialect for a single call.
pub const API_VERSION_HEADER: &str = "API-Version";

/// Server API dialect
///
/// `V1` is the original array-shaped API; `V2` wraps responses in an
/// envelope object and decorates tasks with metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ApiVersion {
    #[default]
    #[serde(rename = "v1")]
    V1,
    #[serde(rename = "v2")]
    V2,
}

impl ApiVersion {
    /// Literal value carried in the `API-Version` header
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    /// Human-readable name for the header bar
    pub fn label(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1 (Basic)",
            ApiVersion::V2 => "v2 (Enhanced)",
        }
    }

    /// The other dialect, for the toggle key
    pub fn toggled(&self) -> Self {
        match self {
            ApiVersion::V1 => ApiVersion::V2,
            ApiVersion::V2 => ApiVersion::V1,
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status, only populated by the v2 API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
    Done,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "Open"),
            TaskStatus::Done => write!(f, "Done"),
        }
    }
}

/// One task as it appears on the wire
///
/// `description` is the only field the v1 API knows about and doubles as the
/// deletion key under both dialects. The metadata fields are nullable and
/// only ever filled in by v2 responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Task {
    #[cfg(test)]
    pub fn with_description(description: &str) -> Self {
        Self {
            description: description.to_string(),
            id: None,
            status: None,
            created_at: None,
        }
    }
}

/// Body for the add and delete endpoints, identical for both dialects
#[derive(Debug, Serialize)]
pub struct TaskRequest<'a> {
    pub description: &'a str,
}

/// Decode a list response body into tasks for the given dialect.
///
/// This is the only place the dialect distinction touches response shapes:
/// v1 bodies are a bare array, v2 bodies carry the array in a `tasks` field.
/// A body that does not match the expected shape decodes to an empty list
/// rather than an error, so a misbehaving server degrades to "no tasks".
pub fn decode_tasks(version: ApiVersion, body: Value) -> Vec<Task> {
    let tasks = match version {
        ApiVersion::V1 => body,
        ApiVersion::V2 => match body.get("tasks") {
            Some(field) => field.clone(),
            None => return Vec::new(),
        },
    };

    match serde_json::from_value::<Vec<Task>>(tasks) {
        Ok(tasks) => tasks,
        Err(e) => {
            tracing::warn!("list response was not an array of tasks: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_header_values() {
        assert_eq!(ApiVersion::V1.as_str(), "v1");
        assert_eq!(ApiVersion::V2.as_str(), "v2");
        assert_eq!(ApiVersion::default(), ApiVersion::V1);
    }

    #[test]
    fn test_version_toggle_roundtrip() {
        assert_eq!(ApiVersion::V1.toggled(), ApiVersion::V2);
        assert_eq!(ApiVersion::V2.toggled(), ApiVersion::V1);
        assert_eq!(ApiVersion::V1.toggled().toggled(), ApiVersion::V1);
    }

    #[test]
    fn test_version_serde_uses_wire_literals() {
        assert_eq!(serde_json::to_string(&ApiVersion::V2).unwrap(), "\"v2\"");
        let parsed: ApiVersion = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(parsed, ApiVersion::V1);
    }

    #[test]
    fn test_task_minimal_v1_shape() {
        let task: Task = serde_json::from_value(json!({"description": "Buy milk"})).unwrap();
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.id, None);
        assert_eq!(task.status, None);
        assert_eq!(task.created_at, None);
    }

    #[test]
    fn test_task_enhanced_v2_shape() {
        let task: Task = serde_json::from_value(json!({
            "description": "Walk the dog",
            "id": 7,
            "status": "open",
            "createdAt": "2024-05-01T09:30:00"
        }))
        .unwrap();
        assert_eq!(task.id, Some(7));
        assert_eq!(task.status, Some(TaskStatus::Open));
        assert_eq!(task.created_at.as_deref(), Some("2024-05-01T09:30:00"));
    }

    #[test]
    fn test_decode_v1_array() {
        let body = json!([
            {"description": "Buy groceries"},
            {"description": "Walk the dog"},
            {"description": "Buy milk"}
        ]);
        let tasks = decode_tasks(ApiVersion::V1, body);
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].description, "Buy groceries");
        assert_eq!(tasks[2].description, "Buy milk");
    }

    #[test]
    fn test_decode_v1_non_array_is_empty() {
        assert!(decode_tasks(ApiVersion::V1, json!({"tasks": []})).is_empty());
        assert!(decode_tasks(ApiVersion::V1, json!("nope")).is_empty());
        assert!(decode_tasks(ApiVersion::V1, json!(null)).is_empty());
    }

    #[test]
    fn test_decode_v2_envelope() {
        let body = json!({
            "version": "v2",
            "count": 2,
            "tasks": [
                {"description": "First", "id": 1, "status": "open"},
                {"description": "Second", "id": 2, "status": "done"}
            ]
        });
        let tasks = decode_tasks(ApiVersion::V2, body);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].status, Some(TaskStatus::Done));
    }

    #[test]
    fn test_decode_v2_missing_field_is_empty() {
        assert!(decode_tasks(ApiVersion::V2, json!({})).is_empty());
    }

    #[test]
    fn test_decode_v2_non_array_field_is_empty() {
        assert!(decode_tasks(ApiVersion::V2, json!({"tasks": "oops"})).is_empty());
    }

    #[test]
    fn test_task_request_body() {
        let body = serde_json::to_value(TaskRequest {
            description: "Buy milk",
        })
        .unwrap();
        assert_eq!(body, json!({"description": "Buy milk"}));
    }
}
