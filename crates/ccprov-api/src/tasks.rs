// Asynchronous task references and status decoding
//
// Mutating intent calls answer with a task handle instead of a result.
// The controller reports task state in several overlapping encodings
// (an outer `status`, an embedded `bapiError`, a nested sync-response
// object, `isError` + `endTime` on older builds). `TaskStatus::classify`
// folds all of them into a single `TaskState`.

use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::AuthToken;
use crate::client::{CatalystClient, decode};
use crate::error::Error;

/// Path used when a submission returns an execution id without a URL.
pub const EXECUTION_STATUS_PATH: &str = "dnacaap/management/execution-status";

// ── Task reference ───────────────────────────────────────────────────

/// Handle returned by a mutating call.
///
/// Either field may be absent. An empty reference means the controller
/// completed the work synchronously and there is nothing to await.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRef {
    pub execution_id: Option<String>,
    pub status_url: Option<String>,
}

/// Wire shape: the current `executionId` / `executionStatusUrl` pair, or
/// the legacy `{ "response": { "taskId", "url" } }` envelope.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaskRef {
    #[serde(default)]
    execution_id: Option<String>,
    #[serde(default)]
    execution_status_url: Option<String>,
    #[serde(default)]
    response: Option<LegacyTaskRef>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyTaskRef {
    #[serde(default)]
    task_id: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl<'de> Deserialize<'de> for TaskRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTaskRef::deserialize(deserializer)?;
        let legacy = raw.response.unwrap_or(LegacyTaskRef {
            task_id: None,
            url: None,
        });
        Ok(Self {
            execution_id: non_empty(raw.execution_id).or_else(|| non_empty(legacy.task_id)),
            status_url: non_empty(raw.execution_status_url).or_else(|| non_empty(legacy.url)),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl TaskRef {
    pub fn new(execution_id: Option<String>, status_url: Option<String>) -> Self {
        Self {
            execution_id,
            status_url,
        }
    }

    /// Nothing to await.
    pub fn is_empty(&self) -> bool {
        self.execution_id.is_none() && self.status_url.is_none()
    }

    /// Short form of the id for log lines.
    pub fn short_id(&self) -> &str {
        self.execution_id
            .as_deref()
            .map_or("-", |id| id.get(..8).unwrap_or(id))
    }

    /// URL to poll: the controller-supplied status URL when it resolves,
    /// otherwise the execution-status endpoint for the id.
    pub fn poll_url(&self, client: &CatalystClient) -> Option<Url> {
        if let Some(url) = self.status_url.as_deref().and_then(|raw| client.resolve(raw).ok()) {
            return Some(url);
        }
        let id = self.execution_id.as_deref()?;
        client
            .intent_url(&format!("{EXECUTION_STATUS_PATH}/{id}"))
            .ok()
    }
}

// ── Task status ──────────────────────────────────────────────────────

/// Decoded body of an execution-status poll.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub bapi_error: Option<Value>,
    #[serde(default)]
    pub bapi_sync_response_json: Option<Value>,
    #[serde(default)]
    pub bapi_sync_response: Option<Value>,
    #[serde(default)]
    pub is_error: Option<Value>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub end_time: Option<Value>,
    #[serde(default)]
    pub end_time_epoch: Option<Value>,
    #[serde(default)]
    pub progress: Option<String>,
}

/// Terminal or intermediate state of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Running { status: Option<String> },
    Succeeded,
    Failed { message: String },
}

impl TaskStatus {
    /// Decode a poll body, unwrapping a legacy `{ "response": {...} }`
    /// envelope when present.
    pub fn from_body(body: &str) -> Result<Self, Error> {
        let value: Value = decode(body)?;
        let inner = match value {
            Value::Object(mut map) if map.get("response").is_some_and(Value::is_object) => {
                map.remove("response").unwrap_or(Value::Null)
            }
            other => other,
        };
        serde_json::from_value(inner).map_err(|e| Error::Deserialization {
            message: format!("task status: {e}"),
            body: body.to_owned(),
        })
    }

    /// Fold every encoding the controller uses into one state.
    ///
    /// Precedence: outer `SUCCESS` (still vetoed by an embedded error or a
    /// failed sync response), then sync-response failure, then explicit
    /// `FAILURE`/`FAILED`, then `isError`, then a set end time.
    pub fn classify(&self) -> TaskState {
        let status = self.status.as_deref().unwrap_or_default();
        let sync_failure = self.sync_failure();

        if status == "SUCCESS" {
            if let Some(err) = self.bapi_error.as_ref().filter(|v| is_truthy(v)) {
                return TaskState::Failed {
                    message: format!("task reported success with an error: {}", render(err)),
                };
            }
            if let Some(message) = sync_failure {
                return TaskState::Failed { message };
            }
            return TaskState::Succeeded;
        }

        if let Some(message) = sync_failure {
            return TaskState::Failed { message };
        }

        if matches!(status, "FAILURE" | "FAILED") {
            let message = self
                .bapi_error
                .as_ref()
                .filter(|v| is_truthy(v))
                .map_or_else(|| "Task failed".to_owned(), render);
            return TaskState::Failed { message };
        }

        if self.is_error.as_ref().is_some_and(is_truthy) {
            let message = self
                .failure_reason
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Unknown error".to_owned());
            return TaskState::Failed { message };
        }

        if self.end_time.as_ref().is_some_and(is_truthy)
            || self.end_time_epoch.as_ref().is_some_and(is_truthy)
        {
            return TaskState::Succeeded;
        }

        TaskState::Running {
            status: self.status.clone().or_else(|| self.progress.clone()),
        }
    }

    /// Message of a nested sync response whose `status` is `false`.
    fn sync_failure(&self) -> Option<String> {
        let sync = self
            .bapi_sync_response_json
            .as_ref()
            .or(self.bapi_sync_response.as_ref())
            .and_then(sync_object)?;

        let failed = match sync.get("status") {
            Some(Value::Bool(b)) => !b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("false"),
            _ => false,
        };
        if !failed {
            return None;
        }

        Some(
            sync.get("message")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or("Unknown error")
                .to_owned(),
        )
    }
}

/// The sync response arrives either as an object or as a JSON-encoded string.
fn sync_object(value: &Value) -> Option<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map.clone()),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        },
        _ => None,
    }
}

/// JSON-loose truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Polling ──────────────────────────────────────────────────────────

/// Result of one status request.
#[derive(Debug, Clone)]
pub enum TaskPoll {
    /// The status resource is gone; the task finished before we looked.
    NotFound,
    Status(TaskStatus),
    /// Any other HTTP status. Callers treat this as transient.
    Unexpected(u16),
}

impl CatalystClient {
    /// Fetch the current status of a task once.
    pub async fn fetch_task(&self, token: &AuthToken, url: Url) -> Result<TaskPoll, Error> {
        let resp = self.get_raw(token, url).await?;
        match resp.status() {
            StatusCode::NOT_FOUND => {
                debug!("task status returned 404");
                Ok(TaskPoll::NotFound)
            }
            StatusCode::OK => {
                let body = resp.text().await?;
                Ok(TaskPoll::Status(TaskStatus::from_body(&body)?))
            }
            other => Ok(TaskPoll::Unexpected(other.as_u16())),
        }
    }
}
