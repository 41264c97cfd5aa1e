// Timed retry and task-completion waiting
//
// `poll_until` is the generic loop: probe, sleep one interval, repeat
// until the probe is ready, the deadline passes, or the run is cancelled.
// `wait_for_task` layers the controller's task protocol on top of it.
// Both use `tokio::time`, so tests drive them with a paused clock.

use std::future::Future;
use std::time::Duration;

use ccprov_api::{AuthToken, CatalystClient, TaskPoll, TaskRef, TaskState};
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::CoreError;

/// Interval between probes and overall deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollPolicy {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// What a single probe observed.
#[derive(Debug)]
pub enum Probe<T> {
    Ready(T),
    Pending,
}

/// How a poll loop ended (cancellation is an error instead).
#[derive(Debug, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Ready(T),
    TimedOut { attempts: u32 },
}

/// Run `probe` every `policy.interval` until it is ready or
/// `policy.timeout` has elapsed.
///
/// The first probe runs immediately. No probe starts at or after the
/// deadline, so a probe that never becomes ready runs exactly
/// `timeout / interval` times (rounded up).
pub async fn poll_until<T, F, Fut>(
    policy: &PollPolicy,
    cancel: &CancellationToken,
    mut probe: F,
) -> Result<PollOutcome<T>, CoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Probe<T>>,
{
    let deadline = Instant::now() + policy.timeout;
    let mut attempts: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        if Instant::now() >= deadline {
            return Ok(PollOutcome::TimedOut { attempts });
        }

        attempts = attempts.saturating_add(1);
        if let Probe::Ready(value) = probe().await {
            return Ok(PollOutcome::Ready(value));
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(CoreError::Cancelled),
            () = sleep(policy.interval) => {}
        }
    }
}

/// Final state of an awaited task, as far as the provisioning flow cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The submission returned no task handle.
    NoTask,
    Succeeded,
    /// The status resource was already gone (404).
    CompletedBeforePoll,
    /// Deadline passed without a terminal state. Counted as success.
    TimedOut,
    Failed { message: String },
}

/// Wait for a submitted task to reach a terminal state.
///
/// Non-200 responses, transport errors and undecodable bodies are logged
/// and retried until the deadline. Running out of time is reported as
/// [`TaskOutcome::TimedOut`], which callers treat as success.
pub async fn wait_for_task(
    client: &CatalystClient,
    token: &AuthToken,
    task: &TaskRef,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<TaskOutcome, CoreError> {
    let Some(url) = task.poll_url(client) else {
        debug!("no task handle returned, nothing to wait for");
        return Ok(TaskOutcome::NoTask);
    };

    let task_id = task.short_id();
    debug!(task = task_id, %url, "waiting for task");

    let probe = || {
        let url = url.clone();
        async move {
            match client.fetch_task(token, url).await {
                Ok(TaskPoll::NotFound) => {
                    debug!(task = task_id, "task completed before first poll");
                    Probe::Ready(TaskOutcome::CompletedBeforePoll)
                }
                Ok(TaskPoll::Status(status)) => match status.classify() {
                    TaskState::Succeeded => Probe::Ready(TaskOutcome::Succeeded),
                    TaskState::Failed { message } => Probe::Ready(TaskOutcome::Failed { message }),
                    TaskState::Running { status } => {
                        debug!(task = task_id, status = status.as_deref().unwrap_or("?"), "task running");
                        Probe::Pending
                    }
                },
                Ok(TaskPoll::Unexpected(401)) => {
                    warn!(task = task_id, "task poll rejected with 401, retrying");
                    debug!(
                        task = task_id,
                        "token may have expired mid-wait; the task outcome cannot be read with it"
                    );
                    Probe::Pending
                }
                Ok(TaskPoll::Unexpected(code)) => {
                    warn!(task = task_id, status = code, "unexpected status while polling task");
                    Probe::Pending
                }
                Err(e) if e.is_transient() => {
                    debug!(task = task_id, error = %e, "transient poll error, retrying");
                    Probe::Pending
                }
                Err(e) => {
                    warn!(task = task_id, error = %e, "task poll failed, retrying");
                    Probe::Pending
                }
            }
        }
    };

    match poll_until(policy, cancel, probe).await? {
        PollOutcome::Ready(outcome) => {
            if let TaskOutcome::Failed { message } = &outcome {
                debug!(task = task_id, %message, "task failed");
            } else {
                info!(task = task_id, "task completed");
            }
            Ok(outcome)
        }
        PollOutcome::TimedOut { attempts } => {
            warn!(
                task = task_id,
                attempts,
                timeout_secs = policy.timeout.as_secs(),
                "task did not finish in time, manual verification may be needed"
            );
            Ok(TaskOutcome::TimedOut)
        }
    }
}

/// Sleep for `duration` unless the run is cancelled first.
pub async fn pause(duration: Duration, cancel: &CancellationToken) -> Result<(), CoreError> {
    if duration.is_zero() {
        return Ok(());
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(CoreError::Cancelled),
        () = sleep(duration) => Ok(()),
    }
}
