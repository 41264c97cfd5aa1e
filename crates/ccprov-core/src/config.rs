// ── Runtime connection configuration ──
//
// These types describe how to reach a controller and how patiently to
// wait for it. They carry credentials and timing, but never touch disk.
// The CLI builds a `ControllerConfig` (through `ccprov-config`) and hands
// it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::poller::PollPolicy;

/// TLS verification strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Skip verification (self-signed certs). Default for lab controllers.
    #[default]
    DangerAcceptInvalid,
}

/// Which kind of operation a task wait belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    CreatePool,
    CreateSite,
    CreateReservation,
    Delete,
}

/// Poll interval and per-kind task deadlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub pool_timeout: Duration,
    pub site_timeout: Duration,
    pub reservation_timeout: Duration,
    pub delete_timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            pool_timeout: Duration::from_secs(600),
            site_timeout: Duration::from_secs(300),
            reservation_timeout: Duration::from_secs(600),
            delete_timeout: Duration::from_secs(300),
        }
    }
}

impl PollSettings {
    pub fn policy(&self, kind: TaskKind) -> PollPolicy {
        let timeout = match kind {
            TaskKind::CreatePool => self.pool_timeout,
            TaskKind::CreateSite => self.site_timeout,
            TaskKind::CreateReservation => self.reservation_timeout,
            TaskKind::Delete => self.delete_timeout,
        };
        PollPolicy::new(self.interval, timeout)
    }
}

/// Settle delays applied after each mutation so the controller's read
/// side catches up before the next lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pacing {
    /// Wait before confirming a new global pool by lookup.
    pub pool_confirm: Duration,
    pub area: Duration,
    pub building: Duration,
    pub floor: Duration,
    pub reservation: Duration,
    pub delete: Duration,
    pub pool_delete: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            pool_confirm: Duration::from_secs(5),
            area: Duration::from_secs(1),
            building: Duration::from_secs(2),
            floor: Duration::from_secs(1),
            reservation: Duration::from_secs(1),
            delete: Duration::from_millis(500),
            pool_delete: Duration::from_secs(1),
        }
    }
}

impl Pacing {
    /// No settle delays at all (tests, or controllers that read their
    /// own writes).
    pub fn none() -> Self {
        Self {
            pool_confirm: Duration::ZERO,
            area: Duration::ZERO,
            building: Duration::ZERO,
            floor: Duration::ZERO,
            reservation: Duration::ZERO,
            delete: Duration::ZERO,
            pool_delete: Duration::ZERO,
        }
    }
}

/// Configuration for one controller run.
///
/// Built by the CLI, passed to `Provisioner::connect`; core never reads
/// config files.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller root URL (e.g., `https://198.18.129.100`).
    pub url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    pub polling: PollSettings,
    pub pacing: Pacing,
}

impl ControllerConfig {
    pub fn new(url: Url, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            url,
            username: username.into(),
            password,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            polling: PollSettings::default(),
            pacing: Pacing::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_task_deadlines() {
        let settings = PollSettings::default();
        assert_eq!(
            settings.policy(TaskKind::CreatePool).timeout,
            Duration::from_secs(600)
        );
        assert_eq!(
            settings.policy(TaskKind::CreateReservation).timeout,
            Duration::from_secs(600)
        );
        assert_eq!(
            settings.policy(TaskKind::CreateSite).timeout,
            Duration::from_secs(300)
        );
        assert_eq!(settings.policy(TaskKind::Delete).timeout, Duration::from_secs(300));
        assert_eq!(settings.policy(TaskKind::Delete).interval, Duration::from_secs(10));
    }
}
