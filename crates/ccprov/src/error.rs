//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ccprov_config::ConfigError;
use ccprov_core::CoreError;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const USAGE: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Usage ────────────────────────────────────────────────────────
    #[error("'{command}' needs a configuration file")]
    #[diagnostic(
        code(ccprov::no_config_flag),
        help("Pass --config <FILE> with CC_IP, CC_USERNAME and CC_PASSWORD keys.")
    )]
    MissingConfigFlag { command: &'static str },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(ccprov::config),
        help("The file is flat YAML; environment variables of the same names override it.")
    )]
    Config(#[from] ConfigError),

    // ── Controller ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(ccprov::connection_failed),
        help(
            "Check that the controller is reachable: {reason}\n\
             Self-signed certificates need CC_INSECURE: true (the default)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ccprov::auth_failed),
        help("Verify CC_USERNAME and CC_PASSWORD.")
    )]
    AuthFailed { message: String },

    #[error("{message}")]
    #[diagnostic(code(ccprov::api_error))]
    Api { message: String },

    // ── Run control ──────────────────────────────────────────────────
    #[error("{failed} step(s) failed during {command}")]
    #[diagnostic(
        code(ccprov::steps_failed),
        help("Re-run with -v for details; steps that already succeeded are skipped next time.")
    )]
    StepsFailed { command: &'static str, failed: usize },

    #[error("Interrupted")]
    #[diagnostic(
        code(ccprov::interrupted),
        help("Nothing was rolled back. Run `ccprov status` to see what exists.")
    )]
    Interrupted,

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(ccprov::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: &'static str },

    #[error("Aborted by user")]
    #[diagnostic(code(ccprov::aborted))]
    Aborted,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {message}")]
    #[diagnostic(code(ccprov::render))]
    Render { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingConfigFlag { .. } => exit_code::USAGE,
            _ => exit_code::FAILURE,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Cancelled => Self::Interrupted,
            other => Self::Api {
                message: other.to_string(),
            },
        }
    }
}
