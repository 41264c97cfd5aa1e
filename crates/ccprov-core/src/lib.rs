// ccprov-core: Provisioning flows between ccprov-api and the CLI.

pub mod cidr;
pub mod config;
pub mod error;
pub mod poller;
pub mod provision;
pub mod report;
pub mod session;
pub mod site_path;
pub mod topology;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cidr::Ipv4Cidr;
pub use config::{ControllerConfig, Pacing, PollSettings, TaskKind, TlsVerification};
pub use error::CoreError;
pub use poller::{PollOutcome, PollPolicy, Probe, TaskOutcome, poll_until, wait_for_task};
pub use provision::{Phase, Provisioner, ResourceKind, StepOutcome, StepReport};
pub use report::{StatusReport, classify_site};
pub use session::Session;
pub use site_path::SitePath;
pub use topology::Topology;
