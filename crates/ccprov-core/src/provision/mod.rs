// ── Provisioning driver ──
//
// `Provisioner` owns the client, the credentials and the current
// `Session`, and runs one topology phase at a time. Each resource step
// reports a `StepOutcome`; only fatal errors (cancellation, a token that
// cannot be renewed) abort a phase.

mod create;
mod delete;

use ccprov_api::models::{
    CreateGlobalPoolRequest, CreateSiteRequest, GlobalPoolRecord, ReservationRecord,
    ReserveSubpoolRequest, SiteRecord,
};
use ccprov_api::{CatalystClient, Credentials, TaskRef, TlsMode, TransportConfig};
use serde::Serialize;
use strum::Display;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::{ControllerConfig, Pacing, PollSettings, TaskKind, TlsVerification};
use crate::error::CoreError;
use crate::poller::{TaskOutcome, wait_for_task};
use crate::session::Session;
use crate::site_path::SitePath;
use crate::topology::Topology;

// ── Outcomes ─────────────────────────────────────────────────────────

/// Result of one resource step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Created,
    Deleted,
    Skipped { reason: String },
    Failed { reason: String },
}

impl StepOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[strum(serialize = "global pool")]
    GlobalPool,
    #[strum(serialize = "area")]
    Area,
    #[strum(serialize = "building")]
    Building,
    #[strum(serialize = "floor")]
    Floor,
    #[strum(serialize = "reservation")]
    Reservation,
}

/// One row of a phase summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub kind: ResourceKind,
    pub name: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// A group of same-kind steps, run as one driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    #[strum(serialize = "global pools")]
    Pools,
    #[strum(serialize = "areas")]
    Areas,
    #[strum(serialize = "buildings")]
    Buildings,
    #[strum(serialize = "floors")]
    Floors,
    #[strum(serialize = "reservations")]
    Reservations,
}

impl Phase {
    pub const CREATE_ORDER: [Phase; 5] = [
        Phase::Pools,
        Phase::Areas,
        Phase::Buildings,
        Phase::Floors,
        Phase::Reservations,
    ];

    /// Teardown order. Global pools are appended only on request.
    pub fn delete_order(include_pools: bool) -> Vec<Phase> {
        let mut phases = vec![
            Phase::Reservations,
            Phase::Floors,
            Phase::Buildings,
            Phase::Areas,
        ];
        if include_pools {
            phases.push(Phase::Pools);
        }
        phases
    }
}

// ── Mutations ────────────────────────────────────────────────────────

/// Every state-changing call the driver makes, so submission and the
/// one-shot re-authentication retry live in a single place.
enum Mutation<'a> {
    CreatePool(&'a CreateGlobalPoolRequest),
    CreateSite(&'a CreateSiteRequest),
    Reserve {
        site_id: &'a str,
        request: &'a ReserveSubpoolRequest,
    },
    DeleteSite(&'a str),
    ReleaseSubpool(&'a str),
    DeletePool(&'a str),
}

/// Run a read-only client call with the current token. A 401 renews the
/// session and repeats the call once; a second rejection is returned as-is.
macro_rules! renewing {
    ($self:ident, |$client:ident, $token:ident| $call:expr) => {{
        let first = {
            let $client = &$self.client;
            let $token = $self.session.token();
            $call.await
        };
        match first {
            Err(e) if e.is_auth_expired() => {
                $self.renew_rejected_token().await?;
                let $client = &$self.client;
                let $token = $self.session.token();
                $call.await?
            }
            other => other?,
        }
    }};
}

// ── Provisioner ──────────────────────────────────────────────────────

pub struct Provisioner {
    client: CatalystClient,
    credentials: Credentials,
    session: Session,
    polling: PollSettings,
    pacing: Pacing,
    cancel: CancellationToken,
}

impl Provisioner {
    /// Build the HTTP client and authenticate.
    pub async fn connect(
        config: &ControllerConfig,
        cancel: CancellationToken,
    ) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: match config.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: config.timeout,
        };
        let client = CatalystClient::new(config.url.clone(), &transport)?;
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let session = Session::open(&client, &credentials).await?;

        Ok(Self {
            client,
            credentials,
            session,
            polling: config.polling.clone(),
            pacing: config.pacing.clone(),
            cancel,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn client(&self) -> &CatalystClient {
        &self.client
    }

    /// Replace the current session with a freshly issued one.
    pub async fn reauthenticate(&mut self) -> Result<(), CoreError> {
        self.session = self.session.refresh(&self.client, &self.credentials).await?;
        Ok(())
    }

    // ── Phase drivers ────────────────────────────────────────────────

    /// Create every resource of one phase, skipping what already exists.
    ///
    /// `on_step` sees each report as soon as its step finishes.
    pub async fn run_create_phase(
        &mut self,
        topology: &Topology,
        phase: Phase,
        mut on_step: impl FnMut(&StepReport),
    ) -> Result<Vec<StepReport>, CoreError> {
        let mut reports = Vec::new();
        match phase {
            Phase::Pools => {
                for plan in &topology.pools {
                    let outcome = contain(self.ensure_global_pool(plan).await)?;
                    record(&mut reports, ResourceKind::GlobalPool, &plan.name, outcome, &mut on_step);
                }
            }
            Phase::Areas => {
                for plan in &topology.areas {
                    let outcome = contain(self.ensure_area(plan).await)?;
                    record(&mut reports, ResourceKind::Area, &plan.name, outcome, &mut on_step);
                }
            }
            Phase::Buildings => {
                for plan in &topology.buildings {
                    let outcome = contain(self.ensure_building(plan).await)?;
                    record(&mut reports, ResourceKind::Building, &plan.name, outcome, &mut on_step);
                }
            }
            Phase::Floors => {
                for plan in &topology.floors {
                    let outcome = contain(self.ensure_floor(plan).await)?;
                    let label = format!("{}/{}", plan.parent.name(), plan.name);
                    record(&mut reports, ResourceKind::Floor, &label, outcome, &mut on_step);
                }
            }
            Phase::Reservations => {
                for plan in &topology.reservations {
                    let outcome = contain(self.ensure_reservation(plan).await)?;
                    record(&mut reports, ResourceKind::Reservation, &plan.name, outcome, &mut on_step);
                }
            }
        }
        Ok(reports)
    }

    /// Delete every resource of one phase that still exists.
    ///
    /// The token is renewed before the phase starts, since teardown of a
    /// large topology can outlive a single token.
    pub async fn run_delete_phase(
        &mut self,
        topology: &Topology,
        phase: Phase,
        mut on_step: impl FnMut(&StepReport),
    ) -> Result<Vec<StepReport>, CoreError> {
        self.reauthenticate().await?;

        let mut reports = Vec::new();
        match phase {
            Phase::Reservations => {
                for plan in &topology.reservations {
                    let outcome = contain(self.remove_reservation(plan).await)?;
                    record(&mut reports, ResourceKind::Reservation, &plan.name, outcome, &mut on_step);
                }
            }
            Phase::Floors => {
                for plan in &topology.floors {
                    let outcome = contain(self.remove_floor(plan).await)?;
                    let label = format!("{}/{}", plan.parent.name(), plan.name);
                    record(&mut reports, ResourceKind::Floor, &label, outcome, &mut on_step);
                }
            }
            Phase::Buildings => {
                for plan in &topology.buildings {
                    let outcome = contain(self.remove_building(plan).await)?;
                    record(&mut reports, ResourceKind::Building, &plan.name, outcome, &mut on_step);
                }
            }
            Phase::Areas => {
                for plan in topology.areas_leaf_first() {
                    let outcome = contain(self.remove_area(plan).await)?;
                    record(&mut reports, ResourceKind::Area, &plan.name, outcome, &mut on_step);
                }
            }
            Phase::Pools => {
                for plan in &topology.pools {
                    let outcome = contain(self.remove_global_pool(plan).await)?;
                    record(&mut reports, ResourceKind::GlobalPool, &plan.name, outcome, &mut on_step);
                }
            }
        }
        Ok(reports)
    }

    // ── Lookups ──────────────────────────────────────────────────────

    pub async fn find_global_pool(
        &mut self,
        name: &str,
    ) -> Result<Option<GlobalPoolRecord>, CoreError> {
        let pools = renewing!(self, |client, token| client.list_global_pools(token));
        Ok(pools.into_iter().find(|p| p.ip_pool_name == name))
    }

    /// First site with this name, at any depth.
    pub async fn find_site(&mut self, name: &str) -> Result<Option<SiteRecord>, CoreError> {
        let sites = renewing!(self, |client, token| client.list_sites(token));
        Ok(sites.into_iter().find(|s| s.name == name))
    }

    /// Site with this name whose parent matches `parent` (full path or
    /// trailing segments). Never returns a same-named site elsewhere.
    pub async fn find_site_under(
        &mut self,
        name: &str,
        parent: &SitePath,
    ) -> Result<Option<SiteRecord>, CoreError> {
        let sites = renewing!(self, |client, token| client.list_sites(token));
        Ok(sites.into_iter().find(|s| {
            s.name == name
                && SitePath::parse(s.hierarchy()).is_ok_and(|path| path.is_under(parent))
        }))
    }

    pub async fn find_reservation(
        &mut self,
        site_id: &str,
        name: &str,
    ) -> Result<Option<ReservationRecord>, CoreError> {
        let reservations = renewing!(self, |client, token| client.list_reservations(token, site_id));
        Ok(reservations.into_iter().find(|r| r.group_name == name))
    }

    // ── Submission ───────────────────────────────────────────────────

    async fn send(&self, mutation: &Mutation<'_>) -> Result<TaskRef, ccprov_api::Error> {
        let token = self.session.token();
        match *mutation {
            Mutation::CreatePool(request) => self.client.create_global_pool(token, request).await,
            Mutation::CreateSite(request) => self.client.create_site(token, request).await,
            Mutation::Reserve { site_id, request } => {
                self.client.reserve_subpool(token, site_id, request).await
            }
            Mutation::DeleteSite(id) => self.client.delete_site(token, id).await,
            Mutation::ReleaseSubpool(id) => self.client.release_subpool(token, id).await,
            Mutation::DeletePool(id) => self.client.delete_global_pool(token, id).await,
        }
    }

    /// Submit a mutation, re-authenticating and retrying once if the
    /// controller rejects the token.
    async fn submit(&mut self, mutation: Mutation<'_>) -> Result<TaskRef, CoreError> {
        match self.send(&mutation).await {
            Err(e) if e.is_auth_expired() => {
                self.renew_rejected_token().await?;
                Ok(self.send(&mutation).await?)
            }
            other => Ok(other?),
        }
    }

    async fn renew_rejected_token(&mut self) -> Result<(), CoreError> {
        warn!(
            generation = self.session.generation(),
            "token rejected, re-authenticating and retrying once"
        );
        self.reauthenticate().await
    }

    async fn await_task(&self, task: &TaskRef, kind: TaskKind) -> Result<TaskOutcome, CoreError> {
        wait_for_task(
            &self.client,
            self.session.token(),
            task,
            &self.polling.policy(kind),
            &self.cancel,
        )
        .await
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Turn non-fatal errors into a failed step; fatal ones abort the phase.
fn contain(result: Result<StepOutcome, CoreError>) -> Result<StepOutcome, CoreError> {
    match result {
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => Ok(StepOutcome::failed(e.to_string())),
        ok => ok,
    }
}

fn record(
    reports: &mut Vec<StepReport>,
    kind: ResourceKind,
    name: &str,
    outcome: StepOutcome,
    on_step: &mut impl FnMut(&StepReport),
) {
    match &outcome {
        StepOutcome::Created => info!(%kind, name, "created"),
        StepOutcome::Deleted => info!(%kind, name, "deleted"),
        StepOutcome::Skipped { reason } => debug!(%kind, name, %reason, "skipped"),
        StepOutcome::Failed { reason } => error!(%kind, name, %reason, "step failed"),
    }
    let report = StepReport {
        kind,
        name: name.to_owned(),
        outcome,
    };
    on_step(&report);
    reports.push(report);
}
