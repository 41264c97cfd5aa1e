// Create steps: look up, skip if present, submit, await, settle.

use std::time::Duration;

use ccprov_api::models::{
    AreaSpec, BuildingSpec, CreateGlobalPoolRequest, CreateSiteRequest, FloorSpec,
    ReserveSubpoolRequest,
};
use tracing::debug;

use super::{Mutation, Provisioner, StepOutcome};
use crate::config::TaskKind;
use crate::error::CoreError;
use crate::poller::{TaskOutcome, pause};
use crate::topology::{AreaPlan, BuildingPlan, FloorPlan, PoolPlan, ReservationPlan};

impl Provisioner {
    /// Create a global pool unless one with the same name exists.
    ///
    /// A new pool only counts as created once a follow-up lookup sees it.
    pub async fn ensure_global_pool(&mut self, plan: &PoolPlan) -> Result<StepOutcome, CoreError> {
        if let Some(existing) = self.find_global_pool(&plan.name).await? {
            let cidr = existing.ip_pool_cidr.as_deref().unwrap_or("unknown CIDR");
            return Ok(StepOutcome::skipped(format!("already exists ({cidr})")));
        }

        let request =
            CreateGlobalPoolRequest::generic(&plan.name, plan.cidr.network(), plan.cidr.prefix_len());
        let task = self.submit(Mutation::CreatePool(&request)).await?;
        if let TaskOutcome::Failed { message } = self.await_task(&task, TaskKind::CreatePool).await? {
            return Ok(StepOutcome::failed(message));
        }

        pause(self.pacing.pool_confirm, &self.cancel).await?;
        if self.find_global_pool(&plan.name).await?.is_some() {
            Ok(StepOutcome::Created)
        } else {
            Ok(StepOutcome::failed("pool not visible after creation"))
        }
    }

    pub async fn ensure_area(&mut self, plan: &AreaPlan) -> Result<StepOutcome, CoreError> {
        if self.find_site(&plan.name).await?.is_some() {
            return Ok(StepOutcome::skipped("already exists"));
        }
        let request: CreateSiteRequest = AreaSpec::new(&plan.name, plan.parent.to_string()).into();
        self.create_site(&request, self.pacing.area).await
    }

    pub async fn ensure_building(&mut self, plan: &BuildingPlan) -> Result<StepOutcome, CoreError> {
        if self.find_site(&plan.name).await?.is_some() {
            return Ok(StepOutcome::skipped("already exists"));
        }
        let request: CreateSiteRequest = BuildingSpec::new(&plan.name, plan.parent.to_string())
            .with_coordinates(plan.latitude, plan.longitude)
            .with_address(&plan.address, &plan.country)
            .into();
        self.create_site(&request, self.pacing.building).await
    }

    /// Floors are matched by name and parent building, so `FLOOR_1` in
    /// one tower never shadows `FLOOR_1` in another.
    pub async fn ensure_floor(&mut self, plan: &FloorPlan) -> Result<StepOutcome, CoreError> {
        if self.find_site_under(&plan.name, &plan.parent).await?.is_some() {
            return Ok(StepOutcome::skipped(format!(
                "already exists under {}",
                plan.parent.name()
            )));
        }
        let request: CreateSiteRequest =
            FloorSpec::new(&plan.name, plan.parent.to_string(), plan.floor_number).into();
        self.create_site(&request, self.pacing.floor).await
    }

    /// Reserve a subnet at a building, carved from the named global pool.
    pub async fn ensure_reservation(
        &mut self,
        plan: &ReservationPlan,
    ) -> Result<StepOutcome, CoreError> {
        let Some(site) = self.find_site(&plan.site).await? else {
            return Ok(StepOutcome::failed(format!("site '{}' not found", plan.site)));
        };

        if self.find_reservation(&site.id, &plan.name).await?.is_some() {
            return Ok(StepOutcome::skipped(format!("already exists at {}", plan.site)));
        }

        let Some(pool) = self.find_global_pool(&plan.pool).await? else {
            return Ok(StepOutcome::failed(format!(
                "global pool '{}' not found",
                plan.pool
            )));
        };
        let Some(pool_cidr) = pool.ip_pool_cidr.filter(|c| !c.is_empty()) else {
            return Ok(StepOutcome::failed(format!(
                "global pool '{}' has no CIDR",
                plan.pool
            )));
        };

        debug!(
            name = %plan.name,
            subnet = %plan.cidr,
            gateway = %plan.gateway(),
            parent = %pool_cidr,
            "reserving subpool"
        );
        let request = ReserveSubpoolRequest::generic(
            &plan.name,
            pool_cidr,
            plan.cidr.network(),
            plan.cidr.prefix_len(),
            plan.gateway(),
        );
        let task = self
            .submit(Mutation::Reserve {
                site_id: &site.id,
                request: &request,
            })
            .await?;
        if let TaskOutcome::Failed { message } =
            self.await_task(&task, TaskKind::CreateReservation).await?
        {
            return Ok(StepOutcome::failed(message));
        }

        pause(self.pacing.reservation, &self.cancel).await?;
        Ok(StepOutcome::Created)
    }

    async fn create_site(
        &mut self,
        request: &CreateSiteRequest,
        settle: Duration,
    ) -> Result<StepOutcome, CoreError> {
        let task = self.submit(Mutation::CreateSite(request)).await?;
        if let TaskOutcome::Failed { message } = self.await_task(&task, TaskKind::CreateSite).await? {
            return Ok(StepOutcome::failed(message));
        }
        pause(settle, &self.cancel).await?;
        Ok(StepOutcome::Created)
    }
}
