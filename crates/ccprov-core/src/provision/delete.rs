// Delete steps: look up, skip if absent, submit, await, settle.

use std::time::Duration;

use super::{Mutation, Provisioner, StepOutcome};
use crate::config::TaskKind;
use crate::error::CoreError;
use crate::poller::{TaskOutcome, pause};
use crate::topology::{AreaPlan, BuildingPlan, FloorPlan, PoolPlan, ReservationPlan};

impl Provisioner {
    pub async fn remove_reservation(
        &mut self,
        plan: &ReservationPlan,
    ) -> Result<StepOutcome, CoreError> {
        let Some(site) = self.find_site(&plan.site).await? else {
            return Ok(StepOutcome::skipped(format!("site '{}' not found", plan.site)));
        };
        let Some(reservation) = self.find_reservation(&site.id, &plan.name).await? else {
            return Ok(StepOutcome::skipped("not found"));
        };
        self.delete(Mutation::ReleaseSubpool(&reservation.id), self.pacing.delete)
            .await
    }

    /// Deletes the floor under this plan's building only.
    pub async fn remove_floor(&mut self, plan: &FloorPlan) -> Result<StepOutcome, CoreError> {
        let Some(site) = self.find_site_under(&plan.name, &plan.parent).await? else {
            return Ok(StepOutcome::skipped(format!(
                "not found under {}",
                plan.parent.name()
            )));
        };
        self.delete(Mutation::DeleteSite(&site.id), self.pacing.delete)
            .await
    }

    pub async fn remove_building(&mut self, plan: &BuildingPlan) -> Result<StepOutcome, CoreError> {
        let Some(site) = self.find_site(&plan.name).await? else {
            return Ok(StepOutcome::skipped("not found"));
        };
        self.delete(Mutation::DeleteSite(&site.id), self.pacing.delete)
            .await
    }

    pub async fn remove_area(&mut self, plan: &AreaPlan) -> Result<StepOutcome, CoreError> {
        let Some(site) = self.find_site(&plan.name).await? else {
            return Ok(StepOutcome::skipped("not found"));
        };
        self.delete(Mutation::DeleteSite(&site.id), self.pacing.delete)
            .await
    }

    pub async fn remove_global_pool(&mut self, plan: &PoolPlan) -> Result<StepOutcome, CoreError> {
        let Some(pool) = self.find_global_pool(&plan.name).await? else {
            return Ok(StepOutcome::skipped("not found"));
        };
        self.delete(Mutation::DeletePool(&pool.id), self.pacing.pool_delete)
            .await
    }

    async fn delete(
        &mut self,
        mutation: Mutation<'_>,
        settle: Duration,
    ) -> Result<StepOutcome, CoreError> {
        let task = self.submit(mutation).await?;
        if let TaskOutcome::Failed { message } = self.await_task(&task, TaskKind::Delete).await? {
            return Ok(StepOutcome::failed(message));
        }
        pause(settle, &self.cancel).await?;
        Ok(StepOutcome::Deleted)
    }
}
