// Global pool endpoints
//
// Global pools are controller-wide; reservations are carved out of them
// per site (see `reservations.rs`).

use tracing::debug;

use crate::auth::AuthToken;
use crate::client::CatalystClient;
use crate::error::Error;
use crate::models::{CreateGlobalPoolRequest, GlobalPoolRecord};
use crate::tasks::TaskRef;

impl CatalystClient {
    /// List every global pool.
    ///
    /// `GET /dna/intent/api/v1/global-pool`
    pub async fn list_global_pools(&self, token: &AuthToken) -> Result<Vec<GlobalPoolRecord>, Error> {
        let url = self.intent_url("global-pool")?;
        debug!("listing global pools");
        self.get_list(token, url).await
    }

    /// `POST /dna/intent/api/v1/global-pool`
    pub async fn create_global_pool(
        &self,
        token: &AuthToken,
        request: &CreateGlobalPoolRequest,
    ) -> Result<TaskRef, Error> {
        let url = self.intent_url("global-pool")?;
        debug!(name = %request.name, "creating global pool");
        self.post_task(token, url, request).await
    }

    /// `DELETE /dna/intent/api/v1/global-pool/{id}`
    pub async fn delete_global_pool(&self, token: &AuthToken, pool_id: &str) -> Result<TaskRef, Error> {
        let url = self.intent_url(&format!("global-pool/{pool_id}"))?;
        debug!(pool_id, "deleting global pool");
        self.delete_task(token, url).await
    }
}
