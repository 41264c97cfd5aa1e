// Site hierarchy endpoints
//
// Areas, buildings and floors share one create endpoint; the payload's
// `type` plus the matching nested key select the kind.

use tracing::debug;

use crate::auth::AuthToken;
use crate::client::CatalystClient;
use crate::error::Error;
use crate::models::{CreateSiteRequest, SiteRecord};
use crate::tasks::TaskRef;

impl CatalystClient {
    /// List every site in the hierarchy, `Global` included.
    ///
    /// `GET /dna/intent/api/v1/site`
    pub async fn list_sites(&self, token: &AuthToken) -> Result<Vec<SiteRecord>, Error> {
        let url = self.intent_url("site")?;
        debug!("listing sites");
        self.get_list(token, url).await
    }

    /// `POST /dna/intent/api/v1/site`
    pub async fn create_site(
        &self,
        token: &AuthToken,
        request: &CreateSiteRequest,
    ) -> Result<TaskRef, Error> {
        let url = self.intent_url("site")?;
        debug!(
            name = request.name(),
            parent = request.parent_name(),
            kind = %request.site_type,
            "creating site"
        );
        self.post_task(token, url, request).await
    }

    /// `DELETE /dna/intent/api/v1/site/{id}`
    pub async fn delete_site(&self, token: &AuthToken, site_id: &str) -> Result<TaskRef, Error> {
        let url = self.intent_url(&format!("site/{site_id}"))?;
        debug!(site_id, "deleting site");
        self.delete_task(token, url).await
    }
}
