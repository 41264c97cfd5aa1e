// IP subpool reservation endpoints
//
// Listing is scoped by `siteId` query parameter, creation by path
// segment, deletion by reservation id alone.

use tracing::debug;

use crate::auth::AuthToken;
use crate::client::CatalystClient;
use crate::error::Error;
use crate::models::{ReservationRecord, ReserveSubpoolRequest};
use crate::tasks::TaskRef;

impl CatalystClient {
    /// List reservations held by one site.
    ///
    /// `GET /dna/intent/api/v1/reserve-ip-subpool?siteId={id}`
    pub async fn list_reservations(
        &self,
        token: &AuthToken,
        site_id: &str,
    ) -> Result<Vec<ReservationRecord>, Error> {
        let mut url = self.intent_url("reserve-ip-subpool")?;
        url.query_pairs_mut().append_pair("siteId", site_id);
        debug!(site_id, "listing reservations");
        self.get_list(token, url).await
    }

    /// `POST /dna/intent/api/v1/reserve-ip-subpool/{siteId}`
    pub async fn reserve_subpool(
        &self,
        token: &AuthToken,
        site_id: &str,
        request: &ReserveSubpoolRequest,
    ) -> Result<TaskRef, Error> {
        let url = self.intent_url(&format!("reserve-ip-subpool/{site_id}"))?;
        debug!(site_id, name = %request.name, "reserving subpool");
        self.post_task(token, url, request).await
    }

    /// `DELETE /dna/intent/api/v1/reserve-ip-subpool/{id}`
    pub async fn release_subpool(
        &self,
        token: &AuthToken,
        reservation_id: &str,
    ) -> Result<TaskRef, Error> {
        let url = self.intent_url(&format!("reserve-ip-subpool/{reservation_id}"))?;
        debug!(reservation_id, "releasing subpool");
        self.delete_task(token, url).await
    }
}
