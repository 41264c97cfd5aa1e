// Status report
//
// Read-only snapshot of what exists on the controller: global pools,
// the site tree and per-building reservations. Each section is
// collected independently so one failing endpoint does not hide the
// others.

use ccprov_api::models::{SiteRecord, SiteType};
use serde::Serialize;
use tracing::warn;

use crate::provision::Provisioner;

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub pools: Section<PoolRow>,
    pub sites: Section<SiteRow>,
    pub reservations: Section<ReservationRow>,
}

/// Rows plus whatever went wrong while collecting them.
#[derive(Debug, Clone, Serialize)]
pub struct Section<T> {
    pub rows: Vec<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolRow {
    pub name: String,
    pub cidr: String,
    pub used: Option<u64>,
    pub total: Option<u64>,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteRow {
    pub kind: SiteType,
    pub name: String,
    pub hierarchy: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationRow {
    pub building: String,
    pub name: String,
    pub cidr: String,
    pub used: Option<u64>,
    pub total: Option<u64>,
    pub id: String,
}

/// Classify a site as area, building or floor.
///
/// The declared `additionalInfo` type wins; otherwise the hierarchy depth
/// decides (one or two separators: area, three: building, more: floor).
/// The `Global` root is not classified.
pub fn classify_site(site: &SiteRecord) -> Option<SiteType> {
    let hierarchy = site.hierarchy();
    if site.name == "Global" || hierarchy == "Global" {
        return None;
    }
    if let Some(declared) = site.declared_type() {
        return Some(declared);
    }
    match hierarchy.matches('/').count() {
        0 => None,
        1 | 2 => Some(SiteType::Area),
        3 => Some(SiteType::Building),
        _ => Some(SiteType::Floor),
    }
}

impl Provisioner {
    /// Collect the status report. Never fails as a whole; per-section
    /// errors are recorded in the report.
    pub async fn status_report(&self) -> StatusReport {
        let token = self.session().token();
        let client = self.client();

        let mut pools = Section::default();
        match client.list_global_pools(token).await {
            Ok(records) => {
                pools.rows = records
                    .into_iter()
                    .map(|p| PoolRow {
                        name: p.ip_pool_name,
                        cidr: p.ip_pool_cidr.unwrap_or_default(),
                        used: p.used_ip_address_count,
                        total: p.total_assignable_ip_address_count,
                        id: p.id,
                    })
                    .collect();
            }
            Err(e) => {
                warn!(error = %e, "could not list global pools");
                pools.errors.push(format!("global pools: {e}"));
            }
        }

        let mut sites = Section::default();
        let mut reservations = Section::default();
        match client.list_sites(token).await {
            Ok(records) => {
                let mut rows: Vec<SiteRow> = records
                    .iter()
                    .filter_map(|s| {
                        classify_site(s).map(|kind| SiteRow {
                            kind,
                            name: s.name.clone(),
                            hierarchy: s.hierarchy().to_owned(),
                            id: s.id.clone(),
                        })
                    })
                    .collect();
                rows.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.hierarchy.cmp(&b.hierarchy)));

                for building in rows.iter().filter(|r| r.kind == SiteType::Building) {
                    match client.list_reservations(token, &building.id).await {
                        Ok(found) => {
                            reservations.rows.extend(found.into_iter().map(|r| {
                                let pool = r.primary_pool();
                                ReservationRow {
                                    building: building.name.clone(),
                                    cidr: pool
                                        .and_then(|p| p.ip_pool_cidr.clone())
                                        .unwrap_or_default(),
                                    used: pool.and_then(|p| p.used_ip_address_count),
                                    total: pool.and_then(|p| p.total_ip_address_count),
                                    name: r.group_name.clone(),
                                    id: r.id.clone(),
                                }
                            }));
                        }
                        Err(e) => {
                            warn!(building = %building.name, error = %e, "could not list reservations");
                            reservations
                                .errors
                                .push(format!("reservations at {}: {e}", building.name));
                        }
                    }
                }
                sites.rows = rows;
            }
            Err(e) => {
                warn!(error = %e, "could not list sites");
                sites.errors.push(format!("sites: {e}"));
                reservations
                    .errors
                    .push("reservations: skipped because sites could not be listed".into());
            }
        }

        StatusReport {
            pools,
            sites,
            reservations,
        }
    }
}
