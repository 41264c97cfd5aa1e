// Intent API request and response types
//
// Requests are built through constructors plus `with_*` methods so call
// sites read as the payload they produce. Response records keep only the
// fields the provisioning flow and status report consume; everything is
// `#[serde(default)]` because the controller omits keys freely.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Pool type used for every pool and reservation this tool creates.
pub const GENERIC_POOL_TYPE: &str = "Generic";

/// RF model applied to floors unless overridden.
pub const DEFAULT_RF_MODEL: &str = "Cubes And Walled Offices";

// ── Sites ────────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SiteType {
    Area,
    Building,
    Floor,
}

/// Site as returned by `GET /dna/intent/api/v1/site`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site_name_hierarchy: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub additional_info: Option<Vec<AdditionalInfo>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfo {
    #[serde(default)]
    pub name_space: Option<String>,
    #[serde(default)]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
}

impl SiteRecord {
    /// Full hierarchy (`Global/...`), falling back to the bare name.
    pub fn hierarchy(&self) -> &str {
        self.site_name_hierarchy
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(&self.name)
    }

    /// Site type declared in `additionalInfo[].attributes.type`, if any.
    pub fn declared_type(&self) -> Option<SiteType> {
        self.additional_info
            .iter()
            .flatten()
            .filter_map(|info| info.attributes.as_ref())
            .filter_map(|attrs| attrs.get("type").and_then(serde_json::Value::as_str))
            .find_map(|t| t.parse().ok())
    }
}

/// `POST /dna/intent/api/v1/site` body.
///
/// Serializes as `{"type": "area", "site": {"area": {...}}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSiteRequest {
    #[serde(rename = "type")]
    pub site_type: SiteType,
    pub site: SitePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SitePayload {
    Area(AreaSpec),
    Building(BuildingSpec),
    Floor(FloorSpec),
}

impl CreateSiteRequest {
    pub fn name(&self) -> &str {
        match &self.site {
            SitePayload::Area(a) => &a.name,
            SitePayload::Building(b) => &b.name,
            SitePayload::Floor(f) => &f.name,
        }
    }

    pub fn parent_name(&self) -> &str {
        match &self.site {
            SitePayload::Area(a) => &a.parent_name,
            SitePayload::Building(b) => &b.parent_name,
            SitePayload::Floor(f) => &f.parent_name,
        }
    }
}

impl From<AreaSpec> for CreateSiteRequest {
    fn from(spec: AreaSpec) -> Self {
        Self {
            site_type: SiteType::Area,
            site: SitePayload::Area(spec),
        }
    }
}

impl From<BuildingSpec> for CreateSiteRequest {
    fn from(spec: BuildingSpec) -> Self {
        Self {
            site_type: SiteType::Building,
            site: SitePayload::Building(spec),
        }
    }
}

impl From<FloorSpec> for CreateSiteRequest {
    fn from(spec: FloorSpec) -> Self {
        Self {
            site_type: SiteType::Floor,
            site: SitePayload::Floor(spec),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSpec {
    pub name: String,
    pub parent_name: String,
}

impl AreaSpec {
    pub fn new(name: impl Into<String>, parent_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_name: parent_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSpec {
    pub name: String,
    pub parent_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl BuildingSpec {
    pub fn new(name: impl Into<String>, parent_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_name: parent_name.into(),
            latitude: None,
            longitude: None,
            address: None,
            country: None,
        }
    }

    #[must_use]
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>, country: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self.country = Some(country.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorSpec {
    pub name: String,
    pub parent_name: String,
    pub rf_model: String,
    pub width: u32,
    pub length: u32,
    pub height: u32,
    pub floor_number: u32,
}

impl FloorSpec {
    /// Floor with the default RF model and a 100 x 100 x 10 footprint.
    pub fn new(name: impl Into<String>, parent_name: impl Into<String>, floor_number: u32) -> Self {
        Self {
            name: name.into(),
            parent_name: parent_name.into(),
            rf_model: DEFAULT_RF_MODEL.to_owned(),
            width: 100,
            length: 100,
            height: 10,
            floor_number,
        }
    }

    #[must_use]
    pub fn with_rf_model(mut self, rf_model: impl Into<String>) -> Self {
        self.rf_model = rf_model.into();
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: u32, length: u32, height: u32) -> Self {
        self.width = width;
        self.length = length;
        self.height = height;
        self
    }
}

// ── Global pools ─────────────────────────────────────────────────────

/// Pool as returned by `GET /dna/intent/api/v1/global-pool`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalPoolRecord {
    pub id: String,
    #[serde(default)]
    pub ip_pool_name: String,
    #[serde(default)]
    pub ip_pool_cidr: Option<String>,
    #[serde(default)]
    pub used_ip_address_count: Option<u64>,
    #[serde(default)]
    pub total_assignable_ip_address_count: Option<u64>,
}

/// `POST /dna/intent/api/v1/global-pool` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGlobalPoolRequest {
    pub name: String,
    pub pool_type: String,
    pub address_space: AddressSpace,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpace {
    pub subnet: Ipv4Addr,
    pub prefix_length: u8,
}

impl CreateGlobalPoolRequest {
    pub fn generic(name: impl Into<String>, subnet: Ipv4Addr, prefix_length: u8) -> Self {
        Self {
            name: name.into(),
            pool_type: GENERIC_POOL_TYPE.to_owned(),
            address_space: AddressSpace {
                subnet,
                prefix_length,
            },
        }
    }

    #[must_use]
    pub fn with_pool_type(mut self, pool_type: impl Into<String>) -> Self {
        self.pool_type = pool_type.into();
        self
    }
}

// ── Reservations ─────────────────────────────────────────────────────

/// Reservation as returned by `GET /dna/intent/api/v1/reserve-ip-subpool`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    pub id: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub ip_pools: Option<Vec<ReservedPool>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservedPool {
    #[serde(default)]
    pub ip_pool_cidr: Option<String>,
    #[serde(default)]
    pub used_ip_address_count: Option<u64>,
    #[serde(default)]
    pub total_ip_address_count: Option<u64>,
}

impl ReservationRecord {
    /// First IPv4 pool carved out for this reservation.
    pub fn primary_pool(&self) -> Option<&ReservedPool> {
        self.ip_pools.as_ref().and_then(|pools| pools.first())
    }
}

/// `POST /dna/intent/api/v1/reserve-ip-subpool/{siteId}` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveSubpoolRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub pool_type: String,
    /// CIDR of the global pool this reservation is carved from.
    pub ipv4_global_pool: String,
    pub ipv4_prefix: bool,
    pub ipv4_prefix_length: u8,
    pub ipv4_subnet: Ipv4Addr,
    #[serde(rename = "ipv4GateWay")]
    pub ipv4_gateway: Ipv4Addr,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ipv4_dhcp_servers: Vec<Ipv4Addr>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ipv4_dns_servers: Vec<Ipv4Addr>,
}

impl ReserveSubpoolRequest {
    pub fn generic(
        name: impl Into<String>,
        global_pool_cidr: impl Into<String>,
        subnet: Ipv4Addr,
        prefix_length: u8,
        gateway: Ipv4Addr,
    ) -> Self {
        Self {
            name: name.into(),
            pool_type: GENERIC_POOL_TYPE.to_owned(),
            ipv4_global_pool: global_pool_cidr.into(),
            ipv4_prefix: true,
            ipv4_prefix_length: prefix_length,
            ipv4_subnet: subnet,
            ipv4_gateway: gateway,
            ipv4_dhcp_servers: Vec::new(),
            ipv4_dns_servers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dhcp_servers(mut self, servers: Vec<Ipv4Addr>) -> Self {
        self.ipv4_dhcp_servers = servers;
        self
    }

    #[must_use]
    pub fn with_dns_servers(mut self, servers: Vec<Ipv4Addr>) -> Self {
        self.ipv4_dns_servers = servers;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn area_request_shape() {
        let req: CreateSiteRequest = AreaSpec::new("United States", "Global").into();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"type": "area", "site": {"area": {"name": "United States", "parentName": "Global"}}})
        );
    }

    #[test]
    fn floor_request_shape() {
        let req: CreateSiteRequest = FloorSpec::new("FLOOR_2", "Global/US/Campus/Tower", 2).into();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"type": "floor", "site": {"floor": {
                "name": "FLOOR_2",
                "parentName": "Global/US/Campus/Tower",
                "rfModel": "Cubes And Walled Offices",
                "width": 100, "length": 100, "height": 10,
                "floorNumber": 2
            }}})
        );
    }

    #[test]
    fn building_request_shape() {
        let req: CreateSiteRequest = BuildingSpec::new("Sunset Tower", "Global/US/Campus")
            .with_coordinates(34.099, -118.366)
            .with_address("8358 Sunset Blvd", "United States")
            .into();
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["type"], "building");
        assert_eq!(value["site"]["building"]["latitude"], 34.099);
        assert_eq!(value["site"]["building"]["country"], "United States");
    }

    #[test]
    fn reservation_request_uses_controller_key_spelling() {
        let req = ReserveSubpoolRequest::generic(
            "ST_CORP",
            "10.201.0.0/16",
            Ipv4Addr::new(10, 201, 2, 0),
            24,
            Ipv4Addr::new(10, 201, 2, 1),
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "name": "ST_CORP",
                "type": "Generic",
                "ipv4GlobalPool": "10.201.0.0/16",
                "ipv4Prefix": true,
                "ipv4PrefixLength": 24,
                "ipv4Subnet": "10.201.2.0",
                "ipv4GateWay": "10.201.2.1"
            })
        );
    }

    #[test]
    fn declared_site_type_from_additional_info() {
        let site: SiteRecord = serde_json::from_value(json!({
            "id": "1",
            "name": "FLOOR_1",
            "siteNameHierarchy": "Global/US/Campus/Tower/FLOOR_1",
            "additionalInfo": [
                {"nameSpace": "Location", "attributes": {"type": "floor"}}
            ]
        }))
        .unwrap();
        assert_eq!(site.declared_type(), Some(SiteType::Floor));

        let bare: SiteRecord =
            serde_json::from_value(json!({"id": "2", "name": "Global", "additionalInfo": null})).unwrap();
        assert_eq!(bare.declared_type(), None);
        assert_eq!(bare.hierarchy(), "Global");
    }
}
