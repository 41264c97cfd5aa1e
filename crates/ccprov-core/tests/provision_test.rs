#![allow(clippy::unwrap_used)]
// Provisioning flows against a wiremock controller.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{body_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ccprov_core::topology::{AreaPlan, BuildingPlan, FloorPlan, PoolPlan, ReservationPlan};
use ccprov_core::{
    ControllerConfig, CoreError, Pacing, Phase, PollSettings, Provisioner, SitePath, StepOutcome,
    TlsVerification, Topology,
};

// ── Helpers ─────────────────────────────────────────────────────────

const US: &str = "Global/United States";
const SUNSET: &str = "Global/United States/Golden Hills Campus/Sunset Tower";
const WINDY: &str = "Global/United States/Lakefront Tower/Windy City Plaza";

async fn setup() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Token": "tok"})))
        .named("token")
        .mount(&server)
        .await;
    server
}

fn config(server: &MockServer) -> ControllerConfig {
    let mut config = ControllerConfig::new(
        Url::parse(&server.uri()).unwrap(),
        "admin",
        "pw".to_string().into(),
    );
    config.tls = TlsVerification::SystemDefaults;
    config.timeout = Duration::from_secs(5);
    config.polling = PollSettings {
        interval: Duration::from_millis(10),
        pool_timeout: Duration::from_secs(2),
        site_timeout: Duration::from_secs(2),
        reservation_timeout: Duration::from_secs(2),
        delete_timeout: Duration::from_secs(2),
    };
    config.pacing = Pacing::none();
    config
}

async fn connect(server: &MockServer) -> Provisioner {
    Provisioner::connect(&config(server), CancellationToken::new())
        .await
        .unwrap()
}

fn site(id: &str, hierarchy: &str) -> Value {
    let name = hierarchy.rsplit('/').next().unwrap();
    json!({"id": id, "name": name, "siteNameHierarchy": hierarchy})
}

async fn mount_sites(server: &MockServer, sites: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/site"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": sites})))
        .mount(server)
        .await;
}

fn sunset_parent() -> SitePath {
    SitePath::parse(SUNSET).unwrap()
}

// ── Global pools ────────────────────────────────────────────────────

#[tokio::test]
async fn pool_created_once_then_skipped() {
    let server = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": []})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": [{
            "id": "p1", "ipPoolName": "US_CORP", "ipPoolCidr": "10.201.0.0/16"
        }]})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .and(body_json(json!({
            "name": "US_CORP",
            "poolType": "Generic",
            "addressSpace": {"subnet": "10.201.0.0", "prefixLength": 16}
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"executionId": "e-pool"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/dnacaap/management/execution-status/e-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS"})))
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let plan = PoolPlan {
        name: "US_CORP".into(),
        cidr: "10.201.0.0/16".parse().unwrap(),
    };

    assert_eq!(p.ensure_global_pool(&plan).await.unwrap(), StepOutcome::Created);
    assert!(matches!(
        p.ensure_global_pool(&plan).await.unwrap(),
        StepOutcome::Skipped { .. }
    ));
}

#[tokio::test]
async fn pool_that_never_materializes_fails() {
    let server = setup().await;

    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": []})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let plan = PoolPlan {
        name: "US_TECH".into(),
        cidr: "10.202.0.0/16".parse().unwrap(),
    };
    assert!(p.ensure_global_pool(&plan).await.unwrap().is_failure());
}

// ── Sites ───────────────────────────────────────────────────────────

#[tokio::test]
async fn floor_lookup_is_scoped_to_its_building() {
    let server = setup().await;
    mount_sites(
        &server,
        vec![
            site("bld-st", SUNSET),
            site("bld-wcp", WINDY),
            site("fl-wcp-1", &format!("{WINDY}/FLOOR_1")),
        ],
    )
    .await;

    let mut p = connect(&server).await;
    let under_sunset = p.find_site_under("FLOOR_1", &sunset_parent()).await.unwrap();
    assert!(under_sunset.is_none());

    let under_windy = p
        .find_site_under("FLOOR_1", &SitePath::parse("Windy City Plaza").unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(under_windy.id, "fl-wcp-1");
}

#[tokio::test]
async fn floor_with_same_name_elsewhere_is_still_created() {
    let server = setup().await;
    mount_sites(
        &server,
        vec![site("bld-st", SUNSET), site("fl-wcp-1", &format!("{WINDY}/FLOOR_1"))],
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/site"))
        .and(body_json(json!({
            "type": "floor",
            "site": {"floor": {
                "name": "FLOOR_1",
                "parentName": SUNSET,
                "rfModel": "Cubes And Walled Offices",
                "width": 100, "length": 100, "height": 10,
                "floorNumber": 1
            }}
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "executionId": "e-floor",
            "executionStatusUrl": "/dna/platform/management/business-api/v1/execution-status/e-floor"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/platform/management/business-api/v1/execution-status/e-floor"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let plan = FloorPlan {
        name: "FLOOR_1".into(),
        parent: sunset_parent(),
        floor_number: 1,
    };
    assert_eq!(p.ensure_floor(&plan).await.unwrap(), StepOutcome::Created);
}

#[tokio::test]
async fn existing_area_is_skipped_without_posting() {
    let server = setup().await;
    mount_sites(&server, vec![site("area-us", US)]).await;
    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/site"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let plan = AreaPlan {
        name: "United States".into(),
        parent: SitePath::parse("Global").unwrap(),
    };
    assert!(matches!(
        p.ensure_area(&plan).await.unwrap(),
        StepOutcome::Skipped { .. }
    ));
}

#[tokio::test]
async fn expired_token_on_lookup_is_renewed_once() {
    let server = setup().await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/site"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_sites(
        &server,
        vec![
            site("area-us", US),
            site("area-ghc", &format!("{US}/Golden Hills Campus")),
            site("area-lt", &format!("{US}/Lakefront Tower")),
            site("area-om", &format!("{US}/Oceanfront Mansion")),
            site("area-dob", &format!("{US}/Desert Oasis Branch")),
        ],
    )
    .await;

    let mut p = connect(&server).await;
    let topology = Topology::demo().unwrap();
    let reports = p
        .run_create_phase(&topology, Phase::Areas, |_| {})
        .await
        .unwrap();

    assert_eq!(reports.len(), 5);
    assert!(
        reports
            .iter()
            .all(|r| matches!(r.outcome, StepOutcome::Skipped { .. })),
        "{reports:?}"
    );
    assert_eq!(p.session().generation(), 2);
}

#[tokio::test]
async fn lookup_rejected_after_renewal_aborts_the_phase() {
    let server = setup().await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/site"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let topology = Topology::demo().unwrap();
    let result = p.run_create_phase(&topology, Phase::Areas, |_| {}).await;

    assert!(matches!(result, Err(CoreError::AuthenticationFailed { .. })));
    assert_eq!(p.session().generation(), 2);
}

#[tokio::test]
async fn failed_tasks_fail_steps_but_the_phase_continues() {
    let server = setup().await;
    mount_sites(&server, vec![site("global", "Global")]).await;
    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/site"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"executionId": "e-bad"})))
        .expect(5)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/dnacaap/management/execution-status/e-bad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "FAILURE",
            "bapiError": "Parent site not found"
        })))
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let topology = Topology::demo().unwrap();
    let mut seen = 0;
    let reports = p
        .run_create_phase(&topology, Phase::Areas, |_| seen += 1)
        .await
        .unwrap();

    assert_eq!(reports.len(), 5);
    assert_eq!(seen, 5);
    for report in &reports {
        assert_eq!(report.outcome, StepOutcome::failed("Parent site not found"));
    }
}

#[tokio::test]
async fn building_payload_carries_location() {
    let server = setup().await;
    mount_sites(&server, vec![]).await;
    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/site"))
        .and(body_json(json!({
            "type": "building",
            "site": {"building": {
                "name": "Sunset Tower",
                "parentName": "Global/United States/Golden Hills Campus",
                "latitude": 34.099,
                "longitude": -118.366,
                "address": "8358 Sunset Blvd, Los Angeles, CA 90069",
                "country": "United States"
            }}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let topology = Topology::demo().unwrap();
    let plan: &BuildingPlan = topology
        .buildings
        .iter()
        .find(|b| b.name == "Sunset Tower")
        .unwrap();
    assert_eq!(p.ensure_building(plan).await.unwrap(), StepOutcome::Created);
}

// ── Reservations ────────────────────────────────────────────────────

fn st_corp() -> ReservationPlan {
    ReservationPlan {
        name: "ST_CORP".into(),
        site: "Sunset Tower".into(),
        pool: "US_CORP".into(),
        cidr: "10.201.2.0/24".parse().unwrap(),
    }
}

#[tokio::test]
async fn reservation_payload_uses_parent_pool_and_gateway() {
    let server = setup().await;
    mount_sites(&server, vec![site("bld-st", SUNSET)]).await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/reserve-ip-subpool"))
        .and(query_param("siteId", "bld-st"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": [{
            "id": "p1", "ipPoolName": "US_CORP", "ipPoolCidr": "10.201.0.0/16"
        }]})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/reserve-ip-subpool/bld-st"))
        .and(body_json(json!({
            "name": "ST_CORP",
            "type": "Generic",
            "ipv4GlobalPool": "10.201.0.0/16",
            "ipv4Prefix": true,
            "ipv4PrefixLength": 24,
            "ipv4Subnet": "10.201.2.0",
            "ipv4GateWay": "10.201.2.1"
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    assert_eq!(p.ensure_reservation(&st_corp()).await.unwrap(), StepOutcome::Created);
}

#[tokio::test]
async fn reservation_without_parent_pool_fails() {
    let server = setup().await;
    mount_sites(&server, vec![site("bld-st", SUNSET)]).await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/reserve-ip-subpool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": []})))
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    assert_eq!(
        p.ensure_reservation(&st_corp()).await.unwrap(),
        StepOutcome::failed("global pool 'US_CORP' not found")
    );
}

#[tokio::test]
async fn reservation_at_missing_site_fails() {
    let server = setup().await;
    mount_sites(&server, vec![]).await;

    let mut p = connect(&server).await;
    assert_eq!(
        p.ensure_reservation(&st_corp()).await.unwrap(),
        StepOutcome::failed("site 'Sunset Tower' not found")
    );
}

#[tokio::test]
async fn rejected_reservation_is_a_step_failure() {
    let server = setup().await;
    mount_sites(&server, vec![site("bld-st", SUNSET)]).await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/reserve-ip-subpool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": [{
            "id": "p1", "ipPoolName": "US_CORP", "ipPoolCidr": "10.201.0.0/16"
        }]})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dna/intent/api/v1/reserve-ip-subpool/bld-st"))
        .respond_with(ResponseTemplate::new(400).set_body_string("overlapping subnet"))
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let topology = Topology {
        pools: vec![],
        areas: vec![],
        buildings: vec![],
        floors: vec![],
        reservations: vec![st_corp()],
    };
    let reports = p
        .run_create_phase(&topology, Phase::Reservations, |_| {})
        .await
        .unwrap();
    match &reports[0].outcome {
        StepOutcome::Failed { reason } => assert!(reason.contains("overlapping subnet")),
        other => panic!("expected failure, got {other:?}"),
    }
}

// ── Teardown ────────────────────────────────────────────────────────

fn demo_sites() -> Vec<Value> {
    let mut sites = vec![
        site("global", "Global"),
        site("area-us", US),
        site("area-ghc", &format!("{US}/Golden Hills Campus")),
        site("area-lft", &format!("{US}/Lakefront Tower")),
        site("area-ofm", &format!("{US}/Oceanfront Mansion")),
        site("area-dob", &format!("{US}/Desert Oasis Branch")),
        site("bld-st", SUNSET),
        site("bld-wcp", WINDY),
        site("bld-adm", &format!("{US}/Oceanfront Mansion/Art Deco Mansion")),
        site("bld-dot", &format!("{US}/Desert Oasis Branch/Desert Oasis Tower")),
    ];
    sites.push(site("floor-st-1", &format!("{SUNSET}/FLOOR_1")));
    sites.push(site("floor-st-2", &format!("{SUNSET}/FLOOR_2")));
    sites.push(site("floor-wcp-1", &format!("{WINDY}/FLOOR_1")));
    sites.push(site("floor-wcp-2", &format!("{WINDY}/FLOOR_2")));
    sites.push(site(
        "floor-adm-1",
        &format!("{US}/Oceanfront Mansion/Art Deco Mansion/FLOOR_1"),
    ));
    sites.push(site(
        "floor-dot-1",
        &format!("{US}/Desert Oasis Branch/Desert Oasis Tower/FLOOR_1"),
    ));
    sites
}

#[tokio::test]
async fn teardown_runs_reservations_then_floors_then_buildings_then_areas() {
    let server = setup().await;
    mount_sites(&server, demo_sites()).await;

    let topology = Topology::demo().unwrap();
    let reservations: Vec<Value> = topology
        .reservations
        .iter()
        .map(|r| json!({"id": format!("res-{}", r.name), "groupName": r.name}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/reserve-ip-subpool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": reservations})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/dna/intent/api/v1/reserve-ip-subpool/res-.+$"))
        .respond_with(ResponseTemplate::new(200))
        .expect(16)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/dna/intent/api/v1/site/.+$"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"executionId": "e-del"})))
        .expect(15)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/dnacaap/management/execution-status/e-del"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS"})))
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    for phase in Phase::delete_order(false) {
        let reports = p.run_delete_phase(&topology, phase, |_| {}).await.unwrap();
        assert!(reports.iter().all(|r| r.outcome == StepOutcome::Deleted), "{phase}: {reports:?}");
    }

    let deletes: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .map(|r| r.url.path().rsplit('/').next().unwrap().to_owned())
        .collect();
    assert_eq!(deletes.len(), 31);

    let last = |prefix: &str| deletes.iter().rposition(|d| d.starts_with(prefix)).unwrap();
    let first = |prefix: &str| deletes.iter().position(|d| d.starts_with(prefix)).unwrap();
    assert!(last("res-") < first("floor-"));
    assert!(last("floor-") < first("bld-"));
    assert!(last("bld-") < first("area-"));
    assert_eq!(deletes.last().map(String::as_str), Some("area-us"));

    let floors: Vec<_> = deletes.iter().filter(|d| d.starts_with("floor-")).collect();
    assert_eq!(floors.len(), 6, "each floor deleted exactly once: {floors:?}");

    // Connect plus one refresh per delete phase.
    let token_calls = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == "/dna/system/api/v1/auth/token")
        .count();
    assert_eq!(token_calls, 5);
}

#[tokio::test]
async fn expired_token_on_delete_is_renewed_once() {
    let server = setup().await;
    mount_sites(&server, vec![site("bld-st", SUNSET)]).await;
    Mock::given(method("DELETE"))
        .and(path("/dna/intent/api/v1/site/bld-st"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/dna/intent/api/v1/site/bld-st"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    assert_eq!(p.session().generation(), 1);

    let topology = Topology::demo().unwrap();
    let plan = topology
        .buildings
        .iter()
        .find(|b| b.name == "Sunset Tower")
        .unwrap();
    assert_eq!(p.remove_building(plan).await.unwrap(), StepOutcome::Deleted);
    assert_eq!(p.session().generation(), 2);
}

#[tokio::test]
async fn token_that_cannot_be_renewed_aborts_the_phase() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Token": "tok"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dna/system/api/v1/auth/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let topology = Topology::demo().unwrap();
    let result = p.run_delete_phase(&topology, Phase::Reservations, |_| {}).await;
    assert!(matches!(result, Err(CoreError::AuthenticationFailed { .. })));
}

#[tokio::test]
async fn missing_resources_are_skipped_on_teardown() {
    let server = setup().await;
    mount_sites(&server, vec![site("global", "Global")]).await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": []})))
        .mount(&server)
        .await;

    let mut p = connect(&server).await;
    let topology = Topology::demo().unwrap();
    for phase in Phase::delete_order(true) {
        let reports = p.run_delete_phase(&topology, phase, |_| {}).await.unwrap();
        assert!(
            reports
                .iter()
                .all(|r| matches!(r.outcome, StepOutcome::Skipped { .. })),
            "{phase}: {reports:?}"
        );
    }
}

// ── Status ──────────────────────────────────────────────────────────

#[tokio::test]
async fn status_sections_degrade_independently() {
    let server = setup().await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/global-pool"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    mount_sites(
        &server,
        vec![
            site("global", "Global"),
            site("area-us", US),
            site("bld-st", SUNSET),
            site("floor-st-1", &format!("{SUNSET}/FLOOR_1")),
        ],
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/dna/intent/api/v1/reserve-ip-subpool"))
        .and(query_param("siteId", "bld-st"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": [{
            "id": "r1",
            "groupName": "ST_CORP",
            "ipPools": [{"ipPoolCidr": "10.201.2.0/24", "usedIpAddressCount": 2, "totalIpAddressCount": 256}]
        }]})))
        .mount(&server)
        .await;

    let p = connect(&server).await;
    let report = p.status_report().await;

    assert!(report.pools.rows.is_empty());
    assert_eq!(report.pools.errors.len(), 1);

    let names: Vec<_> = report.sites.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["United States", "Sunset Tower", "FLOOR_1"]);

    assert_eq!(report.reservations.rows.len(), 1);
    assert_eq!(report.reservations.rows[0].building, "Sunset Tower");
    assert_eq!(report.reservations.rows[0].cidr, "10.201.2.0/24");
    assert_eq!(report.reservations.rows[0].used, Some(2));
}
