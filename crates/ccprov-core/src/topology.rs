// Demo topology
//
// The fixed set of pools, sites and reservations the `create` and
// `delete` commands operate on. Everything is typed here so the
// provisioning flow never re-parses strings.

use std::net::Ipv4Addr;

use crate::cidr::Ipv4Cidr;
use crate::error::CoreError;
use crate::site_path::SitePath;

#[derive(Debug, Clone, PartialEq)]
pub struct PoolPlan {
    pub name: String,
    pub cidr: Ipv4Cidr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaPlan {
    pub name: String,
    pub parent: SitePath,
}

impl AreaPlan {
    pub fn path(&self) -> SitePath {
        self.parent.child(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildingPlan {
    pub name: String,
    pub parent: SitePath,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub country: String,
}

impl BuildingPlan {
    pub fn path(&self) -> SitePath {
        self.parent.child(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlan {
    pub name: String,
    /// Full path of the owning building.
    pub parent: SitePath,
    pub floor_number: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationPlan {
    pub name: String,
    /// Name of the building the reservation is made at.
    pub site: String,
    /// Name of the global pool it is carved from.
    pub pool: String,
    pub cidr: Ipv4Cidr,
}

impl ReservationPlan {
    pub fn gateway(&self) -> Ipv4Addr {
        self.cidr.gateway()
    }
}

/// Everything one `create` run provisions, in creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub pools: Vec<PoolPlan>,
    pub areas: Vec<AreaPlan>,
    pub buildings: Vec<BuildingPlan>,
    pub floors: Vec<FloorPlan>,
    pub reservations: Vec<ReservationPlan>,
}

/// (short code, third octet, building name)
const BUILDING_SUBNETS: [(&str, u8, &str); 4] = [
    ("ST", 2, "Sunset Tower"),
    ("WCP", 3, "Windy City Plaza"),
    ("ADM", 4, "Art Deco Mansion"),
    ("DOT", 1, "Desert Oasis Tower"),
];

/// (suffix, second octet)
const POOLS: [(&str, u8); 4] = [("CORP", 201), ("TECH", 202), ("GUEST", 203), ("BYOD", 204)];

impl Topology {
    /// Four US pools, one country area with four campus areas, a building
    /// per campus, six floors and sixteen /24 reservations.
    pub fn demo() -> Result<Self, CoreError> {
        let global = SitePath::parse("Global")?;
        let us = global.child("United States");

        let pools = POOLS
            .iter()
            .map(|&(suffix, octet)| {
                Ok(PoolPlan {
                    name: format!("US_{suffix}"),
                    cidr: Ipv4Cidr::new(Ipv4Addr::new(10, octet, 0, 0), 16)?,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        let mut areas = vec![AreaPlan {
            name: "United States".into(),
            parent: global,
        }];
        for campus in [
            "Golden Hills Campus",
            "Lakefront Tower",
            "Oceanfront Mansion",
            "Desert Oasis Branch",
        ] {
            areas.push(AreaPlan {
                name: campus.into(),
                parent: us.clone(),
            });
        }

        let building = |name: &str, campus: &str, lat: f64, lon: f64, address: &str| BuildingPlan {
            name: name.into(),
            parent: us.child(campus),
            latitude: lat,
            longitude: lon,
            address: address.into(),
            country: "United States".into(),
        };
        let buildings = vec![
            building(
                "Sunset Tower",
                "Golden Hills Campus",
                34.099,
                -118.366,
                "8358 Sunset Blvd, Los Angeles, CA 90069",
            ),
            building(
                "Windy City Plaza",
                "Lakefront Tower",
                41.878,
                -87.630,
                "233 S Wacker Dr, Chicago, IL 60606",
            ),
            building(
                "Art Deco Mansion",
                "Oceanfront Mansion",
                25.782,
                -80.133,
                "123 Ocean Drive, Miami Beach, FL 33139",
            ),
            building(
                "Desert Oasis Tower",
                "Desert Oasis Branch",
                33.448,
                -112.074,
                "1235 Cactus Ave, Phoenix, AZ 85001",
            ),
        ];

        let floor_counts = [2, 2, 1, 1];
        let floors = buildings
            .iter()
            .zip(floor_counts)
            .flat_map(|(b, count)| {
                (1..=count).map(move |n| FloorPlan {
                    name: format!("FLOOR_{n}"),
                    parent: b.path(),
                    floor_number: n,
                })
            })
            .collect();

        let mut reservations = Vec::with_capacity(BUILDING_SUBNETS.len() * POOLS.len());
        for (code, third, site) in BUILDING_SUBNETS {
            for (suffix, second) in POOLS {
                reservations.push(ReservationPlan {
                    name: format!("{code}_{suffix}"),
                    site: site.into(),
                    pool: format!("US_{suffix}"),
                    cidr: Ipv4Cidr::new(Ipv4Addr::new(10, second, third, 0), 24)?,
                });
            }
        }

        Ok(Self {
            pools,
            areas,
            buildings,
            floors,
            reservations,
        })
    }

    /// Areas ordered for teardown: deepest first, so children go before
    /// their parents.
    pub fn areas_leaf_first(&self) -> Vec<&AreaPlan> {
        let mut ordered: Vec<&AreaPlan> = self.areas.iter().rev().collect();
        ordered.sort_by_key(|a| std::cmp::Reverse(a.path().depth()));
        ordered
    }
}
