//! OSRM HTTP adapter for road legs.

use serde::Deserialize;
use tracing::warn;

use crate::polyline::Polyline;
use crate::traits::{Coordinate, RoadLeg, RoadProvider};

const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";
const DEFAULT_PROFILE: &str = "driving";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OsrmConfig {
    /// Reads `OSRM_BASE_URL`, `OSRM_PROFILE` and `OSRM_TIMEOUT_SECS`.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("OSRM_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.base_url),
            profile: lookup("OSRM_PROFILE")
                .filter(|profile| !profile.is_empty())
                .unwrap_or(defaults.profile),
            timeout_secs: lookup("OSRM_TIMEOUT_SECS")
                .and_then(|secs| secs.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OsrmConfig {
        &self.config
    }

    fn route_url(&self, from: Coordinate, to: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url, self.config.profile, from.lng, from.lat, to.lng, to.lat
        )
    }
}

impl RoadProvider for OsrmClient {
    fn route(&self, from: Coordinate, to: Coordinate) -> RoadLeg {
        let url = self.route_url(from, to);

        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        match response {
            Ok(body) => body.into_leg(),
            Err(err) => {
                warn!(%url, error = %err, "OSRM route request failed");
                RoadLeg::unreachable()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OsrmRouteResponse {
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lng, lat]`.
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteResponse {
    pub(crate) fn into_leg(self) -> RoadLeg {
        let Some(route) = self.routes.and_then(|routes| routes.into_iter().next()) else {
            return RoadLeg::unreachable();
        };

        let points = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| Coordinate::new(lat, lng))
            .collect();

        RoadLeg::new(Polyline::new(points), route.distance / 1000.0)
    }
}
