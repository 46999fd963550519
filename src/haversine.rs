//! Haversine road provider (fallback when OSRM is unavailable).
//!
//! Uses great-circle distance scaled by a detour factor.
//! Less accurate than OSRM (ignores roads) but always available.

use crate::polyline::Polyline;
use crate::traits::{Coordinate, RoadLeg, RoadProvider};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line provider.
///
/// Geometry is the two endpoints; distance is the great-circle distance times
/// `detour_factor`, a rough allowance for roads not running straight.
#[derive(Debug, Clone)]
pub struct HaversineRoads {
    pub detour_factor: f64,
}

impl Default for HaversineRoads {
    fn default() -> Self {
        Self { detour_factor: 1.0 }
    }
}

impl HaversineRoads {
    pub fn new(detour_factor: f64) -> Self {
        Self { detour_factor }
    }

    /// Calculate haversine distance between two points in kilometers.
    pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

impl RoadProvider for HaversineRoads {
    fn route(&self, from: Coordinate, to: Coordinate) -> RoadLeg {
        let km = Self::haversine_km(from, to) * self.detour_factor;
        RoadLeg::new(Polyline::new(vec![from, to]), km)
    }
}
