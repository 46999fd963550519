//! Core domain types and the road provider contract.
//!
//! The planner never talks to a routing service directly. Anything that can
//! answer "how far by road from A to B, and along which line" implements
//! [`RoadProvider`].

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

/// A point on the map, latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// One road segment between two coordinates as reported by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadLeg {
    pub geometry: Polyline,
    /// Road distance in kilometers, `f64::INFINITY` when unreachable.
    pub distance_km: f64,
}

impl RoadLeg {
    pub fn new(geometry: Polyline, distance_km: f64) -> Self {
        Self {
            geometry,
            distance_km,
        }
    }

    /// Sentinel for "no edge": infinite distance, empty geometry.
    pub fn unreachable() -> Self {
        Self {
            geometry: Polyline::default(),
            distance_km: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance_km.is_finite()
    }
}

/// Provides road distance and geometry between two coordinates.
///
/// Implementations must be idempotent and must not fail: transport errors,
/// malformed responses and "no route" answers all map to
/// [`RoadLeg::unreachable`].
pub trait RoadProvider: Send + Sync {
    fn route(&self, from: Coordinate, to: Coordinate) -> RoadLeg;
}

impl<P> RoadProvider for &P
where
    P: RoadProvider + ?Sized,
{
    fn route(&self, from: Coordinate, to: Coordinate) -> RoadLeg {
        (**self).route(from, to)
    }
}

/// Session-unique bin identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BinId(pub u32);

/// Collection status of a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinStatus {
    NeedsCollection,
    Clean,
}

impl BinStatus {
    pub fn toggled(self) -> Self {
        match self {
            BinStatus::NeedsCollection => BinStatus::Clean,
            BinStatus::Clean => BinStatus::NeedsCollection,
        }
    }
}

/// A waste bin placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub id: BinId,
    pub location: Coordinate,
    pub status: BinStatus,
}

impl Bin {
    pub fn new(id: BinId, location: Coordinate, status: BinStatus) -> Self {
        Self {
            id,
            location,
            status,
        }
    }

    /// Only bins that need collection take part in routing.
    pub fn needs_collection(&self) -> bool {
        matches!(self.status, BinStatus::NeedsCollection)
    }
}
