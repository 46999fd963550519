//! Polyline representation for route geometries.
//!
//! Providers hand back decoded coordinates; whatever wire format they use
//! (GeoJSON for OSRM) is converted at the adapter boundary.

use serde::{Deserialize, Serialize};

use crate::traits::Coordinate;

/// An ordered sequence of coordinates along the road network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub const EMPTY: Polyline = Polyline { points: Vec::new() };

    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends the points of the next leg.
    ///
    /// Consecutive legs share their joint, so a leading point equal to the
    /// current last point is dropped.
    pub fn append_leg(&mut self, leg: Polyline) {
        let mut points = leg.into_points().into_iter().peekable();
        if let (Some(last), Some(first)) = (self.points.last(), points.peek()) {
            if last == first {
                points.next();
            }
        }
        self.points.extend(points);
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    #[test]
    fn test_new_and_points() {
        let points = vec![c(23.80, 86.44), c(23.81, 86.435), c(23.82, 86.45)];
        let polyline = Polyline::new(points.clone());
        assert_eq!(polyline.points(), &points[..]);
        assert_eq!(polyline.len(), 3);
    }

    #[test]
    fn test_empty_polyline() {
        let polyline = Polyline::default();
        assert!(polyline.is_empty());
    }

    #[test]
    fn test_append_leg_drops_shared_joint() {
        let mut route = Polyline::new(vec![c(1.0, 1.0), c(2.0, 2.0)]);
        route.append_leg(Polyline::new(vec![c(2.0, 2.0), c(3.0, 3.0)]));
        assert_eq!(route.into_points(), vec![c(1.0, 1.0), c(2.0, 2.0), c(3.0, 3.0)]);
    }

    #[test]
    fn test_append_leg_keeps_disjoint_points() {
        let mut route = Polyline::new(vec![c(1.0, 1.0)]);
        route.append_leg(Polyline::new(vec![c(1.5, 1.5), c(3.0, 3.0)]));
        assert_eq!(route.len(), 3);
    }

    #[test]
    fn test_append_to_empty() {
        let mut route = Polyline::default();
        route.append_leg(Polyline::new(vec![c(1.0, 2.0)]));
        route.append_leg(Polyline::default());
        assert_eq!(route.points(), &[c(1.0, 2.0)]);
    }
}
