//! Stub road providers.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use collection_planner::polyline::Polyline;
use collection_planner::traits::{Coordinate, RoadLeg, RoadProvider};

/// Fixed distances between known points.
///
/// Pairs are symmetric unless set with [`TableRoads::one_way`]. Unknown pairs
/// are unreachable. Geometry is the two endpoints.
#[derive(Debug, Default)]
pub struct TableRoads {
    points: Vec<Coordinate>,
    distances: HashMap<(usize, usize), f64>,
    calls: AtomicUsize,
    log: Mutex<Vec<(usize, usize)>>,
}

impl TableRoads {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// Builds from a full matrix indexed like `points`.
    pub fn from_matrix(points: Vec<Coordinate>, matrix: &[Vec<f64>]) -> Self {
        let mut roads = Self::new(points);
        for (i, row) in matrix.iter().enumerate() {
            for (j, &km) in row.iter().enumerate() {
                if i != j && km.is_finite() {
                    roads.distances.insert((i, j), km);
                }
            }
        }
        roads
    }

    pub fn road(mut self, a: usize, b: usize, km: f64) -> Self {
        self.distances.insert((a, b), km);
        self.distances.insert((b, a), km);
        self
    }

    pub fn one_way(mut self, from: usize, to: usize, km: f64) -> Self {
        self.distances.insert((from, to), km);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Point-index pairs queried so far, in call order.
    pub fn queried(&self) -> Vec<(usize, usize)> {
        self.log.lock().map(|log| log.to_vec()).unwrap_or_default()
    }

    fn index_of(&self, point: Coordinate) -> Option<usize> {
        self.points.iter().position(|p| *p == point)
    }
}

impl RoadProvider for TableRoads {
    fn route(&self, from: Coordinate, to: Coordinate) -> RoadLeg {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (Some(a), Some(b)) = (self.index_of(from), self.index_of(to)) else {
            return RoadLeg::unreachable();
        };
        if let Ok(mut log) = self.log.lock() {
            log.push((a, b));
        }
        if a == b {
            return RoadLeg::new(Polyline::new(vec![from]), 0.0);
        }
        match self.distances.get(&(a, b)) {
            Some(&km) => RoadLeg::new(Polyline::new(vec![from, to]), km),
            None => RoadLeg::unreachable(),
        }
    }
}
