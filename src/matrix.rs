//! Waypoints, road distance matrix and all-pairs relaxation.
//!
//! The matrix is filled with one provider query per unordered pair and then
//! relaxed (Floyd-Warshall) so that a missing or implausibly long direct leg
//! can be bypassed through another waypoint. The next-hop table records how to
//! walk the relaxed shortest paths.

use rayon::prelude::*;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::PlanError;
use crate::traits::{Coordinate, RoadProvider};

/// Depot first, flagged bins in between, disposal site last.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoints {
    points: Vec<Coordinate>,
}

impl Waypoints {
    pub fn new(depot: Coordinate, bins: &[Coordinate], disposal: Coordinate) -> Self {
        let mut points = Vec::with_capacity(bins.len() + 2);
        points.push(depot);
        points.extend_from_slice(bins);
        points.push(disposal);
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Coordinate {
        self.points[index]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: depot and disposal site are present.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn depot_index(&self) -> usize {
        0
    }

    pub fn disposal_index(&self) -> usize {
        self.points.len() - 1
    }

    pub fn bin_count(&self) -> usize {
        self.points.len() - 2
    }

    /// Waypoint indices of the flagged bins, `1..=bin_count`.
    pub fn bin_indices(&self) -> Vec<usize> {
        (1..self.disposal_index()).collect()
    }
}

/// Road distances between every pair of waypoints plus next-hop pointers.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadMatrix {
    dist: Vec<Vec<f64>>,
    next: Vec<Vec<Option<usize>>>,
}

impl RoadMatrix {
    /// Builds a matrix from explicit direct distances.
    ///
    /// Infinite entries mean "no direct edge".
    pub fn from_distances(dist: Vec<Vec<f64>>) -> Self {
        let next = dist
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, d)| (i == j || d.is_finite()).then_some(j))
                    .collect()
            })
            .collect();
        Self { dist, next }
    }

    /// Queries `provider` once per unordered pair `i < j` and mirrors the
    /// answer into `dist[j][i]`.
    ///
    /// This assumes road distance is symmetric, which one-way streets can
    /// break. With `parallel` set the pair queries run on the rayon pool; the
    /// matrix is complete either way before this returns.
    pub fn populate<P>(
        provider: &P,
        waypoints: &Waypoints,
        parallel: bool,
        cancel: &CancelToken,
    ) -> Result<Self, PlanError>
    where
        P: RoadProvider + ?Sized,
    {
        let n = waypoints.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
            .collect();
        debug!(waypoints = n, pairs = pairs.len(), parallel, "populating road matrix");

        let query = |&(i, j): &(usize, usize)| -> Result<(usize, usize, f64), PlanError> {
            cancel.check()?;
            let leg = provider.route(waypoints.get(i), waypoints.get(j));
            Ok((i, j, leg.distance_km))
        };

        let distances: Vec<(usize, usize, f64)> = if parallel {
            pairs.par_iter().map(query).collect::<Result<Vec<_>, _>>()?
        } else {
            pairs.iter().map(query).collect::<Result<Vec<_>, _>>()?
        };

        let mut dist = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in dist.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for (i, j, d) in distances {
            dist[i][j] = d;
            dist[j][i] = d;
        }

        Ok(Self::from_distances(dist))
    }

    /// All-pairs shortest-path relaxation.
    ///
    /// Afterwards `distance(i, j) <= distance(i, k) + distance(k, j)` for all
    /// `i`, `j`, `k`.
    pub fn relax(&mut self) {
        let n = self.size();
        for k in 0..n {
            for i in 0..n {
                let d_ik = self.dist[i][k];
                if !d_ik.is_finite() {
                    continue;
                }
                for j in 0..n {
                    let via = d_ik + self.dist[k][j];
                    if via < self.dist[i][j] {
                        self.dist[i][j] = via;
                        self.next[i][j] = self.next[i][k];
                    }
                }
            }
        }
    }

    pub fn size(&self) -> usize {
        self.dist.len()
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.dist[from][to]
    }

    pub fn next_hop(&self, from: usize, to: usize) -> Option<usize> {
        self.next[from][to]
    }

    /// Waypoint indices along the shortest `from -> to` path, both ends
    /// included. `None` when `to` is unreachable from `from`.
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        self.next[from][to]?;
        let mut path = vec![from];
        let mut current = from;
        while current != to {
            current = self.next[current][to]?;
            path.push(current);
            if path.len() > self.size() {
                return None;
            }
        }
        Some(path)
    }

    /// Sum of matrix distances along `order`.
    pub fn order_distance(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|leg| self.dist[leg[0]][leg[1]]).sum()
    }
}
