//! Exact small-instance solver.
//!
//! Finds the shortest depot -> bins -> disposal order by trying every
//! permutation of the flagged bins over the relaxed road matrix, then walks
//! the winning order hop by hop to collect road geometry.
//!
//! The search is `O(k!)` in the number of flagged bins `k`. There is no
//! pruning, so [`SolveOptions::max_exact_bins`] caps `k`; above the cap the
//! request is rejected or, if asked for, ordered greedily instead.

use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::PlanError;
use crate::matrix::{RoadMatrix, Waypoints};
use crate::permutation::{factorial, for_each_permutation};
use crate::polyline::Polyline;
use crate::traits::RoadProvider;

/// What to do when there are more flagged bins than `max_exact_bins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OversizePolicy {
    /// Fail with [`PlanError::TooManyBins`].
    Reject,
    /// Order bins greedily by nearest relaxed distance.
    NearestNeighbor,
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Largest bin count searched exhaustively.
    pub max_exact_bins: usize,
    pub oversize: OversizePolicy,
    /// Query matrix pairs on the rayon pool instead of one after another.
    pub parallel_matrix: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_exact_bins: 8, // 40320 orders
            oversize: OversizePolicy::Reject,
            parallel_matrix: false,
        }
    }
}

/// An ordered visit sequence with its road geometry and length.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Waypoint indices, depot first and disposal site last.
    pub order: Vec<usize>,
    pub geometry: Polyline,
    pub distance_km: f64,
}

impl Tour {
    /// The tour reported when no bin needs collection.
    pub fn empty() -> Self {
        Self {
            order: Vec::new(),
            geometry: Polyline::default(),
            distance_km: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bin waypoint indices in visiting order, endpoints excluded.
    pub fn stops(&self) -> &[usize] {
        match self.order.len() {
            0..=2 => &[],
            n => &self.order[1..n - 1],
        }
    }
}

/// Computes the shortest tour over `waypoints`.
///
/// With no flagged bins this returns [`Tour::empty`] without touching the
/// provider.
pub fn solve_exact<P>(
    provider: &P,
    waypoints: &Waypoints,
    options: &SolveOptions,
    cancel: &CancelToken,
) -> Result<Tour, PlanError>
where
    P: RoadProvider + ?Sized,
{
    let bin_count = waypoints.bin_count();
    if bin_count == 0 {
        return Ok(Tour::empty());
    }

    let exhaustive = bin_count <= options.max_exact_bins;
    if !exhaustive && options.oversize == OversizePolicy::Reject {
        return Err(PlanError::TooManyBins {
            count: bin_count,
            limit: options.max_exact_bins,
        });
    }

    let mut matrix = RoadMatrix::populate(provider, waypoints, options.parallel_matrix, cancel)?;
    matrix.relax();
    cancel.check()?;

    let chosen = if exhaustive {
        debug!(bins = bin_count, orders = factorial(bin_count), "searching all visit orders");
        best_order(&matrix, waypoints)
    } else {
        debug!(bins = bin_count, limit = options.max_exact_bins, "ordering bins greedily");
        nearest_neighbor_order(&matrix, waypoints)
    };

    let Some((order, relaxed_km)) = chosen else {
        return Err(infeasible(&matrix, waypoints));
    };
    debug!(?order, relaxed_km, "visit order chosen");

    materialize(provider, waypoints, &matrix, order, cancel)
}

/// Minimum-distance order over all permutations of the bins.
///
/// Returns `None` when every order has an unreachable leg. Ties keep the
/// first order found.
pub fn best_order(matrix: &RoadMatrix, waypoints: &Waypoints) -> Option<(Vec<usize>, f64)> {
    let depot = waypoints.depot_index();
    let disposal = waypoints.disposal_index();
    let mut bins = waypoints.bin_indices();

    let mut best: Option<(Vec<usize>, f64)> = None;
    for_each_permutation(&mut bins, |perm| {
        let mut total = 0.0;
        let mut previous = depot;
        for &bin in perm.iter().chain(std::iter::once(&disposal)) {
            total += matrix.distance(previous, bin);
            previous = bin;
        }
        if !total.is_finite() {
            return;
        }
        if best.as_ref().is_none_or(|(_, best_km)| total < *best_km) {
            let mut order = Vec::with_capacity(perm.len() + 2);
            order.push(depot);
            order.extend_from_slice(perm);
            order.push(disposal);
            best = Some((order, total));
        }
    });

    best
}

/// Greedy order: always drive to the closest unvisited bin.
pub fn nearest_neighbor_order(
    matrix: &RoadMatrix,
    waypoints: &Waypoints,
) -> Option<(Vec<usize>, f64)> {
    let disposal = waypoints.disposal_index();
    let mut unvisited = waypoints.bin_indices();
    let mut order = vec![waypoints.depot_index()];
    let mut total = 0.0;
    let mut current = waypoints.depot_index();

    while !unvisited.is_empty() {
        let (position, km) = unvisited
            .iter()
            .enumerate()
            .map(|(position, &bin)| (position, matrix.distance(current, bin)))
            .filter(|(_, km)| km.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        current = unvisited.remove(position);
        order.push(current);
        total += km;
    }

    let last_leg = matrix.distance(current, disposal);
    if !last_leg.is_finite() {
        return None;
    }
    order.push(disposal);
    Some((order, total + last_leg))
}

/// Expands each stop-to-stop leg through the next-hop table and re-fetches
/// every direct hop from the provider.
///
/// The tour distance is the sum of those direct hops.
fn materialize<P>(
    provider: &P,
    waypoints: &Waypoints,
    matrix: &RoadMatrix,
    order: Vec<usize>,
    cancel: &CancelToken,
) -> Result<Tour, PlanError>
where
    P: RoadProvider + ?Sized,
{
    let mut geometry = Polyline::default();
    let mut distance_km = 0.0;

    for stop in order.windows(2) {
        let (from, to) = (stop[0], stop[1]);
        let path = matrix
            .path(from, to)
            .ok_or(PlanError::NoFeasibleRoute { from, to })?;

        for hop in path.windows(2) {
            cancel.check()?;
            let leg = provider.route(waypoints.get(hop[0]), waypoints.get(hop[1]));
            if !leg.is_reachable() {
                return Err(PlanError::NoFeasibleRoute {
                    from: hop[0],
                    to: hop[1],
                });
            }
            distance_km += leg.distance_km;
            geometry.append_leg(leg.geometry);
        }
    }

    Ok(Tour {
        order,
        geometry,
        distance_km,
    })
}

/// Names the first leg of the plain depot -> bins -> disposal order that no
/// relaxed path can cover.
fn infeasible(matrix: &RoadMatrix, waypoints: &Waypoints) -> PlanError {
    let mut order = vec![waypoints.depot_index()];
    order.extend(waypoints.bin_indices());
    order.push(waypoints.disposal_index());

    let (from, to) = order
        .windows(2)
        .map(|leg| (leg[0], leg[1]))
        .find(|&(from, to)| !matrix.distance(from, to).is_finite())
        .unwrap_or((waypoints.depot_index(), waypoints.disposal_index()));

    PlanError::NoFeasibleRoute { from, to }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Coordinate;

    const INF: f64 = f64::INFINITY;

    fn waypoints(bins: usize) -> Waypoints {
        let bins: Vec<Coordinate> = (0..bins)
            .map(|i| Coordinate::new(1.0 + i as f64, 1.0))
            .collect();
        Waypoints::new(Coordinate::new(0.0, 0.0), &bins, Coordinate::new(9.0, 9.0))
    }

    #[test]
    fn test_best_order_picks_cheapest() {
        // 0 = depot, 1..=2 bins, 3 = disposal.
        let matrix = RoadMatrix::from_distances(vec![
            vec![0.0, 5.0, 1.0, 9.0],
            vec![5.0, 0.0, 1.0, 1.0],
            vec![1.0, 1.0, 0.0, 5.0],
            vec![9.0, 1.0, 5.0, 0.0],
        ]);
        let (order, km) = best_order(&matrix, &waypoints(2)).expect("feasible");
        assert_eq!(order, vec![0, 2, 1, 3]);
        assert_eq!(km, 3.0);
    }

    #[test]
    fn test_best_order_skips_unreachable_orders() {
        let matrix = RoadMatrix::from_distances(vec![
            vec![0.0, 1.0, 10.0, INF],
            vec![1.0, 0.0, 1.0, INF],
            vec![10.0, 1.0, 0.0, 1.0],
            vec![INF, INF, 1.0, 0.0],
        ]);
        let (order, km) = best_order(&matrix, &waypoints(2)).expect("feasible");
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(km, 3.0);
    }

    #[test]
    fn test_best_order_none_when_disposal_isolated() {
        let matrix = RoadMatrix::from_distances(vec![
            vec![0.0, 1.0, INF],
            vec![1.0, 0.0, INF],
            vec![INF, INF, 0.0],
        ]);
        assert_eq!(best_order(&matrix, &waypoints(1)), None);
        assert_eq!(
            infeasible(&matrix, &waypoints(1)),
            PlanError::NoFeasibleRoute { from: 1, to: 2 }
        );
    }

    #[test]
    fn test_nearest_neighbor_is_greedy() {
        // Greedy goes 0 -> 1 (1.0) then 1 -> 2 (8.0), although 0 -> 2 -> 1 is shorter.
        let matrix = RoadMatrix::from_distances(vec![
            vec![0.0, 1.0, 2.0, 9.0],
            vec![1.0, 0.0, 8.0, 1.0],
            vec![2.0, 8.0, 0.0, 9.0],
            vec![9.0, 1.0, 9.0, 0.0],
        ]);
        let (order, km) = nearest_neighbor_order(&matrix, &waypoints(2)).expect("feasible");
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(km, 18.0);

        let (_, exact_km) = best_order(&matrix, &waypoints(2)).expect("feasible");
        assert!(exact_km <= km);
    }

    #[test]
    fn test_tour_stops() {
        let tour = Tour {
            order: vec![0, 2, 1, 3],
            geometry: Polyline::default(),
            distance_km: 1.0,
        };
        assert_eq!(tour.stops(), &[2, 1]);
        assert!(Tour::empty().stops().is_empty());
    }
}
