//! Route planning entry point.
//!
//! Checks prerequisites, computes the exact tour and then the synthetic
//! baseline with the exact distance as its floor.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::baseline::{BaselineOptions, BaselineTour, synthetic_baseline};
use crate::cancel::CancelToken;
use crate::error::PlanError;
use crate::fuel::FuelProfile;
use crate::matrix::Waypoints;
use crate::solver::{SolveOptions, Tour, solve_exact};
use crate::traits::{Bin, BinId, Coordinate, RoadProvider};

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub solve: SolveOptions,
    pub baseline: BaselineOptions,
    /// Seed for the baseline shuffles. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Both tours for one set of inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub exact: Tour,
    pub baseline: BaselineTour,
    /// Flagged bins in the exact tour's visiting order.
    pub visiting_order: Vec<BinId>,
}

impl RoutePlan {
    /// Plan for a session where no bin needs collection.
    pub fn empty() -> Self {
        Self {
            exact: Tour::empty(),
            baseline: BaselineTour::empty(),
            visiting_order: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visiting_order.is_empty()
    }

    pub fn exact_km(&self) -> f64 {
        self.exact.distance_km
    }

    pub fn baseline_km(&self) -> f64 {
        self.baseline.reported_km()
    }

    /// Fuel money saved by driving the exact tour instead of the baseline.
    pub fn fuel_savings(&self, fuel: &FuelProfile) -> f64 {
        fuel.savings(self.exact_km(), self.baseline_km())
    }
}

pub struct RoutePlanner<P> {
    provider: P,
    options: PlanOptions,
}

impl<P> RoutePlanner<P>
where
    P: RoadProvider,
{
    pub fn new(provider: P, options: PlanOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    /// Plans both tours, seeding the baseline from [`PlanOptions::seed`].
    pub fn plan(
        &self,
        depot: Option<Coordinate>,
        disposal_site: Option<Coordinate>,
        bins: &[Bin],
        cancel: &CancelToken,
    ) -> Result<RoutePlan, PlanError> {
        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.plan_with_rng(depot, disposal_site, bins, &mut rng, cancel)
    }

    /// Plans both tours with a caller-supplied random source.
    ///
    /// Missing prerequisites are rejected before any provider call. With no
    /// flagged bins the result is [`RoutePlan::empty`] and the provider is
    /// never queried.
    pub fn plan_with_rng<R>(
        &self,
        depot: Option<Coordinate>,
        disposal_site: Option<Coordinate>,
        bins: &[Bin],
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<RoutePlan, PlanError>
    where
        R: Rng + ?Sized,
    {
        let depot = depot.ok_or(PlanError::MissingDepot)?;
        let disposal_site = disposal_site.ok_or(PlanError::MissingDisposalSite)?;

        let flagged: Vec<&Bin> = bins.iter().filter(|bin| bin.needs_collection()).collect();
        if flagged.is_empty() {
            info!("no bins need collection");
            return Ok(RoutePlan::empty());
        }

        let locations: Vec<Coordinate> = flagged.iter().map(|bin| bin.location).collect();
        let waypoints = Waypoints::new(depot, &locations, disposal_site);

        let exact = solve_exact(&self.provider, &waypoints, &self.options.solve, cancel)?;
        let baseline = synthetic_baseline(
            &self.provider,
            &waypoints,
            exact.distance_km,
            &self.options.baseline,
            rng,
            cancel,
        )?;

        // Waypoint i (1..=k) is flagged bin i - 1.
        let visiting_order = exact.stops().iter().map(|&i| flagged[i - 1].id).collect();

        info!(
            bins = flagged.len(),
            exact_km = exact.distance_km,
            baseline_km = baseline.reported_km(),
            baseline_synthetic = baseline.distance.is_synthetic(),
            "routes planned"
        );

        Ok(RoutePlan {
            exact,
            baseline,
            visiting_order,
        })
    }
}
