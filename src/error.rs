//! Failure taxonomy for route planning.

use thiserror::Error;

/// Errors returned by the planner and its components.
///
/// Transport faults never appear here: the road provider absorbs them into an
/// unreachable leg, which at worst becomes [`PlanError::NoFeasibleRoute`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// No depot has been set.
    #[error("set the depot (garage) location before calculating a route")]
    MissingDepot,

    /// No disposal site has been set.
    #[error("set the disposal site location before calculating a route")]
    MissingDisposalSite,

    /// A required leg stays unreachable after relaxation.
    ///
    /// `from` and `to` are waypoint indices (0 is the depot, the last index is
    /// the disposal site).
    #[error("no feasible route between waypoint {from} and waypoint {to}")]
    NoFeasibleRoute { from: usize, to: usize },

    /// Too many flagged bins for the exhaustive search.
    #[error("{count} bins need collection but exact search is limited to {limit}")]
    TooManyBins { count: usize, limit: usize },

    /// The computation was cancelled by the caller.
    #[error("route calculation was cancelled")]
    Cancelled,

    /// Fuel price or vehicle mileage is not a positive number.
    #[error("fuel price and mileage must both be positive")]
    InvalidFuelProfile,
}
