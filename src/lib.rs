//! collection-planner core
//!
//! Plans a waste-collection tour from a depot through every bin that needs
//! collection to a disposal site, using road distances from a pluggable
//! provider, plus a shuffled baseline tour for comparison.

pub mod traits;
pub mod error;
pub mod cancel;
pub mod matrix;
pub mod permutation;
pub mod solver;
pub mod baseline;
pub mod planner;
pub mod selection;
pub mod session;
pub mod fuel;
pub mod osrm;
pub mod haversine;
pub mod polyline;
