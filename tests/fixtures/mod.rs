//! Test fixtures for collection-planner.
//!
//! Provides:
//! - Campus locations around IIT (ISM) Dhanbad
//! - Stub road providers with fixed per-pair distances and call counters

#![allow(dead_code)]

pub mod campus_locations;
pub mod stub_roads;

pub use campus_locations::*;
pub use stub_roads::*;
