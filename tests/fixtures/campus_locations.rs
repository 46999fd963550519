//! Campus locations for test fixtures.
//!
//! Approximate coordinates around the IIT (ISM) Dhanbad campus.

use collection_planner::traits::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

pub const GARAGE: Location = Location::new("Maintenance garage", 23.80, 86.44);

pub const DISPOSAL_SITE: Location = Location::new("Disposal yard", 23.82, 86.45);

pub const BIN_SITES: &[Location] = &[
    Location::new("Library", 23.81, 86.435),
    Location::new("Main building", 23.815, 86.44),
    Location::new("Hostel block A", 23.8125, 86.4425),
    Location::new("Sports complex", 23.8075, 86.4475),
    Location::new("Canteen", 23.8175, 86.4375),
    Location::new("Lecture hall", 23.805, 86.4385),
];

pub fn garage() -> Coordinate {
    GARAGE.coordinate()
}

pub fn disposal_site() -> Coordinate {
    DISPOSAL_SITE.coordinate()
}

pub fn bin_sites(count: usize) -> Vec<Coordinate> {
    BIN_SITES.iter().take(count).map(Location::coordinate).collect()
}
