//! Fuel cost estimate for a driven distance.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Fuel price and vehicle mileage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelProfile {
    price_per_litre: f64,
    km_per_litre: f64,
}

impl FuelProfile {
    /// Both values must be finite and positive.
    pub fn new(price_per_litre: f64, km_per_litre: f64) -> Result<Self, PlanError> {
        let valid = |value: f64| value.is_finite() && value > 0.0;
        if !valid(price_per_litre) || !valid(km_per_litre) {
            return Err(PlanError::InvalidFuelProfile);
        }
        Ok(Self {
            price_per_litre,
            km_per_litre,
        })
    }

    pub fn price_per_litre(&self) -> f64 {
        self.price_per_litre
    }

    pub fn km_per_litre(&self) -> f64 {
        self.km_per_litre
    }

    pub fn cost(&self, distance_km: f64) -> f64 {
        distance_km / self.km_per_litre * self.price_per_litre
    }

    /// Cost difference between driving `baseline_km` and `chosen_km`.
    pub fn savings(&self, chosen_km: f64, baseline_km: f64) -> f64 {
        self.cost(baseline_km) - self.cost(chosen_km)
    }
}
