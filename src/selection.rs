//! Which of the two computed tours is on display.
//!
//! Switching is a pure read of stored state; it never recomputes anything.

use crate::baseline::BaselineDistance;
use crate::planner::RoutePlan;
use crate::polyline::Polyline;
use crate::solver::Tour;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RouteChoice {
    /// The exhaustive-search tour.
    #[default]
    Exact,
    /// The synthetic shuffled baseline.
    Baseline,
}

#[derive(Debug, Clone, Default)]
pub struct RouteSelection {
    plan: Option<RoutePlan>,
    active: RouteChoice,
}

impl RouteSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces both stored tours. The active choice is kept.
    pub fn store(&mut self, plan: RoutePlan) -> &RoutePlan {
        self.plan.insert(plan)
    }

    /// Drops both stored tours.
    pub fn clear(&mut self) {
        self.plan = None;
    }

    pub fn select(&mut self, choice: RouteChoice) {
        self.active = choice;
    }

    pub fn active(&self) -> RouteChoice {
        self.active
    }

    pub fn plan(&self) -> Option<&RoutePlan> {
        self.plan.as_ref()
    }

    pub fn active_tour(&self) -> Option<&Tour> {
        let plan = self.plan.as_ref()?;
        Some(match self.active {
            RouteChoice::Exact => &plan.exact,
            RouteChoice::Baseline => &plan.baseline.tour,
        })
    }

    pub fn active_geometry(&self) -> Option<&Polyline> {
        self.active_tour().map(|tour| &tour.geometry)
    }

    /// `(exact, baseline)` map layers; the inactive one is empty.
    pub fn display_layers(&self) -> (&Polyline, &Polyline) {
        static NONE: Polyline = Polyline::EMPTY;
        let Some(plan) = self.plan.as_ref() else {
            return (&NONE, &NONE);
        };
        match self.active {
            RouteChoice::Exact => (&plan.exact.geometry, &NONE),
            RouteChoice::Baseline => (&NONE, &plan.baseline.tour.geometry),
        }
    }

    pub fn exact_km(&self) -> Option<f64> {
        self.plan.as_ref().map(RoutePlan::exact_km)
    }

    pub fn baseline_distance(&self) -> Option<BaselineDistance> {
        self.plan.as_ref().map(|plan| plan.baseline.distance)
    }
}
