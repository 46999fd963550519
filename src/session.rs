//! Per-session planning state.
//!
//! Holds the bins, the depot and the disposal site plus the last computed
//! plan. Sessions are plain values; nothing is shared between them.

use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::PlanError;
use crate::planner::{RoutePlan, RoutePlanner};
use crate::selection::{RouteChoice, RouteSelection};
use crate::traits::{Bin, BinId, BinStatus, Coordinate, RoadProvider};

#[derive(Debug, Clone)]
pub struct CollectionSession {
    bins: Vec<Bin>,
    next_id: u32,
    depot: Option<Coordinate>,
    disposal_site: Option<Coordinate>,
    selection: RouteSelection,
}

impl Default for CollectionSession {
    fn default() -> Self {
        Self {
            bins: Vec::new(),
            next_id: 1,
            depot: None,
            disposal_site: None,
            selection: RouteSelection::new(),
        }
    }
}

impl CollectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a clean bin and returns its id.
    ///
    /// Ids count up from 1 and are never handed out twice, even after a
    /// removal.
    pub fn place_bin(&mut self, location: Coordinate) -> BinId {
        let id = BinId(self.next_id);
        self.next_id += 1;
        self.bins.push(Bin::new(id, location, BinStatus::Clean));
        self.invalidate();
        id
    }

    /// Flips a bin between clean and needs-collection. Returns the new status.
    pub fn toggle_bin(&mut self, id: BinId) -> Option<BinStatus> {
        let bin = self.bins.iter_mut().find(|bin| bin.id == id)?;
        bin.status = bin.status.toggled();
        let status = bin.status;
        self.invalidate();
        Some(status)
    }

    pub fn remove_bin(&mut self, id: BinId) -> Option<Bin> {
        let position = self.bins.iter().position(|bin| bin.id == id)?;
        let removed = self.bins.remove(position);
        self.invalidate();
        Some(removed)
    }

    pub fn set_depot(&mut self, location: Coordinate) {
        self.depot = Some(location);
        self.invalidate();
    }

    pub fn clear_depot(&mut self) {
        self.depot = None;
        self.invalidate();
    }

    pub fn set_disposal_site(&mut self, location: Coordinate) {
        self.disposal_site = Some(location);
        self.invalidate();
    }

    pub fn clear_disposal_site(&mut self) {
        self.disposal_site = None;
        self.invalidate();
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn bin(&self, id: BinId) -> Option<&Bin> {
        self.bins.iter().find(|bin| bin.id == id)
    }

    pub fn flagged_bins(&self) -> impl Iterator<Item = &Bin> {
        self.bins.iter().filter(|bin| bin.needs_collection())
    }

    pub fn depot(&self) -> Option<Coordinate> {
        self.depot
    }

    pub fn disposal_site(&self) -> Option<Coordinate> {
        self.disposal_site
    }

    pub fn selection(&self) -> &RouteSelection {
        &self.selection
    }

    pub fn select_route(&mut self, choice: RouteChoice) {
        self.selection.select(choice);
    }

    /// Plans both tours and stores them.
    ///
    /// On error the stored selection is left exactly as it was.
    pub fn calculate_routes<P>(
        &mut self,
        planner: &RoutePlanner<P>,
        cancel: &CancelToken,
    ) -> Result<&RoutePlan, PlanError>
    where
        P: RoadProvider,
    {
        let plan = planner.plan(self.depot, self.disposal_site, &self.bins, cancel)?;
        Ok(self.selection.store(plan))
    }

    fn invalidate(&mut self) {
        if self.selection.plan().is_some() {
            debug!("inputs changed, dropping stored routes");
        }
        self.selection.clear();
    }
}
