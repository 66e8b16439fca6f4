use std::sync::Arc;

use crate::{
    dashboard::{aggregator::project_rooms, amenity::parse_amenity, state::DashboardFilter},
    entities::{EntityKind, Facility, Room},
    routes::Route,
    screens::{DisposeHandle, LoadOutcome, ScreenScope},
    store::{EntityStore, QueryFilter},
};

/// Home screen: all Rooms, or the Rooms whose Facility offers one amenity.
pub struct Dashboard {
    store: Arc<dyn EntityStore>,
    scope: ScreenScope,
    all_rooms: Vec<Room>,
    filter: DashboardFilter,
    is_loading: bool,
}

impl Dashboard {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            scope: ScreenScope::new(),
            all_rooms: Vec::new(),
            filter: DashboardFilter::Unfiltered,
            is_loading: false,
        }
    }

    pub fn filter(&self) -> &DashboardFilter {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading || self.filter.is_loading()
    }

    /// Rooms currently on display. While a filter query is pending the last
    /// settled list stays visible.
    pub fn rooms(&self) -> &[Room] {
        self.filter.filtered_rooms().unwrap_or(&self.all_rooms)
    }

    pub fn dispose_handle(&self) -> DisposeHandle {
        self.scope.handle()
    }

    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Plain Room query backing the unfiltered view.
    pub async fn load(&mut self) -> LoadOutcome {
        self.is_loading = true;
        let result = self
            .scope
            .run(self.store.query_rooms(&QueryFilter::new()))
            .await;
        let Some(result) = result else {
            return LoadOutcome::Discarded;
        };

        self.is_loading = false;
        match result {
            Ok(page) => {
                tracing::debug!(target: "dashboard", rooms = page.items.len(), "dashboard_rooms_loaded");
                self.all_rooms = page.items;
                LoadOutcome::Loaded
            }
            Err(err) => {
                tracing::warn!(target: "dashboard", error = %err, "dashboard_rooms_load_failed");
                LoadOutcome::Failed
            }
        }
    }

    /// Applies an amenity selector. Absent or unrecognised selectors clear
    /// the filter and re-issue the plain Room query.
    ///
    /// Clearing moves straight to `Unfiltered` before that query runs. If it
    /// then fails, the last `all_rooms` stays on screen (empty when never
    /// loaded), not the filtered list that was showing before.
    pub async fn apply_filter(&mut self, selector: Option<&str>) -> LoadOutcome {
        let Some(amenity) = parse_amenity(selector) else {
            if let Some(selector) = selector {
                tracing::debug!(target: "dashboard", selector, "dashboard_selector_unrecognised");
            }
            self.filter.clear();
            return self.load().await;
        };

        self.filter.begin(amenity);
        let result = self
            .scope
            .run(self.store.query_facilities(&amenity.facility_filter()))
            .await;
        let Some(result) = result else {
            return LoadOutcome::Discarded;
        };

        match result {
            Ok(page) => {
                let rooms = project_rooms(amenity, &page.items);
                tracing::info!(
                    target: "dashboard",
                    amenity = %amenity,
                    facilities = page.items.len(),
                    rooms = rooms.len(),
                    "dashboard_filter_applied"
                );
                self.filter.resolve(amenity, rooms);
                LoadOutcome::Loaded
            }
            Err(err) => {
                tracing::warn!(
                    target: "dashboard",
                    amenity = %amenity,
                    error = %err,
                    "dashboard_filter_failed"
                );
                self.filter.fail(amenity);
                LoadOutcome::Failed
            }
        }
    }

    pub fn residents_route(room: &Room) -> Option<Route> {
        room.id.map(Route::RoomResidents)
    }

    pub fn facility_route(facility: &Facility) -> Option<Route> {
        facility
            .id
            .map(|id| Route::View(EntityKind::Facility, id))
    }
}
