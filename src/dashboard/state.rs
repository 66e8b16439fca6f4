use crate::{dashboard::amenity::Amenity, entities::Room};

/// Amenity filter shown on the dashboard.
///
/// `Loading` remembers the last settled state so a failed query can fall
/// back to it. `previous` is never itself `Loading`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardFilter {
    #[default]
    Unfiltered,
    Loading {
        amenity: Amenity,
        previous: Box<DashboardFilter>,
    },
    Filtered {
        amenity: Amenity,
        rooms: Vec<Room>,
    },
}

impl DashboardFilter {
    pub fn amenity(&self) -> Option<Amenity> {
        match self {
            DashboardFilter::Unfiltered => None,
            DashboardFilter::Loading { amenity, .. } | DashboardFilter::Filtered { amenity, .. } => {
                Some(*amenity)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardFilter::Loading { .. })
    }

    /// Rooms of the settled filtered state this value shows, if any.
    pub fn filtered_rooms(&self) -> Option<&[Room]> {
        match self {
            DashboardFilter::Unfiltered => None,
            DashboardFilter::Loading { previous, .. } => previous.filtered_rooms(),
            DashboardFilter::Filtered { rooms, .. } => Some(rooms),
        }
    }

    pub fn begin(&mut self, amenity: Amenity) {
        let previous = match std::mem::take(self) {
            DashboardFilter::Loading { previous, .. } => previous,
            settled => Box::new(settled),
        };
        *self = DashboardFilter::Loading { amenity, previous };
    }

    /// Applies a query result. Returns `false` and leaves the state alone
    /// when no query for `amenity` is pending.
    pub fn resolve(&mut self, amenity: Amenity, rooms: Vec<Room>) -> bool {
        if self.pending(amenity) {
            *self = DashboardFilter::Filtered { amenity, rooms };
            true
        } else {
            false
        }
    }

    pub fn fail(&mut self, amenity: Amenity) -> bool {
        match std::mem::take(self) {
            DashboardFilter::Loading {
                amenity: pending,
                previous,
            } if pending == amenity => {
                *self = *previous;
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    fn pending(&self, amenity: Amenity) -> bool {
        matches!(self, DashboardFilter::Loading { amenity: pending, .. } if *pending == amenity)
    }

    pub fn clear(&mut self) {
        *self = DashboardFilter::Unfiltered;
    }
}
