use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::QueryFilter;

/// Facility field holding the link to the owning Room, as named by the
/// query API.
pub const ROOM_LINK_FIELD: &str = "roomId";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amenity {
    #[serde(rename = "aC")]
    AirConditioning,
    #[serde(rename = "wifi")]
    Wifi,
    #[serde(rename = "parking")]
    Parking,
}

impl Amenity {
    pub const ALL: [Amenity; 3] = [Amenity::AirConditioning, Amenity::Wifi, Amenity::Parking];

    /// Selector token, which is also the Facility field name in queries.
    pub fn token(self) -> &'static str {
        match self {
            Amenity::AirConditioning => "aC",
            Amenity::Wifi => "wifi",
            Amenity::Parking => "parking",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|amenity| amenity.token() == token.trim())
    }

    /// Facilities with this flag set and linked to a Room.
    pub fn facility_filter(self) -> QueryFilter {
        QueryFilter::new()
            .in_values(self.token(), [true])
            .greater_than(ROOM_LINK_FIELD, 0)
            .specified(ROOM_LINK_FIELD, true)
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// `None` for an absent or unrecognised selector, meaning no filter.
pub fn parse_amenity(selector: Option<&str>) -> Option<Amenity> {
    selector.and_then(Amenity::from_token)
}
