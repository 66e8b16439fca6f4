use serde::{Deserialize, Serialize};

use crate::{
    dashboard::amenity::Amenity,
    entities::{
        room::Room,
        types::{EntityId, EntityKind, Identified},
    },
};

/// Amenity flags are `Some(false)` on a freshly built record but may arrive
/// as `null` from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, rename = "aC")]
    pub a_c: Option<bool>,
    #[serde(default)]
    pub parking: Option<bool>,
    #[serde(default)]
    pub wifi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
}

impl Facility {
    pub fn new() -> Self {
        Self {
            id: None,
            a_c: Some(false),
            parking: Some(false),
            wifi: Some(false),
            room: None,
        }
    }

    pub fn with_id(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Self::new()
        }
    }

    pub fn flag(&self, amenity: Amenity) -> Option<bool> {
        match amenity {
            Amenity::AirConditioning => self.a_c,
            Amenity::Parking => self.parking,
            Amenity::Wifi => self.wifi,
        }
    }

    pub fn has_amenity(&self, amenity: Amenity) -> bool {
        match self.flag(amenity) {
            Some(value) => value,
            None => false,
        }
    }
}

impl Default for Facility {
    fn default() -> Self {
        Self::new()
    }
}

impl Identified for Facility {
    const KIND: EntityKind = EntityKind::Facility;

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}
