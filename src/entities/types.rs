use std::fmt;

use serde::{Deserialize, Serialize};

pub type EntityId = i64;

/// Records with a server-assigned identifier. An absent identifier marks a
/// record that has not been persisted yet.
pub trait Identified {
    const KIND: EntityKind;

    fn id(&self) -> Option<EntityId>;

    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Room,
    Resident,
    Facility,
}

impl EntityKind {
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Room => "room",
            EntityKind::Resident => "resident",
            EntityKind::Facility => "facility",
        }
    }

    /// Collection segment under `/api`.
    pub fn collection_path(self) -> &'static str {
        match self {
            EntityKind::Room => "rooms",
            EntityKind::Resident => "residents",
            EntityKind::Facility => "facilities",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
