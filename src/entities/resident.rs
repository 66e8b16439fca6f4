use serde::{Deserialize, Serialize};

use crate::entities::{
    room::Room,
    types::{EntityId, EntityKind, Identified},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonenumber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
}

impl Resident {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect();
        if parts.is_empty() {
            self.email.clone().unwrap_or_default()
        } else {
            parts.join(" ")
        }
    }
}

impl Identified for Resident {
    const KIND: EntityKind = EntityKind::Resident;

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}
