use serde::{Deserialize, Serialize};

use crate::entities::{
    resident::Resident,
    types::{EntityId, EntityKind, Identified},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roomno: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Back-reference populated by the server; Room never owns Residents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residents: Option<Vec<Resident>>,
}

impl Room {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn label(&self) -> String {
        match (&self.roomno, self.id) {
            (Some(roomno), _) => roomno.clone(),
            (None, Some(id)) => format!("#{id}"),
            (None, None) => "<unsaved>".to_string(),
        }
    }
}

impl Identified for Room {
    const KIND: EntityKind = EntityKind::Room;

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}
