//! One-line text rendering of records for the command-line front end.

use crate::{
    dashboard::Amenity,
    entities::{EntityId, Facility, Resident, Room},
};

pub trait Summary {
    fn summary(&self) -> String;
}

fn id_text(id: Option<EntityId>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

impl Summary for Room {
    fn summary(&self) -> String {
        let mut line = format!("{:>6}  {}", id_text(self.id), self.label());
        if let Some(floor) = self.floor {
            line.push_str(&format!("  floor {floor}"));
        }
        if let Some(kind) = &self.r#type {
            line.push_str(&format!("  [{kind}]"));
        }
        line
    }
}

impl Summary for Resident {
    fn summary(&self) -> String {
        let mut line = format!("{:>6}  {}", id_text(self.id), self.display_name());
        if let Some(email) = &self.email {
            line.push_str(&format!("  <{email}>"));
        }
        if let Some(room) = &self.room {
            line.push_str(&format!("  room {}", room.label()));
        }
        line
    }
}

impl Summary for Facility {
    fn summary(&self) -> String {
        let amenities: Vec<&str> = Amenity::ALL
            .into_iter()
            .filter(|amenity| self.has_amenity(*amenity))
            .map(Amenity::token)
            .collect();
        let amenities = if amenities.is_empty() {
            "none".to_string()
        } else {
            amenities.join(",")
        };
        let room = self
            .room
            .as_ref()
            .map_or_else(|| "unassigned".to_string(), Room::label);
        format!("{:>6}  {amenities}  room {room}", id_text(self.id))
    }
}
