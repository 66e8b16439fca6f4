use validator::Validate;

use crate::{
    entities::{EntityId, Facility, Resident, Room},
    screens::error::FormError,
};

/// Edit-form state for one record type: filled from a record, edited field
/// by field, turned back into a record on save.
pub trait RecordForm: Default {
    type Record;

    fn from_record(record: &Self::Record) -> Self;

    /// Builds the request body. Only required-field checks run here.
    fn to_record(&self) -> Result<Self::Record, FormError>;

    /// Sets a scalar field from text input. Relationship fields are set
    /// through the screen's selector instead.
    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), FormError>;
}

/// Forms carrying a Room selector.
pub trait RoomLinked {
    fn room(&self) -> Option<&Room>;
    fn set_room(&mut self, room: Option<Room>);
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RoomForm {
    pub id: Option<EntityId>,
    #[validate(required)]
    pub roomno: Option<String>,
    pub floor: Option<i32>,
    pub room_type: Option<String>,
}

impl RecordForm for RoomForm {
    type Record = Room;

    fn from_record(room: &Room) -> Self {
        Self {
            id: room.id,
            roomno: room.roomno.clone(),
            floor: room.floor,
            room_type: room.r#type.clone(),
        }
    }

    fn to_record(&self) -> Result<Room, FormError> {
        self.validate()?;
        Ok(Room {
            id: self.id,
            roomno: self.roomno.clone(),
            floor: self.floor,
            r#type: self.room_type.clone(),
            residents: None,
        })
    }

    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field {
            "roomno" => self.roomno = text_value(raw),
            "floor" => self.floor = parse_value(field, raw)?,
            "type" => self.room_type = text_value(raw),
            other => return Err(unknown_field("room", other)),
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ResidentForm {
    pub id: Option<EntityId>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    #[validate(required)]
    pub email: Option<String>,
    pub phonenumber: Option<String>,
    pub room: Option<Room>,
}

impl RecordForm for ResidentForm {
    type Record = Resident;

    fn from_record(resident: &Resident) -> Self {
        Self {
            id: resident.id,
            firstname: resident.firstname.clone(),
            lastname: resident.lastname.clone(),
            email: resident.email.clone(),
            phonenumber: resident.phonenumber.clone(),
            room: resident.room.clone(),
        }
    }

    fn to_record(&self) -> Result<Resident, FormError> {
        self.validate()?;
        Ok(Resident {
            id: self.id,
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            email: self.email.clone(),
            phonenumber: self.phonenumber.clone(),
            room: self.room.clone(),
        })
    }

    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field {
            "firstname" => self.firstname = text_value(raw),
            "lastname" => self.lastname = text_value(raw),
            "email" => self.email = text_value(raw),
            "phonenumber" => self.phonenumber = text_value(raw),
            other => return Err(unknown_field("resident", other)),
        }
        Ok(())
    }
}

impl RoomLinked for ResidentForm {
    fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    fn set_room(&mut self, room: Option<Room>) {
        self.room = room;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FacilityForm {
    pub id: Option<EntityId>,
    pub a_c: Option<bool>,
    pub parking: Option<bool>,
    pub wifi: Option<bool>,
    pub room: Option<Room>,
}

impl Default for FacilityForm {
    fn default() -> Self {
        Self::from_record(&Facility::new())
    }
}

impl RecordForm for FacilityForm {
    type Record = Facility;

    fn from_record(facility: &Facility) -> Self {
        Self {
            id: facility.id,
            a_c: facility.a_c,
            parking: facility.parking,
            wifi: facility.wifi,
            room: facility.room.clone(),
        }
    }

    /// Flags left unset are saved as `false`.
    fn to_record(&self) -> Result<Facility, FormError> {
        Ok(Facility {
            id: self.id,
            a_c: Some(self.a_c.unwrap_or(false)),
            parking: Some(self.parking.unwrap_or(false)),
            wifi: Some(self.wifi.unwrap_or(false)),
            room: self.room.clone(),
        })
    }

    fn set_field(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field {
            "aC" => self.a_c = parse_value(field, raw)?,
            "parking" => self.parking = parse_value(field, raw)?,
            "wifi" => self.wifi = parse_value(field, raw)?,
            other => return Err(unknown_field("facility", other)),
        }
        Ok(())
    }
}

impl RoomLinked for FacilityForm {
    fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    fn set_room(&mut self, room: Option<Room>) {
        self.room = room;
    }
}

/// Blank input clears the field.
fn text_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_value<T>(field: &str, raw: &str) -> Result<Option<T>, FormError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match text_value(raw) {
        None => Ok(None),
        Some(text) => text
            .parse::<T>()
            .map(Some)
            .map_err(|err| FormError::invalid_value(field, err.to_string())),
    }
}

fn unknown_field(entity: &str, field: &str) -> FormError {
    FormError::invalid_value(field, format!("{entity} has no editable field named {field}"))
}
