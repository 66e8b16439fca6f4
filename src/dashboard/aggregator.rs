use crate::{
    dashboard::amenity::Amenity,
    entities::{Facility, Room},
};

/// Projects Facilities onto their owning Rooms, in Facility order.
///
/// The server query already narrows by flag and room link; both conditions
/// are re-checked here so a lenient server cannot leak unflagged or unlinked
/// Facilities into the dashboard. A missing flag counts as `false`. Rooms
/// shared by several matching Facilities appear once per Facility.
pub fn project_rooms(amenity: Amenity, facilities: &[Facility]) -> Vec<Room> {
    facilities
        .iter()
        .filter(|facility| facility.has_amenity(amenity))
        .filter_map(|facility| facility.room.clone())
        .collect()
}
