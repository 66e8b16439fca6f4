//! Keeps relationship selectors consistent with the value already bound to
//! the record under edit.
//!
//! Candidate queries are often narrowed server-side ("rooms without a
//! facility"), which drops the room the edited record currently points at.
//! The selector must still offer that room, exactly once.

use crate::entities::{Identified, Room};

/// Returns `candidates` with `current` prepended when it is present and no
/// candidate shares its identifier. A `current` without an identifier never
/// matches and is always prepended.
pub fn add_to_collection_if_missing<T>(candidates: &[T], current: Option<&T>) -> Vec<T>
where
    T: Identified + Clone,
{
    let Some(current) = current else {
        return candidates.to_vec();
    };

    if contains_identifier(candidates, current) {
        return candidates.to_vec();
    }

    let mut reconciled = Vec::with_capacity(candidates.len() + 1);
    reconciled.push(current.clone());
    reconciled.extend_from_slice(candidates);
    reconciled
}

pub fn add_room_to_collection_if_missing(rooms: &[Room], room: Option<&Room>) -> Vec<Room> {
    add_to_collection_if_missing(rooms, room)
}

fn contains_identifier<T: Identified>(collection: &[T], current: &T) -> bool {
    match current.id() {
        Some(id) => collection.iter().any(|item| item.id() == Some(id)),
        None => false,
    }
}
