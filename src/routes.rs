use std::fmt;

use thiserror::Error;

use crate::entities::{EntityId, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    List(EntityKind),
    /// Residents living in one Room.
    RoomResidents(EntityId),
    New(EntityKind),
    View(EntityKind, EntityId),
    Edit(EntityKind, EntityId),
    Delete(EntityKind, EntityId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    Unknown(String),
    #[error("invalid record id in route {path}: {segment}")]
    InvalidId { path: String, segment: String },
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim().trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let unknown = || RouteError::Unknown(path.to_string());
        let parse_id = |segment: &str| {
            segment
                .parse::<EntityId>()
                .map_err(|_| RouteError::InvalidId {
                    path: path.to_string(),
                    segment: segment.to_string(),
                })
        };

        match segments.as_slice() {
            [] | ["home"] => Ok(Route::Home),
            [entity, rest @ ..] => {
                let kind = route_kind(entity).ok_or_else(unknown)?;
                match rest {
                    [] => Ok(Route::List(kind)),
                    ["new"] => Ok(Route::New(kind)),
                    [id] if kind == EntityKind::Resident => Ok(Route::RoomResidents(parse_id(id)?)),
                    [id, "view"] => Ok(Route::View(kind, parse_id(id)?)),
                    [id, "edit"] => Ok(Route::Edit(kind, parse_id(id)?)),
                    [id, "delete"] => Ok(Route::Delete(kind, parse_id(id)?)),
                    _ => Err(unknown()),
                }
            }
        }
    }
}

fn route_kind(segment: &str) -> Option<EntityKind> {
    match segment {
        "room" => Some(EntityKind::Room),
        "resident" => Some(EntityKind::Resident),
        "facility" => Some(EntityKind::Facility),
        _ => None,
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("home"),
            Route::List(kind) => write!(f, "{kind}"),
            Route::RoomResidents(room_id) => write!(f, "{}/{room_id}", EntityKind::Resident),
            Route::New(kind) => write!(f, "{kind}/new"),
            Route::View(kind, id) => write!(f, "{kind}/{id}/view"),
            Route::Edit(kind, id) => write!(f, "{kind}/{id}/edit"),
            Route::Delete(kind, id) => write!(f, "{kind}/{id}/delete"),
        }
    }
}
