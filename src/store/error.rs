use serde::{Deserialize, Serialize};

use crate::entities::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorKind {
    InvalidRequest,
    Authentication,
    Authorization,
    NotFound,
    Transport,
    Server,
    Protocol,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub entity: Option<EntityKind>,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            entity: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_entity(mut self, entity: EntityKind) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == StoreErrorKind::NotFound
    }
}

pub fn invalid_request(message: impl Into<String>) -> StoreError {
    StoreError::new(StoreErrorKind::InvalidRequest, message)
}

pub fn transport_error(message: impl Into<String>) -> StoreError {
    StoreError::new(StoreErrorKind::Transport, message)
}

pub fn protocol_violation(message: impl Into<String>) -> StoreError {
    StoreError::new(StoreErrorKind::Protocol, message)
}

/// Maps a non-success HTTP status to a store error; the body is truncated so
/// server stack traces do not flood the logs.
pub fn map_http_error(status: u16, entity: EntityKind, body: &str) -> StoreError {
    let normalized_body = body.chars().take(240).collect::<String>();

    let mut err = match status {
        401 => StoreError::new(StoreErrorKind::Authentication, "authentication failed"),
        403 => StoreError::new(StoreErrorKind::Authorization, "authorization failed"),
        404 => StoreError::new(StoreErrorKind::NotFound, format!("{entity} not found")),
        400..=499 => StoreError::new(
            StoreErrorKind::InvalidRequest,
            format!("api rejected {entity} request with status {status}"),
        ),
        _ => StoreError::new(
            StoreErrorKind::Server,
            format!("api returned status {status} for {entity} request"),
        ),
    };

    err = err.with_status(status).with_entity(entity);

    if !normalized_body.is_empty() {
        err.message = format!("{}: {}", err.message, normalized_body);
    }

    err
}
