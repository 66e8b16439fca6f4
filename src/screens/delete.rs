use std::sync::Arc;

use crate::{
    entities::Identified,
    screens::{lifecycle::ScreenScope, record::StoredRecord},
    store::{EntityStore, StoreError, error::invalid_request},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Dismissed,
    Failed(String),
    Discarded,
}

/// Confirmation step in front of a delete request.
pub struct DeleteDialog<T: StoredRecord> {
    store: Arc<dyn EntityStore>,
    scope: ScreenScope,
    record: T,
    closed: bool,
}

impl<T: StoredRecord> DeleteDialog<T> {
    pub fn new(store: Arc<dyn EntityStore>, record: T) -> Self {
        Self {
            store,
            scope: ScreenScope::new(),
            record,
            closed: false,
        }
    }

    pub fn record(&self) -> &T {
        &self.record
    }

    pub fn cancel(&mut self) -> DeleteOutcome {
        self.closed = true;
        DeleteOutcome::Dismissed
    }

    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        if self.closed {
            return DeleteOutcome::Dismissed;
        }

        let kind = T::KIND;
        let result = match self.record.id() {
            Some(id) => self.scope.run(T::delete(self.store.as_ref(), id)).await,
            None => Some(Err::<(), StoreError>(
                invalid_request(format!("cannot delete an unsaved {kind}")).with_entity(kind),
            )),
        };

        match result {
            None => DeleteOutcome::Discarded,
            Some(Ok(())) => {
                self.closed = true;
                DeleteOutcome::Deleted
            }
            Some(Err(err)) => {
                tracing::warn!(target: "screens", entity = %kind, error = %err, "delete_failed");
                DeleteOutcome::Failed(err.to_string())
            }
        }
    }
}
