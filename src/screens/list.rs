use std::sync::Arc;

use crate::{
    entities::{EntityId, Resident},
    screens::{
        LoadOutcome,
        delete::{DeleteDialog, DeleteOutcome},
        lifecycle::{DisposeHandle, ScreenScope},
        record::StoredRecord,
    },
    store::{EntityStore, QueryFilter},
};

pub const RESIDENT_ROOM_FIELD: &str = "roomId";

/// List screen for one record type, optionally narrowed by a fixed filter.
pub struct ListScreen<T: StoredRecord> {
    store: Arc<dyn EntityStore>,
    scope: ScreenScope,
    filter: QueryFilter,
    records: Vec<T>,
    total_count: Option<u64>,
    is_loading: bool,
}

impl<T: StoredRecord> ListScreen<T> {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self::with_filter(store, QueryFilter::new())
    }

    pub fn with_filter(store: Arc<dyn EntityStore>, filter: QueryFilter) -> Self {
        Self {
            store,
            scope: ScreenScope::new(),
            filter,
            records: Vec::new(),
            total_count: None,
            is_loading: false,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn filter(&self) -> &QueryFilter {
        &self.filter
    }

    pub fn dispose_handle(&self) -> DisposeHandle {
        self.scope.handle()
    }

    pub fn dispose(&self) {
        self.scope.dispose();
    }

    /// Queries the records. When the response carries no total count the
    /// screen asks the count endpoint with the same filter; a failed count
    /// leaves the total unknown but still shows the records.
    pub async fn load(&mut self) -> LoadOutcome {
        let kind = T::KIND;
        self.is_loading = true;
        let result = self
            .scope
            .run(T::query(self.store.as_ref(), &self.filter))
            .await;

        let Some(result) = result else {
            tracing::debug!(target: "screens", entity = %kind, "list_result_discarded");
            return LoadOutcome::Discarded;
        };

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                self.is_loading = false;
                tracing::warn!(target: "screens", entity = %kind, error = %err, "list_load_failed");
                return LoadOutcome::Failed;
            }
        };

        let total_count = match page.total_count {
            Some(total) => Some(total),
            None => {
                let counted = self
                    .scope
                    .run(T::count(self.store.as_ref(), &self.filter))
                    .await;
                match counted {
                    None => {
                        tracing::debug!(target: "screens", entity = %kind, "list_result_discarded");
                        return LoadOutcome::Discarded;
                    }
                    Some(Ok(total)) => Some(total),
                    Some(Err(err)) => {
                        tracing::warn!(
                            target: "screens",
                            entity = %kind,
                            error = %err,
                            "list_count_failed"
                        );
                        None
                    }
                }
            }
        };

        self.is_loading = false;
        tracing::debug!(
            target: "screens",
            entity = %kind,
            records = page.items.len(),
            total_count = ?total_count,
            "list_loaded"
        );
        self.total_count = total_count;
        self.records = page.items;
        LoadOutcome::Loaded
    }

    pub fn delete_dialog(&self, record: T) -> DeleteDialog<T> {
        DeleteDialog::new(Arc::clone(&self.store), record)
    }

    /// Deletes after confirmation and reloads the list when the record is
    /// gone. Related records are left to the server.
    pub async fn delete(&mut self, record: T) -> DeleteOutcome {
        let mut dialog = self.delete_dialog(record);
        let outcome = dialog.confirm_delete().await;
        if outcome == DeleteOutcome::Deleted && !self.scope.is_disposed() {
            self.load().await;
        }
        outcome
    }
}

impl ListScreen<Resident> {
    /// Residents of one room, or all residents when `room_id` is absent.
    pub fn residents(store: Arc<dyn EntityStore>, room_id: Option<EntityId>) -> Self {
        match room_id {
            Some(room_id) => {
                Self::with_filter(store, QueryFilter::new().equals(RESIDENT_ROOM_FIELD, room_id))
            }
            None => Self::new(store),
        }
    }
}
