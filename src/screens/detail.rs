use std::sync::Arc;

use crate::{
    entities::EntityId,
    screens::{LoadOutcome, lifecycle::ScreenScope, record::StoredRecord},
    store::EntityStore,
};

/// Read-only view of one record.
pub struct DetailScreen<T: StoredRecord> {
    store: Arc<dyn EntityStore>,
    scope: ScreenScope,
    record: Option<T>,
}

impl<T: StoredRecord> DetailScreen<T> {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            scope: ScreenScope::new(),
            record: None,
        }
    }

    pub fn record(&self) -> Option<&T> {
        self.record.as_ref()
    }

    pub async fn load(&mut self, id: EntityId) -> LoadOutcome {
        match self.scope.run(T::find(self.store.as_ref(), id)).await {
            None => LoadOutcome::Discarded,
            Some(Ok(Some(record))) => {
                self.record = Some(record);
                LoadOutcome::Loaded
            }
            Some(Ok(None)) => LoadOutcome::NotFound,
            Some(Err(err)) => {
                let kind = T::KIND;
                tracing::warn!(
                    target: "screens",
                    entity = %kind,
                    id,
                    error = %err,
                    "detail_load_failed"
                );
                LoadOutcome::Failed
            }
        }
    }
}
