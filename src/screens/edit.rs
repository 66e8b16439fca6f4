use std::sync::Arc;

use futures_util::future::join;

use crate::{
    entities::{EntityId, Identified, Room},
    relationship::add_room_to_collection_if_missing,
    screens::{
        LoadOutcome,
        error::FormError,
        forms::{FacilityForm, RecordForm, ResidentForm, RoomForm, RoomLinked},
        lifecycle::{DisposeHandle, ScreenScope},
        record::StoredRecord,
    },
    store::{EntityStore, QueryFilter, StoreError, changed_fields},
};

/// Facility field naming the Room link; `specified=false` selects Rooms that
/// no Facility holds yet.
pub const ROOM_FACILITY_FIELD: &str = "facilityId";

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<T> {
    Saved(T),
    /// Required fields missing; nothing was sent.
    Invalid(FormError),
    /// Request failed; the form keeps the entered data.
    Failed(String),
    Discarded,
}

impl<T> SaveOutcome<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

/// Create/edit screen for one record: form state, saving flag and the
/// create-or-update decision.
pub struct EditScreen<F>
where
    F: RecordForm,
    F::Record: StoredRecord,
{
    store: Arc<dyn EntityStore>,
    scope: ScreenScope,
    form: F,
    /// Last record bound from the server; the base for `save_changes`.
    bound: Option<F::Record>,
    is_saving: bool,
}

pub type RoomEditScreen = EditScreen<RoomForm>;

impl<F> EditScreen<F>
where
    F: RecordForm,
    F::Record: StoredRecord,
{
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            scope: ScreenScope::new(),
            form: F::default(),
            bound: None,
            is_saving: false,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn dispose_handle(&self) -> DisposeHandle {
        self.scope.handle()
    }

    pub fn dispose(&self) {
        self.scope.dispose();
    }

    pub fn update_form(&mut self, record: &F::Record) {
        self.form = F::from_record(record);
        self.bound = Some(record.clone());
    }

    pub async fn load(&mut self, id: EntityId) -> LoadOutcome {
        let result = self.scope.run(<F::Record as StoredRecord>::find(self.store.as_ref(), id)).await;
        self.apply_loaded(id, result)
    }

    fn apply_loaded(
        &mut self,
        id: EntityId,
        result: Option<Result<Option<F::Record>, StoreError>>,
    ) -> LoadOutcome {
        let kind = <F::Record as Identified>::KIND;
        match result {
            None => LoadOutcome::Discarded,
            Some(Ok(Some(record))) => {
                self.update_form(&record);
                LoadOutcome::Loaded
            }
            Some(Ok(None)) => {
                tracing::warn!(target: "screens", entity = %kind, id, "edit_record_not_found");
                LoadOutcome::NotFound
            }
            Some(Err(err)) => {
                tracing::warn!(
                    target: "screens",
                    entity = %kind,
                    id,
                    error = %err,
                    "edit_record_load_failed"
                );
                LoadOutcome::Failed
            }
        }
    }

    /// Creates when the form has no identifier, updates otherwise. The
    /// saving flag is cleared however the request ends.
    pub async fn save(&mut self) -> SaveOutcome<F::Record> {
        let record = match self.form.to_record() {
            Ok(record) => record,
            Err(err) => return SaveOutcome::Invalid(err),
        };

        self.is_saving = true;
        let result = self
            .scope
            .run(<F::Record as StoredRecord>::persist(self.store.as_ref(), record))
            .await;
        self.is_saving = false;
        self.finish_save(result)
    }

    /// Sends only the fields edited since the record was bound, as a merge
    /// patch. A form never bound to a stored record is saved in full.
    pub async fn save_changes(&mut self) -> SaveOutcome<F::Record> {
        let Some(bound) = self.bound.clone().filter(|bound| !bound.is_new()) else {
            return self.save().await;
        };
        let record = match self.form.to_record() {
            Ok(record) => record,
            Err(err) => return SaveOutcome::Invalid(err),
        };
        let changes = match changed_fields(&bound, &record) {
            Ok(changes) => changes,
            Err(err) => return SaveOutcome::Failed(err.to_string()),
        };

        self.is_saving = true;
        let result = self
            .scope
            .run(<F::Record as StoredRecord>::partial_update(self.store.as_ref(), changes))
            .await;
        self.is_saving = false;
        self.finish_save(result)
    }

    fn finish_save(
        &mut self,
        result: Option<Result<F::Record, StoreError>>,
    ) -> SaveOutcome<F::Record> {
        let kind = <F::Record as Identified>::KIND;
        match result {
            None => SaveOutcome::Discarded,
            Some(Ok(saved)) => {
                tracing::info!(target: "screens", entity = %kind, id = ?saved.id(), "record_saved");
                self.bound = Some(saved.clone());
                SaveOutcome::Saved(saved)
            }
            Some(Err(err)) => {
                tracing::warn!(target: "screens", entity = %kind, error = %err, "save_failed");
                SaveOutcome::Failed(err.to_string())
            }
        }
    }
}

/// Edit screen whose form points at one Room through a selector.
///
/// The selector collection is reconciled twice with the same rule: when a
/// record is bound to the form, and again when the candidate query returns.
pub struct LinkedEditScreen<F>
where
    F: RecordForm + RoomLinked,
    F::Record: StoredRecord,
{
    edit: EditScreen<F>,
    candidate_filter: QueryFilter,
    rooms: Vec<Room>,
}

/// Residents may share a Room, so every Room is a candidate.
pub type ResidentEditScreen = LinkedEditScreen<ResidentForm>;

/// A Room holds at most one Facility; only free Rooms are candidates.
pub type FacilityEditScreen = LinkedEditScreen<FacilityForm>;

impl LinkedEditScreen<ResidentForm> {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self::with_candidate_filter(store, QueryFilter::new())
    }
}

impl LinkedEditScreen<FacilityForm> {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self::with_candidate_filter(
            store,
            QueryFilter::new().specified(ROOM_FACILITY_FIELD, false),
        )
    }
}

impl<F> LinkedEditScreen<F>
where
    F: RecordForm + RoomLinked,
    F::Record: StoredRecord,
{
    pub fn with_candidate_filter(store: Arc<dyn EntityStore>, candidate_filter: QueryFilter) -> Self {
        Self {
            edit: EditScreen::new(store),
            candidate_filter,
            rooms: Vec::new(),
        }
    }

    pub fn form(&self) -> &F {
        self.edit.form()
    }

    pub fn form_mut(&mut self) -> &mut F {
        self.edit.form_mut()
    }

    pub fn is_saving(&self) -> bool {
        self.edit.is_saving()
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn candidate_filter(&self) -> &QueryFilter {
        &self.candidate_filter
    }

    pub fn dispose_handle(&self) -> DisposeHandle {
        self.edit.dispose_handle()
    }

    pub fn dispose(&self) {
        self.edit.dispose();
    }

    /// Binds `record` to the form and seeds the selector with its Room
    /// before any candidate query has answered.
    pub fn update_form(&mut self, record: &F::Record) {
        self.edit.update_form(record);
        self.rooms = add_room_to_collection_if_missing(&self.rooms, self.edit.form().room());
    }

    /// Replaces the selector collection with freshly fetched candidates,
    /// keeping the Room currently bound to the form.
    pub fn apply_room_candidates(&mut self, candidates: Vec<Room>) {
        self.rooms = add_room_to_collection_if_missing(&candidates, self.edit.form().room());
    }

    /// Loads the record (when editing) and the Room candidates. Both
    /// requests run concurrently; candidates are reconciled only after the
    /// record, if any, is bound.
    pub async fn open(&mut self, id: Option<EntityId>) -> LoadOutcome {
        let Some(id) = id else {
            return self.load_relationships_options().await;
        };

        let store = Arc::clone(&self.edit.store);
        let (record, candidates) = {
            let scope = &self.edit.scope;
            join(
                scope.run(<F::Record as StoredRecord>::find(store.as_ref(), id)),
                scope.run(store.query_rooms(&self.candidate_filter)),
            )
            .await
        };
        if self.edit.scope.is_disposed() {
            return LoadOutcome::Discarded;
        }

        let outcome = self.edit.apply_loaded(id, record);
        if let LoadOutcome::Loaded = outcome {
            self.rooms = add_room_to_collection_if_missing(&self.rooms, self.edit.form().room());
        }
        match candidates {
            None => return LoadOutcome::Discarded,
            Some(Ok(page)) => self.apply_room_candidates(page.items),
            Some(Err(err)) => {
                tracing::warn!(target: "screens", error = %err, "room_candidates_load_failed");
            }
        }
        outcome
    }

    pub async fn load_relationships_options(&mut self) -> LoadOutcome {
        let store = Arc::clone(&self.edit.store);
        let result = self
            .edit
            .scope
            .run(store.query_rooms(&self.candidate_filter))
            .await;

        match result {
            None => LoadOutcome::Discarded,
            Some(Ok(page)) => {
                self.apply_room_candidates(page.items);
                LoadOutcome::Loaded
            }
            Some(Err(err)) => {
                tracing::warn!(target: "screens", error = %err, "room_candidates_load_failed");
                LoadOutcome::Failed
            }
        }
    }

    /// Points the form at a Room from the selector, or clears the link.
    pub fn select_room(&mut self, id: Option<EntityId>) -> Result<(), FormError> {
        let room = match id {
            None => None,
            Some(id) => Some(
                self.rooms
                    .iter()
                    .find(|room| room.id == Some(id))
                    .cloned()
                    .ok_or_else(|| {
                        FormError::invalid_value("room", format!("room {id} is not selectable"))
                    })?,
            ),
        };
        self.edit.form_mut().set_room(room);
        Ok(())
    }

    pub async fn save(&mut self) -> SaveOutcome<F::Record> {
        self.edit.save().await
    }

    pub async fn save_changes(&mut self) -> SaveOutcome<F::Record> {
        self.edit.save_changes().await
    }
}
