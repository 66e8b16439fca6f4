pub mod delete;
pub mod detail;
pub mod edit;
pub mod error;
pub mod forms;
pub mod lifecycle;
pub mod list;
pub mod record;

pub use delete::{DeleteDialog, DeleteOutcome};
pub use detail::DetailScreen;
pub use edit::{
    EditScreen, FacilityEditScreen, LinkedEditScreen, ResidentEditScreen, RoomEditScreen,
    SaveOutcome,
};
pub use error::FormError;
pub use forms::{FacilityForm, RecordForm, ResidentForm, RoomForm, RoomLinked};
pub use lifecycle::{DisposeHandle, ScreenScope};
pub use list::ListScreen;
pub use record::StoredRecord;

/// Result of a screen's read request as seen by the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    NotFound,
    /// Request failed; previous data is kept.
    Failed,
    /// Screen was disposed before the response arrived; nothing applied.
    Discarded,
}
