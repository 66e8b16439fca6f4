pub mod facility;
pub mod resident;
pub mod room;
pub mod types;

pub use facility::Facility;
pub use resident::Resident;
pub use room::Room;
pub use types::{EntityId, EntityKind, Identified};
