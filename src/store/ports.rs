use async_trait::async_trait;

use crate::{
    entities::{EntityId, Facility, Resident, Room},
    store::{error::StoreError, filter::QueryFilter, page::Page},
};

/// CRUD and filtered-query access to the remote entity API.
///
/// Create expects a record without an identifier; update and partial update
/// expect one. `find_*` resolves a missing record to `None`.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn query_rooms(&self, filter: &QueryFilter) -> Result<Page<Room>, StoreError>;
    async fn count_rooms(&self, filter: &QueryFilter) -> Result<u64, StoreError>;
    async fn find_room(&self, id: EntityId) -> Result<Option<Room>, StoreError>;
    async fn create_room(&self, room: Room) -> Result<Room, StoreError>;
    async fn update_room(&self, room: Room) -> Result<Room, StoreError>;
    async fn partial_update_room(&self, room: Room) -> Result<Room, StoreError>;
    async fn delete_room(&self, id: EntityId) -> Result<(), StoreError>;

    async fn query_residents(&self, filter: &QueryFilter) -> Result<Page<Resident>, StoreError>;
    async fn count_residents(&self, filter: &QueryFilter) -> Result<u64, StoreError>;
    async fn find_resident(&self, id: EntityId) -> Result<Option<Resident>, StoreError>;
    async fn create_resident(&self, resident: Resident) -> Result<Resident, StoreError>;
    async fn update_resident(&self, resident: Resident) -> Result<Resident, StoreError>;
    async fn partial_update_resident(&self, resident: Resident) -> Result<Resident, StoreError>;
    async fn delete_resident(&self, id: EntityId) -> Result<(), StoreError>;

    async fn query_facilities(&self, filter: &QueryFilter) -> Result<Page<Facility>, StoreError>;
    async fn count_facilities(&self, filter: &QueryFilter) -> Result<u64, StoreError>;
    async fn find_facility(&self, id: EntityId) -> Result<Option<Facility>, StoreError>;
    async fn create_facility(&self, facility: Facility) -> Result<Facility, StoreError>;
    async fn update_facility(&self, facility: Facility) -> Result<Facility, StoreError>;
    async fn partial_update_facility(&self, facility: Facility) -> Result<Facility, StoreError>;
    async fn delete_facility(&self, id: EntityId) -> Result<(), StoreError>;
}
