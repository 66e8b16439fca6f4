use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    entities::{EntityId, Facility, Identified, Resident, Room},
    store::{EntityStore, Page, QueryFilter, StoreError},
};

/// Routes generic screen code to the per-entity store operations.
#[async_trait]
pub trait StoredRecord:
    Identified + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    async fn query(
        store: &dyn EntityStore,
        filter: &QueryFilter,
    ) -> Result<Page<Self>, StoreError>;

    async fn count(store: &dyn EntityStore, filter: &QueryFilter) -> Result<u64, StoreError>;

    async fn find(store: &dyn EntityStore, id: EntityId) -> Result<Option<Self>, StoreError>;

    async fn create(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError>;

    async fn update(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError>;

    /// Merge-patch update; `None` fields are left as stored.
    async fn partial_update(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError>;

    async fn delete(store: &dyn EntityStore, id: EntityId) -> Result<(), StoreError>;

    /// Create for a new record, update for a persisted one.
    async fn persist(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        if record.is_new() {
            Self::create(store, record).await
        } else {
            Self::update(store, record).await
        }
    }
}

#[async_trait]
impl StoredRecord for Room {
    async fn query(
        store: &dyn EntityStore,
        filter: &QueryFilter,
    ) -> Result<Page<Self>, StoreError> {
        store.query_rooms(filter).await
    }

    async fn count(store: &dyn EntityStore, filter: &QueryFilter) -> Result<u64, StoreError> {
        store.count_rooms(filter).await
    }

    async fn find(store: &dyn EntityStore, id: EntityId) -> Result<Option<Self>, StoreError> {
        store.find_room(id).await
    }

    async fn create(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        store.create_room(record).await
    }

    async fn update(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        store.update_room(record).await
    }

    async fn partial_update(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        store.partial_update_room(record).await
    }

    async fn delete(store: &dyn EntityStore, id: EntityId) -> Result<(), StoreError> {
        store.delete_room(id).await
    }
}

#[async_trait]
impl StoredRecord for Resident {
    async fn query(
        store: &dyn EntityStore,
        filter: &QueryFilter,
    ) -> Result<Page<Self>, StoreError> {
        store.query_residents(filter).await
    }

    async fn count(store: &dyn EntityStore, filter: &QueryFilter) -> Result<u64, StoreError> {
        store.count_residents(filter).await
    }

    async fn find(store: &dyn EntityStore, id: EntityId) -> Result<Option<Self>, StoreError> {
        store.find_resident(id).await
    }

    async fn create(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        store.create_resident(record).await
    }

    async fn update(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        store.update_resident(record).await
    }

    async fn partial_update(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        store.partial_update_resident(record).await
    }

    async fn delete(store: &dyn EntityStore, id: EntityId) -> Result<(), StoreError> {
        store.delete_resident(id).await
    }
}

#[async_trait]
impl StoredRecord for Facility {
    async fn query(
        store: &dyn EntityStore,
        filter: &QueryFilter,
    ) -> Result<Page<Self>, StoreError> {
        store.query_facilities(filter).await
    }

    async fn count(store: &dyn EntityStore, filter: &QueryFilter) -> Result<u64, StoreError> {
        store.count_facilities(filter).await
    }

    async fn find(store: &dyn EntityStore, id: EntityId) -> Result<Option<Self>, StoreError> {
        store.find_facility(id).await
    }

    async fn create(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        store.create_facility(record).await
    }

    async fn update(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        store.update_facility(record).await
    }

    async fn partial_update(store: &dyn EntityStore, record: Self) -> Result<Self, StoreError> {
        store.partial_update_facility(record).await
    }

    async fn delete(store: &dyn EntityStore, id: EntityId) -> Result<(), StoreError> {
        store.delete_facility(id).await
    }
}
