use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, header};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    config::ApiConfig,
    entities::{EntityId, EntityKind, Facility, Identified, Resident, Room},
    store::{
        credentials::{ResolvedCredential, resolve_credential},
        error::{
            StoreError, invalid_request, map_http_error, protocol_violation, transport_error,
        },
        filter::QueryFilter,
        page::{Page, total_count_from_headers},
        ports::EntityStore,
    },
};

const MERGE_PATCH_CONTENT_TYPE: &str = "application/merge-patch+json";

trait Record: Identified + Serialize + DeserializeOwned + Send + Sync {}

impl<T> Record for T where T: Identified + Serialize + DeserializeOwned + Send + Sync {}

/// `EntityStore` over the JSON REST API under `<base_url>/api`.
#[derive(Clone)]
pub struct HttpEntityStore {
    client: Client,
    base_url: String,
    timeout: Duration,
    credential: ResolvedCredential,
}

impl HttpEntityStore {
    pub fn new(config: &ApiConfig) -> Result<Self, StoreError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(invalid_request("api.base_url cannot be empty"));
        }

        let client = Client::builder()
            .pool_idle_timeout(Duration::from_millis(config.pool_idle_timeout_ms))
            .build()
            .map_err(|err| transport_error(format!("failed to build http client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            timeout: Duration::from_millis(config.request_timeout_ms.max(1)),
            credential: resolve_credential(&config.credential)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/api/{}", self.base_url, kind.collection_path())
    }

    pub fn record_url(&self, kind: EntityKind, id: EntityId) -> String {
        format!("{}/{}", self.collection_url(kind), id)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .header(header::ACCEPT, "application/json")
            .header("x-request-id", Uuid::now_v7().to_string());

        if let Some(auth_header) = &self.credential.auth_header {
            builder = builder.header(header::AUTHORIZATION, auth_header);
        }
        builder
    }

    async fn send(&self, kind: EntityKind, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = builder.send().await.map_err(|err| {
            transport_error(format!("{kind} request failed: {err}")).with_entity(kind)
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(map_http_error(status, kind, &body))
    }

    async fn decode<T: DeserializeOwned>(
        kind: EntityKind,
        response: Response,
    ) -> Result<T, StoreError> {
        let bytes = response.bytes().await.map_err(|err| {
            transport_error(format!("failed to read {kind} response body: {err}")).with_entity(kind)
        })?;
        serde_json::from_slice(&bytes).map_err(|err| {
            protocol_violation(format!("failed to decode {kind} response: {err}")).with_entity(kind)
        })
    }

    async fn query<T: Record>(&self, filter: &QueryFilter) -> Result<Page<T>, StoreError> {
        let kind = T::KIND;
        tracing::debug!(
            target: "store",
            entity = %kind,
            params = filter.params().len(),
            "query_started"
        );
        let builder = self
            .request(Method::GET, self.collection_url(kind))
            .query(filter.params());
        let response = self.send(kind, builder).await?;
        let total_count = total_count_from_headers(response.headers());
        let items: Vec<T> = Self::decode(kind, response).await?;

        tracing::debug!(
            target: "store",
            entity = %kind,
            returned = items.len(),
            total_count = ?total_count,
            "query_completed"
        );
        Ok(Page { items, total_count })
    }

    async fn count(&self, kind: EntityKind, filter: &QueryFilter) -> Result<u64, StoreError> {
        let url = format!("{}/count", self.collection_url(kind));
        let builder = self.request(Method::GET, url).query(filter.params());
        let response = self.send(kind, builder).await?;
        Self::decode(kind, response).await
    }

    async fn find<T: Record>(&self, id: EntityId) -> Result<Option<T>, StoreError> {
        let kind = T::KIND;
        let builder = self.request(Method::GET, self.record_url(kind, id));
        match self.send(kind, builder).await {
            Ok(response) => Self::decode(kind, response).await.map(Some),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create<T: Record>(&self, record: T) -> Result<T, StoreError> {
        let kind = T::KIND;
        if record.id().is_some() {
            return Err(
                invalid_request(format!("a new {kind} cannot already have an id")).with_entity(kind),
            );
        }

        let builder = self
            .request(Method::POST, self.collection_url(kind))
            .json(&record);
        let response = self.send(kind, builder).await?;
        let created: T = Self::decode(kind, response).await?;
        tracing::info!(target: "store", entity = %kind, id = ?created.id(), "record_created");
        Ok(created)
    }

    async fn update<T: Record>(&self, record: T) -> Result<T, StoreError> {
        let kind = T::KIND;
        let id = require_id(&record)?;
        let builder = self
            .request(Method::PUT, self.record_url(kind, id))
            .json(&record);
        let response = self.send(kind, builder).await?;
        let updated = Self::decode(kind, response).await?;
        tracing::info!(target: "store", entity = %kind, id, "record_updated");
        Ok(updated)
    }

    async fn partial_update<T: Record>(&self, record: T) -> Result<T, StoreError> {
        let kind = T::KIND;
        let id = require_id(&record)?;
        let body = merge_patch_body(&record)?;
        let builder = self
            .request(Method::PATCH, self.record_url(kind, id))
            .header(header::CONTENT_TYPE, MERGE_PATCH_CONTENT_TYPE)
            .body(body);
        let response = self.send(kind, builder).await?;
        let updated = Self::decode(kind, response).await?;
        tracing::info!(target: "store", entity = %kind, id, "record_patched");
        Ok(updated)
    }

    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), StoreError> {
        let builder = self.request(Method::DELETE, self.record_url(kind, id));
        self.send(kind, builder).await?;
        tracing::info!(target: "store", entity = %kind, id, "record_deleted");
        Ok(())
    }
}

/// `None` fields are either omitted or sent as null; the server keeps the
/// stored value for both.
fn merge_patch_body<T: Record>(record: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(record).map_err(|err| {
        invalid_request(format!("failed to encode {} patch: {err}", T::KIND)).with_entity(T::KIND)
    })
}

fn require_id<T: Identified>(record: &T) -> Result<EntityId, StoreError> {
    record.id().ok_or_else(|| {
        invalid_request(format!("{} update requires an id", T::KIND)).with_entity(T::KIND)
    })
}

#[async_trait]
impl EntityStore for HttpEntityStore {
    async fn query_rooms(&self, filter: &QueryFilter) -> Result<Page<Room>, StoreError> {
        self.query(filter).await
    }

    async fn count_rooms(&self, filter: &QueryFilter) -> Result<u64, StoreError> {
        self.count(EntityKind::Room, filter).await
    }

    async fn find_room(&self, id: EntityId) -> Result<Option<Room>, StoreError> {
        self.find(id).await
    }

    async fn create_room(&self, room: Room) -> Result<Room, StoreError> {
        self.create(room).await
    }

    async fn update_room(&self, room: Room) -> Result<Room, StoreError> {
        self.update(room).await
    }

    async fn partial_update_room(&self, room: Room) -> Result<Room, StoreError> {
        self.partial_update(room).await
    }

    async fn delete_room(&self, id: EntityId) -> Result<(), StoreError> {
        self.delete(EntityKind::Room, id).await
    }

    async fn query_residents(&self, filter: &QueryFilter) -> Result<Page<Resident>, StoreError> {
        self.query(filter).await
    }

    async fn count_residents(&self, filter: &QueryFilter) -> Result<u64, StoreError> {
        self.count(EntityKind::Resident, filter).await
    }

    async fn find_resident(&self, id: EntityId) -> Result<Option<Resident>, StoreError> {
        self.find(id).await
    }

    async fn create_resident(&self, resident: Resident) -> Result<Resident, StoreError> {
        self.create(resident).await
    }

    async fn update_resident(&self, resident: Resident) -> Result<Resident, StoreError> {
        self.update(resident).await
    }

    async fn partial_update_resident(&self, resident: Resident) -> Result<Resident, StoreError> {
        self.partial_update(resident).await
    }

    async fn delete_resident(&self, id: EntityId) -> Result<(), StoreError> {
        self.delete(EntityKind::Resident, id).await
    }

    async fn query_facilities(&self, filter: &QueryFilter) -> Result<Page<Facility>, StoreError> {
        self.query(filter).await
    }

    async fn count_facilities(&self, filter: &QueryFilter) -> Result<u64, StoreError> {
        self.count(EntityKind::Facility, filter).await
    }

    async fn find_facility(&self, id: EntityId) -> Result<Option<Facility>, StoreError> {
        self.find(id).await
    }

    async fn create_facility(&self, facility: Facility) -> Result<Facility, StoreError> {
        self.create(facility).await
    }

    async fn update_facility(&self, facility: Facility) -> Result<Facility, StoreError> {
        self.update(facility).await
    }

    async fn partial_update_facility(&self, facility: Facility) -> Result<Facility, StoreError> {
        self.partial_update(facility).await
    }

    async fn delete_facility(&self, id: EntityId) -> Result<(), StoreError> {
        self.delete(EntityKind::Facility, id).await
    }
}
