pub mod credentials;
pub mod error;
pub mod filter;
pub mod http;
pub mod page;
pub mod patch;
pub mod ports;

pub use error::{StoreError, StoreErrorKind};
pub use filter::QueryFilter;
pub use http::HttpEntityStore;
pub use page::Page;
pub use patch::changed_fields;
pub use ports::EntityStore;
