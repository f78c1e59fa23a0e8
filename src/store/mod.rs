//! Session store boundary: keyed whole-record persistence with expiry.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::model::Session;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// Keyed session persistence. Records are saved and loaded whole; there are
/// no field-level updates, so concurrent writers are last-writer-wins.
/// Expiry is the store's responsibility; loading an expired or unknown id
/// yields `Ok(None)`.
#[async_trait]
pub trait SessionStore: Send + Sync + Debug {
    async fn save(&self, id: &str, session: &Session, ttl: Duration) -> Result<(), StoreError>;

    async fn load(&self, id: &str) -> Result<Option<Session>, StoreError>;

    /// Clone this store into a boxed trait object
    fn clone_box(&self) -> Box<dyn SessionStore>;
}

impl Clone for Box<dyn SessionStore> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[async_trait]
impl SessionStore for Box<dyn SessionStore> {
    async fn save(&self, id: &str, session: &Session, ttl: Duration) -> Result<(), StoreError> {
        self.as_ref().save(id, session, ttl).await
    }

    async fn load(&self, id: &str) -> Result<Option<Session>, StoreError> {
        self.as_ref().load(id).await
    }

    fn clone_box(&self) -> Box<dyn SessionStore> {
        self.as_ref().clone_box()
    }
}
