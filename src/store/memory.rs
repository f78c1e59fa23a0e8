//! In-process session store with per-record TTL.
//!
//! Records are kept as serialized JSON so a load is a true whole-record
//! round-trip, matching the semantics of an external key-value store.
//! Expired entries are dropped lazily when they are looked up; nothing runs
//! in the background.

use crate::error::StoreError;
use crate::model::Session;
use crate::store::SessionStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug)]
struct Record {
    expires_at: Instant,
    payload: String,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn save(&self, id: &str, session: &Session, ttl: Duration) -> Result<(), StoreError> {
        let payload = serde_json::to_string(session)?;
        let record = Record {
            expires_at: Instant::now() + ttl,
            payload,
        };
        self.records.lock().unwrap().insert(id.to_string(), record);
        debug!(session_id = id, ttl_secs = ttl.as_secs(), "session saved");
        Ok(())
    }

    async fn load(&self, id: &str) -> Result<Option<Session>, StoreError> {
        let mut records = self.records.lock().unwrap();
        let payload = match records.get(id) {
            Some(record) if record.expires_at > Instant::now() => record.payload.clone(),
            Some(_) => {
                records.remove(id);
                debug!(session_id = id, "session expired");
                return Ok(None);
            }
            None => return Ok(None),
        };
        drop(records);
        let session = serde_json::from_str(&payload)?;
        Ok(Some(session))
    }

    fn clone_box(&self) -> Box<dyn SessionStore> {
        Box::new(self.clone())
    }
}
