//! Table of live SSH connections keyed by caller-chosen id
//!
//! The table owns each session handle. Handlers clone the `Arc` out and drop
//! the lock before doing any remote I/O, so a slow command on one connection
//! never blocks lookups for another.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::ssh::RemoteSession;

/// Where a connection points, kept for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub username: String,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.username, self.host, self.port)
    }
}

/// One live session and the endpoint it was opened against
#[derive(Clone)]
pub struct ConnectionRecord {
    pub session: Arc<dyn RemoteSession>,
    pub endpoint: Endpoint,
}

impl fmt::Debug for ConnectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRecord")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Connection table guarded by a single mutex
#[derive(Default)]
pub struct ConnectionTable {
    entries: Mutex<HashMap<String, ConnectionRecord>>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` under `id`, returning whatever was there before
    pub async fn put(
        &self,
        id: impl Into<String>,
        record: ConnectionRecord,
    ) -> Option<ConnectionRecord> {
        self.entries.lock().await.insert(id.into(), record)
    }

    pub async fn get(&self, id: &str) -> Option<ConnectionRecord> {
        self.entries.lock().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &str) -> Option<ConnectionRecord> {
        self.entries.lock().await.remove(id)
    }

    /// Snapshot of every entry, sorted by id
    pub async fn all(&self) -> Vec<(String, ConnectionRecord)> {
        let mut snapshot: Vec<_> = self
            .entries
            .lock()
            .await
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect();
        snapshot.sort_by(|a, b| a.0.cmp(&b.0));
        snapshot
    }

    /// Remove and return every entry (shutdown sweep)
    pub async fn drain(&self) -> Vec<(String, ConnectionRecord)> {
        self.entries.lock().await.drain().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl fmt::Debug for ConnectionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionTable").finish_non_exhaustive()
    }
}
