//! Change notifications pushed to connected clients

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Asset,
    Complaint,
    CallLog,
    PmReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

/// One successful write
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DataChange {
    pub entity: Entity,
    pub action: ChangeAction,
    /// Affected row, absent for batch writes
    pub id: Option<i32>,
    /// Sequence number, strictly increasing across all changes and in delivery order
    pub version: u64,
    pub at: DateTime<Utc>,
}

/// Fan-out of `DataChange` events to every subscriber
#[derive(Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<DataChange>,
    /// Last assigned version; held across the send so delivery order matches version order
    version: Arc<Mutex<u64>>,
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            version: Arc::new(Mutex::new(0)),
        }
    }

    /// Record a change and deliver it to current subscribers
    pub fn publish(&self, entity: Entity, action: ChangeAction, id: Option<i32>) -> DataChange {
        let mut version = self.version.lock().unwrap_or_else(PoisonError::into_inner);
        *version += 1;
        let change = DataChange {
            entity,
            action,
            id,
            version: *version,
            at: Utc::now(),
        };
        // No receivers is fine
        let _ = self.sender.send(change.clone());
        drop(version);
        tracing::debug!(?entity, ?action, ?id, version = change.version, "Data changed");
        change
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataChange> {
        self.sender.subscribe()
    }

    /// Version of the latest change, 0 before any write
    pub fn version(&self) -> u64 {
        *self.version.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
