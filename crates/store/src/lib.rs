//! # Tutorboard Store
//!
//! The record-store collaborator boundary. The scheduling core consumes
//! exactly four capabilities from its backing store: create a record under a
//! generated id, overwrite a single field, delete a record, and subscribe to
//! whole-collection snapshots. Anything richer (queries, transactions,
//! durability, conflict resolution) is the store's own business and stays on
//! its side of this trait.

/// In-memory reference implementation
pub mod memory;
/// `mockall` mock of the store trait for consumer tests
pub mod mock;

use std::collections::HashMap;

use serde_json::Value;
use tutorboard_core::errors::ScheduleResult;
use uuid::Uuid;

pub use memory::MemoryStore;

/// Full contents of one collection, keyed by record id.
pub type Snapshot = HashMap<Uuid, Value>;

/// Callback invoked with the current snapshot of the subscribed collection.
///
/// Callbacks run inline on the mutating call and must not call back into the
/// store.
pub type SnapshotFn = Box<dyn Fn(&Snapshot) + Send + Sync>;

pub trait RecordStore: Send + Sync {
    /// Insert `data` under a freshly generated id and return that id.
    fn create_record(&self, collection: &str, data: Value) -> ScheduleResult<Uuid>;

    /// Overwrite one field of an existing record. `field_path` addresses
    /// nested objects with dotted segments. Fails with `ReferenceNotFound`
    /// when the record does not exist.
    fn update_field(
        &self,
        collection: &str,
        id: Uuid,
        field_path: &str,
        value: Value,
    ) -> ScheduleResult<()>;

    /// Remove a record. Deleting an absent record is an idempotent no-op.
    fn delete_record(&self, collection: &str, id: Uuid) -> ScheduleResult<()>;

    /// Register `on_change` for `collection`. The callback fires once
    /// immediately with the current snapshot, then after every subsequent
    /// mutation of the collection.
    fn subscribe(&self, collection: &str, on_change: SnapshotFn) -> ScheduleResult<()>;
}
