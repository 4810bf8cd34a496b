use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::warn;
use tutorboard_core::errors::{ScheduleError, ScheduleResult};
use uuid::Uuid;

use crate::{RecordStore, Snapshot, SnapshotFn};

#[derive(Default)]
struct Collections {
    records: HashMap<String, Snapshot>,
    subscribers: HashMap<String, Vec<SnapshotFn>>,
}

impl Collections {
    fn notify(&self, collection: &str) {
        let empty = Snapshot::new();
        let snapshot = self.records.get(collection).unwrap_or(&empty);
        if let Some(subs) = self.subscribers.get(collection) {
            for on_change in subs {
                on_change(snapshot);
            }
        }
    }
}

/// In-memory [`RecordStore`] with synchronous change notification.
///
/// A single lock serializes every mutation, which is also what delivers the
/// single-writer assumption the scheduling model documents. Subscriber
/// callbacks run inside the mutating call, so by the time a write returns
/// every subscriber has seen the post-write snapshot.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned<T>(_: T) -> ScheduleError {
    ScheduleError::Store(eyre::eyre!("record store lock poisoned"))
}

/// Set `value` at a dotted `field_path` inside `record`, creating
/// intermediate objects as needed.
fn set_field(record: &mut Value, field_path: &str, value: Value) {
    let segments: Vec<&str> = field_path.split('.').collect();
    let mut current = record;
    for segment in &segments[..segments.len() - 1] {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        current = match current.as_object_mut() {
            Some(map) => map
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            None => return,
        };
    }
    if !current.is_object() {
        *current = Value::Object(Map::new());
    }
    if let Some(map) = current.as_object_mut() {
        map.insert(segments[segments.len() - 1].to_string(), value);
    }
}

impl RecordStore for MemoryStore {
    fn create_record(&self, collection: &str, data: Value) -> ScheduleResult<Uuid> {
        let mut inner = self.inner.lock().map_err(lock_poisoned)?;
        let id = Uuid::new_v4();
        inner
            .records
            .entry(collection.to_string())
            .or_default()
            .insert(id, data);
        inner.notify(collection);
        Ok(id)
    }

    fn update_field(
        &self,
        collection: &str,
        id: Uuid,
        field_path: &str,
        value: Value,
    ) -> ScheduleResult<()> {
        if field_path.is_empty() {
            return Err(ScheduleError::Store(eyre::eyre!("empty field path")));
        }
        let mut inner = self.inner.lock().map_err(lock_poisoned)?;
        let record = inner
            .records
            .get_mut(collection)
            .and_then(|snapshot| snapshot.get_mut(&id))
            .ok_or_else(|| ScheduleError::ReferenceNotFound(format!("{collection}/{id}")))?;
        set_field(record, field_path, value);
        inner.notify(collection);
        Ok(())
    }

    fn delete_record(&self, collection: &str, id: Uuid) -> ScheduleResult<()> {
        let mut inner = self.inner.lock().map_err(lock_poisoned)?;
        let removed = inner
            .records
            .get_mut(collection)
            .and_then(|snapshot| snapshot.remove(&id));
        if removed.is_some() {
            inner.notify(collection);
        } else {
            warn!("delete of absent record {}/{}", collection, id);
        }
        Ok(())
    }

    fn subscribe(&self, collection: &str, on_change: SnapshotFn) -> ScheduleResult<()> {
        let mut inner = self.inner.lock().map_err(lock_poisoned)?;
        let empty = Snapshot::new();
        let snapshot = inner.records.get(collection).unwrap_or(&empty);
        on_change(snapshot);
        inner
            .subscribers
            .entry(collection.to_string())
            .or_default()
            .push(on_change);
        Ok(())
    }
}
