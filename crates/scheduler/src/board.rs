use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};
use tutorboard_core::errors::{ScheduleError, ScheduleResult};
use tutorboard_core::models::schedule::{ScheduledEntry, list_scheduled};
use tutorboard_core::models::slot::{AvailabilitySlot, Student};
use tutorboard_core::models::teacher::{CreateTeacherRequest, Teacher};
use tutorboard_store::{RecordStore, Snapshot};
use uuid::Uuid;

use crate::records::{SlotRecord, TeacherRecord};

/// Collection name for teacher records.
pub const TEACHERS: &str = "teachers";
/// Collection name for availability slot records.
pub const SLOTS: &str = "slots";

#[derive(Default)]
struct BoardState {
    teachers: HashMap<Uuid, Teacher>,
    slots: HashMap<Uuid, AvailabilitySlot>,
}

/// Live view of the scheduling board backed by a record store.
///
/// The board never edits its own snapshot: every operation is a write
/// against the store, and the snapshot catches up through the subscription
/// callbacks registered in [`Board::attach`]. Concurrent writers are assumed
/// to be serialized by the store; the board adds no cross-operation locking
/// of its own.
pub struct Board {
    store: Arc<dyn RecordStore>,
    state: Arc<RwLock<BoardState>>,
}

fn decode<T: DeserializeOwned>(collection: &str, snapshot: &Snapshot) -> HashMap<Uuid, T> {
    snapshot
        .iter()
        .filter_map(|(id, value)| match serde_json::from_value(value.clone()) {
            Ok(record) => Some((*id, record)),
            Err(err) => {
                warn!("skipping undecodable {} record {}: {}", collection, id, err);
                None
            }
        })
        .collect()
}

fn encode<T: Serialize>(value: &T) -> ScheduleResult<Value> {
    serde_json::to_value(value).map_err(|err| ScheduleError::Store(eyre::eyre!(err)))
}

fn lock_poisoned<T>(_: T) -> ScheduleError {
    ScheduleError::Store(eyre::eyre!("board state lock poisoned"))
}

impl Board {
    /// Connect to a store and prime the snapshot from its current contents.
    pub fn attach(store: Arc<dyn RecordStore>) -> ScheduleResult<Self> {
        let state = Arc::new(RwLock::new(BoardState::default()));

        let teacher_state = Arc::clone(&state);
        store.subscribe(
            TEACHERS,
            Box::new(move |snapshot| {
                let teachers = decode::<TeacherRecord>(TEACHERS, snapshot)
                    .into_iter()
                    .map(|(id, record)| (id, record.into_teacher(id)))
                    .collect();
                match teacher_state.write() {
                    Ok(mut guard) => guard.teachers = teachers,
                    Err(_) => warn!("board state lock poisoned, dropping teacher snapshot"),
                }
            }),
        )?;

        let slot_state = Arc::clone(&state);
        store.subscribe(
            SLOTS,
            Box::new(move |snapshot| {
                let slots = decode::<SlotRecord>(SLOTS, snapshot)
                    .into_iter()
                    .map(|(id, record)| (id, record.into_slot(id)))
                    .collect();
                match slot_state.write() {
                    Ok(mut guard) => guard.slots = slots,
                    Err(_) => warn!("board state lock poisoned, dropping slot snapshot"),
                }
            }),
        )?;

        Ok(Self { store, state })
    }

    /// Create a teacher, then materialize and create each of its slot specs.
    ///
    /// A spec that fails conversion is dropped and the rest proceed; teacher
    /// creation itself never fails because of a malformed spec. Specs are
    /// resolved against `now`, so "Monday" means the next Monday on or after
    /// `now` in the spec's own zone.
    pub fn add_teacher_at(
        &self,
        req: CreateTeacherRequest,
        now: DateTime<Utc>,
    ) -> ScheduleResult<(Teacher, Vec<AvailabilitySlot>)> {
        let record = TeacherRecord::from_request(&req);
        let teacher_id = self.store.create_record(TEACHERS, encode(&record)?)?;
        let teacher = record.into_teacher(teacher_id);

        let mut slots = Vec::with_capacity(req.slots.len());
        for spec in &req.slots {
            let utc_start_time = match spec.to_utc_at(now) {
                Ok(instant) => instant,
                Err(err) => {
                    warn!("dropping slot spec for teacher {}: {}", teacher.name, err);
                    continue;
                }
            };
            let slot_record = SlotRecord {
                teacher_id,
                utc_start_time,
                student: None,
            };
            let slot_id = self.store.create_record(SLOTS, encode(&slot_record)?)?;
            slots.push(slot_record.into_slot(slot_id));
        }

        info!("added teacher {} with {} slots", teacher.name, slots.len());
        Ok((teacher, slots))
    }

    /// [`Board::add_teacher_at`] anchored at the current instant.
    pub fn add_teacher(
        &self,
        req: CreateTeacherRequest,
    ) -> ScheduleResult<(Teacher, Vec<AvailabilitySlot>)> {
        self.add_teacher_at(req, Utc::now())
    }

    /// Delete a teacher and, as one logical unit, every slot it owns.
    ///
    /// Deletions are issued teacher first, then slots, one record at a time;
    /// the store offers no multi-record transaction, so recovering from an
    /// interrupted cascade is the store's concern. Unknown ids are a no-op.
    pub fn delete_teacher(&self, teacher_id: Uuid) -> ScheduleResult<()> {
        let owned: Vec<Uuid> = {
            let state = self.state.read().map_err(lock_poisoned)?;
            if !state.teachers.contains_key(&teacher_id) {
                warn!("delete of unknown teacher {}", teacher_id);
                return Ok(());
            }
            state
                .slots
                .values()
                .filter(|slot| slot.teacher_id == teacher_id)
                .map(|slot| slot.id)
                .collect()
        };

        self.store.delete_record(TEACHERS, teacher_id)?;
        for slot_id in &owned {
            self.store.delete_record(SLOTS, *slot_id)?;
        }

        info!("deleted teacher {} and {} slots", teacher_id, owned.len());
        Ok(())
    }

    /// Put `student` in the slot, replacing any current occupant. Last write
    /// wins; an unknown slot id is a no-op.
    pub fn assign_student(&self, slot_id: Uuid, student: Student) -> ScheduleResult<()> {
        if !self.slot_exists(slot_id)? {
            warn!("assign to unknown slot {}", slot_id);
            return Ok(());
        }
        self.store
            .update_field(SLOTS, slot_id, "student", encode(&student)?)?;
        Ok(())
    }

    /// Open the slot back up. Idempotent; an unknown slot id is a no-op.
    pub fn clear_student(&self, slot_id: Uuid) -> ScheduleResult<()> {
        if !self.slot_exists(slot_id)? {
            warn!("clear of unknown slot {}", slot_id);
            return Ok(());
        }
        self.store
            .update_field(SLOTS, slot_id, "student", Value::Null)?;
        Ok(())
    }

    fn slot_exists(&self, slot_id: Uuid) -> ScheduleResult<bool> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.slots.contains_key(&slot_id))
    }

    /// Current teachers, ordered by name for stable listing.
    pub fn teachers(&self) -> ScheduleResult<Vec<Teacher>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut teachers: Vec<Teacher> = state.teachers.values().cloned().collect();
        teachers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(teachers)
    }

    /// Current slots, in no particular order.
    pub fn slots(&self) -> ScheduleResult<Vec<AvailabilitySlot>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.slots.values().cloned().collect())
    }

    /// One teacher's slots, ordered by instant ascending for card display.
    pub fn slots_for(&self, teacher_id: Uuid) -> ScheduleResult<Vec<AvailabilitySlot>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        let mut slots: Vec<AvailabilitySlot> = state
            .slots
            .values()
            .filter(|slot| slot.teacher_id == teacher_id)
            .cloned()
            .collect();
        slots.sort_by_key(|slot| (slot.start_instant(), slot.id));
        Ok(slots)
    }

    /// Occupied slots joined to their owning teacher, ordered by instant
    /// ascending. A concurrently deleted owner shows up as `teacher: None`.
    pub fn scheduled(&self) -> ScheduleResult<Vec<ScheduledEntry>> {
        let (teachers, slots) = {
            let state = self.state.read().map_err(lock_poisoned)?;
            (
                state.teachers.values().cloned().collect::<Vec<_>>(),
                state.slots.values().cloned().collect::<Vec<_>>(),
            )
        };
        let mut entries = list_scheduled(&teachers, &slots);
        entries.sort_by_key(|entry| (entry.slot.start_instant(), entry.slot.id));
        Ok(entries)
    }
}
