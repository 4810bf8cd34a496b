use serde::{Deserialize, Serialize};

use crate::models::slot::AvailabilitySlot;
use crate::models::teacher::Teacher;

/// An occupied slot joined to its owning teacher. The teacher is optional
/// because the owner may have been deleted out from under the slot; that is
/// a missing join, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    pub slot: AvailabilitySlot,
    pub teacher: Option<Teacher>,
}

/// Filter to occupied slots and join each to its owning teacher by id.
///
/// Ordering is a presentation concern layered on top of this join; callers
/// that want a chronological table sort the result themselves.
pub fn list_scheduled(teachers: &[Teacher], slots: &[AvailabilitySlot]) -> Vec<ScheduledEntry> {
    slots
        .iter()
        .filter(|slot| slot.student.is_some())
        .map(|slot| ScheduledEntry {
            slot: slot.clone(),
            teacher: teachers.iter().find(|t| t.id == slot.teacher_id).cloned(),
        })
        .collect()
}
