use chrono::{DateTime, SecondsFormat, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::convert;
use crate::errors::ScheduleResult;
use crate::timezone::TimezoneCode;

/// A student exists only embedded in the slot it occupies. It has no id and
/// no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub timezone: TimezoneCode,
}

/// One bookable unit of teacher availability.
///
/// The slot is `Open` while `student` is `None` and `Occupied` otherwise;
/// those are the only two states. There is no move/reschedule operation:
/// `utc_start_time` is written once at creation and never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub id: Uuid,
    pub teacher_id: Uuid,
    /// Canonical RFC 3339 UTC instant. Kept as the stored string so a
    /// corrupt value degrades to an "Invalid Date" rendering instead of
    /// failing deserialization of the whole record.
    pub utc_start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
}

impl AvailabilitySlot {
    pub fn new(id: Uuid, teacher_id: Uuid, utc_start_time: String) -> Self {
        Self {
            id,
            teacher_id,
            utc_start_time,
            student: None,
        }
    }

    /// Total replace: last write wins, reassigning an occupied slot is not
    /// an error.
    pub fn assign(&mut self, student: Student) {
        self.student = Some(student);
    }

    /// Idempotent: clearing an open slot is a no-op.
    pub fn clear(&mut self) {
        self.student = None;
    }

    pub fn is_open(&self) -> bool {
        self.student.is_none()
    }

    /// `None` when the stored instant does not parse.
    pub fn start_instant(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.utc_start_time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// The civil-time tuple collected at the boundary when a teacher publishes
/// availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSpec {
    pub day_of_week: Weekday,
    pub time: String,
    pub timezone: TimezoneCode,
}

impl SlotSpec {
    /// Materialize this spec into the canonical stored UTC instant, resolved
    /// against `now`.
    pub fn to_utc_at(&self, now: DateTime<Utc>) -> ScheduleResult<String> {
        let instant = convert::to_absolute_utc_at(self.day_of_week, &self.time, self.timezone, now)?;
        Ok(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn to_utc(&self) -> ScheduleResult<String> {
        self.to_utc_at(Utc::now())
    }
}
