use serde::{Deserialize, Serialize};
use tutorboard_core::models::slot::{AvailabilitySlot, Student};
use tutorboard_core::models::teacher::{CreateTeacherRequest, Teacher};
use tutorboard_core::timezone::TimezoneCode;
use uuid::Uuid;

/// Stored shape of a teacher record. The id is the collection key, not part
/// of the record body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherRecord {
    pub name: String,
    pub subject: String,
    pub timezone: TimezoneCode,
}

impl TeacherRecord {
    pub fn from_request(req: &CreateTeacherRequest) -> Self {
        Self {
            name: req.name.clone(),
            subject: req.subject.clone(),
            timezone: req.timezone,
        }
    }

    pub fn into_teacher(self, id: Uuid) -> Teacher {
        Teacher {
            id,
            name: self.name,
            subject: self.subject,
            timezone: self.timezone,
        }
    }
}

/// Stored shape of an availability slot record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRecord {
    pub teacher_id: Uuid,
    pub utc_start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<Student>,
}

impl SlotRecord {
    pub fn into_slot(self, id: Uuid) -> AvailabilitySlot {
        AvailabilitySlot {
            id,
            teacher_id: self.teacher_id,
            utc_start_time: self.utc_start_time,
            student: self.student,
        }
    }
}
