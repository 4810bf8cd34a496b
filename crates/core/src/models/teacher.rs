use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::slot::SlotSpec;
use crate::timezone::TimezoneCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub timezone: TimezoneCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
    pub subject: String,
    pub timezone: TimezoneCode,
    #[serde(default)]
    pub slots: Vec<SlotSpec>,
}
