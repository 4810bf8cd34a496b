use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{ScheduleError, ScheduleResult};

/// The closed set of timezone codes accepted anywhere in the domain.
///
/// Free-form zone strings are rejected at every boundary: a civil time only
/// enters the system tagged with one of these codes, and each code maps to
/// exactly one IANA zone whose rules drive all offset lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimezoneCode {
    Ist,
    Cst,
    Est,
    Pst,
    Mt,
}

impl TimezoneCode {
    /// Fixed iteration order for deterministic listings.
    pub const ALL: [TimezoneCode; 5] = [
        TimezoneCode::Ist,
        TimezoneCode::Cst,
        TimezoneCode::Est,
        TimezoneCode::Pst,
        TimezoneCode::Mt,
    ];

    /// The IANA zone whose rules this code resolves through.
    pub fn tz(self) -> Tz {
        match self {
            TimezoneCode::Ist => Tz::Asia__Kolkata,
            TimezoneCode::Cst => Tz::America__Chicago,
            TimezoneCode::Est => Tz::America__New_York,
            TimezoneCode::Pst => Tz::America__Los_Angeles,
            TimezoneCode::Mt => Tz::America__Denver,
        }
    }

    /// Human-readable label for dropdowns and cards.
    pub fn label(self) -> &'static str {
        match self {
            TimezoneCode::Ist => "Indian Standard Time (IST)",
            TimezoneCode::Cst => "Central Time (CT)",
            TimezoneCode::Est => "Eastern Time (ET)",
            TimezoneCode::Pst => "Pacific Time (PT)",
            TimezoneCode::Mt => "Mountain Time (MT)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimezoneCode::Ist => "IST",
            TimezoneCode::Cst => "CST",
            TimezoneCode::Est => "EST",
            TimezoneCode::Pst => "PST",
            TimezoneCode::Mt => "MT",
        }
    }
}

impl fmt::Display for TimezoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimezoneCode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> ScheduleResult<Self> {
        match s {
            "IST" => Ok(TimezoneCode::Ist),
            "CST" => Ok(TimezoneCode::Cst),
            "EST" => Ok(TimezoneCode::Est),
            "PST" => Ok(TimezoneCode::Pst),
            "MT" => Ok(TimezoneCode::Mt),
            other => Err(ScheduleError::UnknownZone(other.to_string())),
        }
    }
}
