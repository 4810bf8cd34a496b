//! Conversion between civil time and absolute UTC instants.
//!
//! A slot is entered as "weekday + wall-clock time + zone code" and stored as
//! the UTC instant of its next occurrence. The offset applied is the one the
//! zone's rules assign to the *resolved calendar date*, never a fixed or
//! current offset, so the same clock time maps to different instants across
//! the DST year. Formatting goes the other way and fails closed: a stored
//! instant that does not parse renders as [`INVALID_DISPLAY`].

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::errors::{ScheduleError, ScheduleResult};
use crate::timezone::TimezoneCode;

/// Placeholder rendered when a stored instant cannot be parsed.
pub const INVALID_DISPLAY: &str = "Invalid Date";

/// Parse a strict 24-hour `HH:MM` wall-clock time.
pub fn parse_local_time(time: &str) -> ScheduleResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(time.to_string()))
}

/// The next calendar date in `tz`'s civil calendar falling on `day`.
///
/// "Next" is inclusive: if today already is `day`, today is returned, so the
/// result is always 0-6 days ahead of `now` as seen from `tz`.
pub fn next_occurrence_at(day: Weekday, now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    let today = now.with_timezone(&tz).date_naive();
    let ahead = (day.num_days_from_sunday() + 7 - today.weekday().num_days_from_sunday()) % 7;
    today + Duration::days(i64::from(ahead))
}

/// Convert a civil (weekday, `HH:MM`, zone code) tuple into the UTC instant
/// of its next occurrence on or after `now`.
///
/// DST boundary policy: a local time the zone's clock reads twice (fall-back
/// overlap) resolves to the earlier offset; a local time the clock skips
/// (spring-forward gap) slides forward one hour into the post-transition
/// offset. Both cases are documented simplifications, not errors.
pub fn to_absolute_utc_at(
    day: Weekday,
    time: &str,
    code: TimezoneCode,
    now: DateTime<Utc>,
) -> ScheduleResult<DateTime<Utc>> {
    let clock = parse_local_time(time)?;
    let tz = code.tz();
    let civil = next_occurrence_at(day, now, tz).and_time(clock);

    let local = match tz.from_local_datetime(&civil) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => tz
            .from_local_datetime(&(civil + Duration::hours(1)))
            .earliest()
            .ok_or_else(|| ScheduleError::InvalidTime(time.to_string()))?,
    };

    Ok(local.with_timezone(&Utc))
}

/// [`to_absolute_utc_at`] anchored at the current instant.
pub fn to_absolute_utc(day: Weekday, time: &str, code: TimezoneCode) -> ScheduleResult<DateTime<Utc>> {
    to_absolute_utc_at(day, time, code, Utc::now())
}

fn format_as(raw: &str, code: TimezoneCode, fmt: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => instant.with_timezone(&code.tz()).format(fmt).to_string(),
        Err(_) => INVALID_DISPLAY.to_string(),
    }
}

/// Render a stored UTC instant as weekday plus 12-hour clock in the target
/// zone, e.g. `"Monday 9:00 AM"`.
pub fn format_in_zone(raw: &str, code: TimezoneCode) -> String {
    format_as(raw, code, "%A %-I:%M %p")
}

/// The weekday name a stored instant falls on in the target zone.
pub fn format_day(raw: &str, code: TimezoneCode) -> String {
    format_as(raw, code, "%A")
}

/// The 12-hour clock reading of a stored instant in the target zone.
pub fn format_clock(raw: &str, code: TimezoneCode) -> String {
    format_as(raw, code, "%-I:%M %p")
}
