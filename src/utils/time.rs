//! Time utilities: HH:MM parsing/formatting and the elapsed-minutes rule
//! used by the event form.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveTime, TimeDelta, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn fmt_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Current wall-clock time truncated to the minute, used wherever a time
/// argument defaults to "now".
pub fn now_to_minute() -> NaiveTime {
    let now = Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

/// Whole minutes from `start` to `end` on the same date.
///
/// If `end` is earlier than `start` the end is taken to fall on the next
/// calendar day (a single midnight rollover, never more). Equal times
/// mean zero minutes, not a full day.
pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    let span = end.signed_duration_since(start);
    if span < TimeDelta::zero() {
        return (span + TimeDelta::days(1)).num_minutes();
    }
    span.num_minutes()
}

pub fn parse_required_time(input: &str) -> AppResult<NaiveTime> {
    parse_time(input).ok_or_else(|| AppError::InvalidTime(input.to_string()))
}

/// Serde adapter keeping times as "HH:MM" in the tables, the format the
/// legacy files and the remote sheet already use.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(t: &NaiveTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(de)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .map_err(|_| D::Error::custom(format!("invalid HH:MM time: {raw}")))
    }
}
