use std::fmt;

use chrono::{DateTime, Datelike, Local, Timelike};

use crate::{Error, Result};

/// Wall-clock date and time in the local zone, without a zone designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTuple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Converts epoch milliseconds to local wall-clock time, truncated to the
/// minute.
pub fn to_calendar_tuple(epoch_millis: i64) -> Result<DateTuple> {
    let local = DateTime::from_timestamp_millis(epoch_millis)
        .ok_or(Error::TimestampOutOfRange(epoch_millis))?
        .with_timezone(&Local);

    Ok(DateTuple {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour: local.hour(),
        minute: local.minute(),
        second: 0,
    })
}

// Floating local time as used by DTSTART/DTEND without TZID.
impl fmt::Display for DateTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
