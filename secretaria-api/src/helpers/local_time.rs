use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};

/// Wall-clock view of a Unix timestamp
pub fn to_local(timestamp: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&offset))
}

/// Unix timestamp of a local date and time
pub fn from_local(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> Option<i64> {
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.timestamp())
}

pub fn local_date(timestamp: i64, offset: FixedOffset) -> Option<NaiveDate> {
    to_local(timestamp, offset).map(|dt| dt.date_naive())
}

/// `dd/mm/yyyy`
pub fn format_date(timestamp: i64, offset: FixedOffset) -> String {
    to_local(timestamp, offset)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// `HH:MM`
pub fn format_time(timestamp: i64, offset: FixedOffset) -> String {
    to_local(timestamp, offset)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default()
}
