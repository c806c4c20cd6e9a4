use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Returns start of the next day.
pub fn next_day_start<Tz: TimeZone>(date: DateTime<Tz>) -> DateTime<Tz> {
    (date + Duration::days(1)).with_time(NaiveTime::MIN).unwrap()
}

/// Fractional number of days between the start of `origin` and `moment`. Charts use it as a
/// continuous x coordinate.
pub fn day_offset(origin: NaiveDate, moment: NaiveDateTime) -> f64 {
    let elapsed = moment - origin.and_time(NaiveTime::MIN);
    elapsed.num_seconds() as f64 / 86_400.
}

/// Inverse of [day_offset], rounded down to the day.
pub fn day_from_offset(origin: NaiveDate, offset: f64) -> NaiveDate {
    origin + Duration::days(offset.floor() as i64)
}
