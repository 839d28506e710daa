use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::error::{ChartError, Result};

pub const DAY_MS: f64 = 1000.0 * 60.0 * 60.0 * 24.0;
/// Julian Day of the Unix epoch, at noon.
pub const J1970: f64 = 2_440_588.0;
/// Julian Day of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

/// Convert an instant to a (fractional) Julian Day.
pub fn to_julian(instant: DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / DAY_MS - 0.5 + J1970
}

/// Convert a Julian Day back to an instant, truncated to whole milliseconds.
pub fn from_julian(julian: f64) -> Option<DateTime<Utc>> {
    let millis = ((julian + 0.5 - J1970) * DAY_MS).trunc();
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

/// Days since J2000.0.
pub fn days_since_j2000(instant: DateTime<Utc>) -> f64 {
    to_julian(instant) - J2000
}

/// Shift an instant by a fractional number of hours.
pub fn hours_later(instant: DateTime<Utc>, hours: f64) -> DateTime<Utc> {
    let millis = instant.timestamp_millis() as f64 + hours * DAY_MS / 24.0;
    Utc.timestamp_millis_opt(millis.trunc() as i64)
        .single()
        .unwrap_or(instant)
}

/// Midnight at the start of `date` in the given local offset.
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let naive = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ChartError::InvalidDate(date.to_string()))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| ChartError::InvalidDate(date.to_string()))
}

/// Parse a `YYYY-MM-DD` date string.
///
/// Impossible calendar dates (e.g. `1990-02-30`) are rejected rather than
/// rolled over into the next month.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|err| ChartError::InvalidDate(format!("{trimmed:?}: {err}")))
}

/// 12-hour clock time such as `7:05 PM`.
pub fn format_clock<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format("%-I:%M %p").to_string()
}

/// Long display date such as `March 21, 1990`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julian_epochs() {
        let epoch = Utc.timestamp_millis_opt(0).unwrap();
        assert_eq!(to_julian(epoch), 2_440_587.5);

        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(days_since_j2000(j2000), 0.0);
        assert_eq!(from_julian(J2000), Some(j2000));
    }

    #[test]
    fn hours_later_moves_forward() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let later = hours_later(start, 1.5);
        assert_eq!(later, Utc.with_ymd_and_hms(2024, 1, 1, 1, 30, 0).unwrap());
    }

    #[test]
    fn midnight_in_offset() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(1990, 3, 21).unwrap();
        let midnight = local_midnight(date, offset).unwrap();
        assert_eq!(
            midnight.with_timezone(&Utc),
            Utc.with_ymd_and_hms(1990, 3, 21, 5, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_and_rejects_dates() {
        assert_eq!(
            parse_date("1990-03-21").unwrap(),
            NaiveDate::from_ymd_opt(1990, 3, 21).unwrap()
        );
        assert!(matches!(parse_date("1990-02-30"), Err(ChartError::InvalidDate(_))));
        assert!(matches!(parse_date("yesterday"), Err(ChartError::InvalidDate(_))));
        assert!(parse_date("").is_err());
    }

    #[test]
    fn clock_and_long_date_formats() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let evening = offset.with_ymd_and_hms(2024, 6, 1, 19, 5, 59).unwrap();
        assert_eq!(format_clock(&evening), "7:05 PM");
        let past_midnight = offset.with_ymd_and_hms(2024, 6, 1, 0, 30, 0).unwrap();
        assert_eq!(format_clock(&past_midnight), "12:30 AM");

        let date = NaiveDate::from_ymd_opt(1990, 3, 1).unwrap();
        assert_eq!(format_long_date(date), "March 1, 1990");
    }
}
