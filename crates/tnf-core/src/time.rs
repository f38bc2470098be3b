//! Timestamp parsing and calendar-day bounds.
//!
//! Row timestamps arrive as free-form strings from a spreadsheet. Anything
//! carrying an offset is parsed as RFC 3339; naive date-times are read in
//! the caller's timezone, the same zone the date filters use.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a row timestamp. Returns `None` for anything unrecognized.
#[must_use]
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return localize(naive, tz);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| localize(naive, tz))
}

/// Resolve a wall-clock time in `tz`.
///
/// Ambiguous times take the earlier instant. Times skipped by a forward
/// transition are read with the offset in force before it, which lands
/// them just past the gap (`00:30` in a `00:00 -> 01:00` gap becomes `01:30`).
fn localize<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => {
            let before = naive.checked_sub_signed(TimeDelta::days(1))?;
            let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
            let utc = naive.checked_sub_signed(TimeDelta::seconds(i64::from(
                offset.local_minus_utc(),
            )))?;
            Some(utc.and_utc())
        }
    }
}

/// First instant of `date` (00:00:00.000) in `tz`.
#[must_use]
pub fn day_start_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    localize(naive, tz).unwrap_or_else(|| naive.and_utc())
}

/// Last millisecond of `date` (23:59:59.999) in `tz`.
#[must_use]
pub fn day_end_in<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
    tz.from_local_datetime(&naive)
        .latest()
        .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc))
}

/// Detail-panel rendering: `10 Jan 2025, 02:30 pm`.
#[must_use]
pub fn format_detail_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format("%d %b %Y, %I:%M %P")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveTime};
    use pretty_assertions::assert_eq;

    /// +02:00 until 2024-04-26 00:00 local, then +03:00; 00:00..01:00 that
    /// night never happens.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn switch_local() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 4, 26)
                .unwrap()
                .and_time(NaiveTime::MIN)
        }

        fn winter() -> FixedOffset {
            FixedOffset::east_opt(2 * 3600).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(3 * 3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            Self
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let switch = Self::switch_local();
            if *local < switch {
                LocalResult::Single(Self::winter())
            } else if *local < switch + TimeDelta::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::summer())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch_local() - TimeDelta::hours(2) {
                Self::winter()
            } else {
                Self::summer()
            }
        }
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_timestamp_in("2025-01-10T12:00:00+02:00", &Utc).unwrap();
        assert_eq!(parsed, utc("2025-01-10T10:00:00Z"));
    }

    #[test]
    fn naive_timestamps_use_the_given_zone() {
        let cairo = FixedOffset::east_opt(2 * 3600).unwrap();
        let parsed = parse_timestamp_in("2025-01-10 12:00:00", &cairo).unwrap();
        assert_eq!(parsed, utc("2025-01-10T10:00:00Z"));

        let minutes_only = parse_timestamp_in("2025-01-10T08:30", &Utc).unwrap();
        assert_eq!(minutes_only, utc("2025-01-10T08:30:00Z"));
    }

    #[test]
    fn time_skipped_by_dst_lands_after_the_gap() {
        let parsed = parse_timestamp_in("2024-04-26 00:30:00", &SpringForward).unwrap();
        assert_eq!(parsed, utc("2024-04-25T22:30:00Z"));
        assert_eq!(
            format_detail_in(&parsed, &SpringForward),
            "26 Apr 2024, 01:30 am"
        );

        let date = NaiveDate::from_ymd_opt(2024, 4, 26).unwrap();
        assert_eq!(day_start_in(date, &SpringForward), utc("2024-04-25T22:00:00Z"));
        assert!(parsed >= day_start_in(date, &SpringForward));
    }

    #[test]
    fn bare_date_on_a_dst_switch_is_not_dropped() {
        let parsed = parse_timestamp_in("2024-04-26", &SpringForward).unwrap();
        assert_eq!(parsed, utc("2024-04-25T22:00:00Z"));
    }

    #[test]
    fn bare_date_is_midnight() {
        let parsed = parse_timestamp_in("2025-01-10", &Utc).unwrap();
        assert_eq!(parsed, utc("2025-01-10T00:00:00Z"));
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_timestamp_in("", &Utc).is_none());
        assert!(parse_timestamp_in("yesterday", &Utc).is_none());
        assert!(parse_timestamp_in("2025-13-40", &Utc).is_none());
    }

    #[test]
    fn day_bounds_cover_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(day_start_in(date, &Utc), utc("2025-01-10T00:00:00Z"));
        assert_eq!(day_end_in(date, &Utc), utc("2025-01-10T23:59:59.999Z"));

        let cairo = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(day_start_in(date, &cairo), utc("2025-01-09T22:00:00Z"));
    }

    #[test]
    fn detail_format_is_day_month_year_twelve_hour() {
        let ts = utc("2025-01-10T14:05:00Z");
        assert_eq!(format_detail_in(&ts, &Utc), "10 Jan 2025, 02:05 pm");
    }
}
