//! Timezone lookups and conversions.
//!
//! Pure functions over the IANA database shipped with `chrono-tz`; nothing
//! here touches the network.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, SecondsFormat, TimeZone, Timelike, Utc,
};
use chrono_tz::{OffsetComponents, Tz};
use serde::Serialize;
use tracing::debug;

use crate::domains::tools::{ToolError, ToolResult};

/// Formats tried for inputs that carry a UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// Formats tried for wall-clock inputs without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Hour-only forms, matched after appending `:00`.
const HOUR_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Years representable in inputs and outputs.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Snapshot of a timezone's state at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneInfo {
    pub timezone: String,
    /// UTC offset as `+HHMM` / `-HHMM`.
    pub offset: String,
    pub is_dst: bool,
    pub abbreviation: String,
}

/// A parsed ISO-8601 timestamp, with or without a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ParsedTime {
    Offset(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

/// Timezone arithmetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeResolver;

impl TimeResolver {
    pub fn new() -> Self {
        Self
    }

    /// Current time in `zone`, ISO-8601 with offset.
    pub fn current_datetime(&self, zone: &str) -> ToolResult<String> {
        let tz = parse_zone(zone)?;
        to_iso(&Utc::now().with_timezone(&tz))
    }

    /// Offset, DST flag and abbreviation of `zone` right now.
    pub fn zone_info(&self, zone: &str) -> ToolResult<ZoneInfo> {
        self.zone_info_at(zone, Utc::now())
    }

    /// Offset, DST flag and abbreviation of `zone` at `instant`.
    pub fn zone_info_at(&self, zone: &str, instant: DateTime<Utc>) -> ToolResult<ZoneInfo> {
        let tz = parse_zone(zone)?;
        let local = instant.with_timezone(&tz);

        Ok(ZoneInfo {
            timezone: zone.to_string(),
            offset: local.format("%z").to_string(),
            is_dst: local.offset().dst_offset() != Duration::zero(),
            abbreviation: local.format("%Z").to_string(),
        })
    }

    /// Convert `time_str` from `from_zone` to `to_zone`.
    ///
    /// A wall-clock input is read as local time in `from_zone`. An input
    /// carrying its own offset is first re-anchored into `from_zone`, which
    /// keeps the instant and only changes how it is read.
    pub fn convert(&self, time_str: &str, from_zone: &str, to_zone: &str) -> ToolResult<String> {
        let from_tz = parse_zone(from_zone)?;
        let to_tz = parse_zone(to_zone)?;

        let anchored = match parse_time(time_str)? {
            ParsedTime::Naive(naive) => localize(from_tz, naive),
            ParsedTime::Offset(dt) => dt.with_timezone(&from_tz),
        };
        debug!("Anchored {} in {} as {}", time_str, from_zone, anchored);

        to_iso(&anchored.with_timezone(&to_tz))
    }
}

fn parse_zone(name: &str) -> ToolResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ToolError::invalid_parameter(format!("Unknown timezone: {}", name)))
}

/// ISO-8601 with offset. Sub-second precision is microseconds, and only
/// shown when non-zero.
fn to_iso(dt: &DateTime<Tz>) -> ToolResult<String> {
    let offset = dt.offset().fix();
    let local = dt
        .naive_utc()
        .checked_add_offset(offset)
        .filter(|local| YEARS.contains(&local.year()))
        .ok_or_else(|| {
            ToolError::invalid_parameter(format!(
                "Converted time is out of range: {}",
                dt.naive_utc()
            ))
        })?;

    let precision = if local.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    Ok(DateTime::<FixedOffset>::from_naive_utc_and_offset(dt.naive_utc(), offset)
        .to_rfc3339_opts(precision, false))
}

fn parse_time(input: &str) -> ToolResult<ParsedTime> {
    let invalid = || {
        ToolError::invalid_parameter(format!(
            "Invalid time format: {}. Expected ISO format.",
            input
        ))
    };

    let parsed = parse_iso(input.trim()).ok_or_else(invalid)?;
    let year = match parsed {
        ParsedTime::Offset(dt) => dt.year(),
        ParsedTime::Naive(naive) => naive.year(),
    };
    if !YEARS.contains(&year) {
        return Err(invalid());
    }
    Ok(parsed)
}

fn parse_iso(s: &str) -> Option<ParsedTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ParsedTime::Offset(dt));
    }

    // `Z` is not understood by `%z`, spell it out.
    let zulu = s
        .strip_suffix('Z')
        .or_else(|| s.strip_suffix('z'))
        .map(|prefix| format!("{}+00:00", prefix));
    let with_offset = zulu.as_deref().unwrap_or(s);

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(with_offset, fmt) {
            return Some(ParsedTime::Offset(dt));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ParsedTime::Naive(naive));
        }
    }

    let padded = format!("{}:00", s);
    for fmt in HOUR_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&padded, fmt) {
            return Some(ParsedTime::Naive(naive));
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| ParsedTime::Naive(date.and_time(NaiveTime::MIN)))
}

/// Attach `tz` to a wall-clock time.
///
/// Ambiguous times (clocks falling back) resolve to the standard-time
/// reading, which is the later instant. Times inside a spring-forward gap
/// are read with the offset in force before the gap.
fn localize(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, later) => later,
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&(naive - Duration::days(1))).fix();
            let utc = naive - Duration::seconds(i64::from(before.local_minus_utc()));
            Utc.from_utc_datetime(&utc).with_timezone(&tz)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> TimeResolver {
        TimeResolver::new()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn is_hhmm_offset(offset: &str) -> bool {
        let bytes = offset.as_bytes();
        bytes.len() == 5
            && (bytes[0] == b'+' || bytes[0] == b'-')
            && bytes[1..].iter().all(u8::is_ascii_digit)
    }

    #[test]
    fn test_current_datetime_is_iso_with_offset() {
        let now = resolver().current_datetime("UTC").unwrap();
        let parsed = DateTime::parse_from_rfc3339(&now).unwrap();
        assert_eq!(parsed.offset().local_minus_utc(), 0);
        assert!(now.contains('T'));
        assert!(now.ends_with("+00:00"));

        let shanghai = resolver().current_datetime("Asia/Shanghai").unwrap();
        assert!(shanghai.ends_with("+08:00"));
    }

    #[test]
    fn test_invalid_timezone() {
        let err = resolver().current_datetime("Invalid/Timezone").unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter(_)));
        assert!(err.to_string().contains("Invalid/Timezone"));

        assert!(matches!(
            resolver().zone_info("Mars/Olympus").unwrap_err(),
            ToolError::InvalidParameter(_)
        ));
    }

    #[test]
    fn test_zone_info_shanghai() {
        let info = resolver().zone_info("Asia/Shanghai").unwrap();
        assert_eq!(info.timezone, "Asia/Shanghai");
        assert_eq!(info.offset, "+0800");
        assert!(!info.is_dst);
        assert_eq!(info.abbreviation, "CST");
    }

    #[test]
    fn test_zone_info_follows_dst() {
        let summer = resolver()
            .zone_info_at("Europe/Berlin", utc("2023-07-01T12:00:00Z"))
            .unwrap();
        assert_eq!(summer.offset, "+0200");
        assert!(summer.is_dst);
        assert_eq!(summer.abbreviation, "CEST");

        let winter = resolver()
            .zone_info_at("Europe/Berlin", utc("2023-01-15T12:00:00Z"))
            .unwrap();
        assert_eq!(winter.offset, "+0100");
        assert!(!winter.is_dst);
        assert_eq!(winter.abbreviation, "CET");

        let ny = resolver()
            .zone_info_at("America/New_York", utc("2023-07-01T12:00:00Z"))
            .unwrap();
        assert_eq!(ny.offset, "-0400");
        assert!(ny.is_dst);
    }

    #[test]
    fn test_zone_info_offset_shape() {
        for zone in [
            "UTC",
            "Asia/Kolkata",
            "America/St_Johns",
            "Pacific/Chatham",
            "America/Los_Angeles",
            "Australia/Adelaide",
        ] {
            let info = resolver().zone_info(zone).unwrap();
            assert_eq!(info.timezone, zone);
            assert!(is_hhmm_offset(&info.offset), "{} -> {}", zone, info.offset);
        }
    }

    #[test]
    fn test_convert_utc_to_shanghai() {
        let converted = resolver()
            .convert("2023-01-01T12:00:00+00:00", "UTC", "Asia/Shanghai")
            .unwrap();
        assert_eq!(converted, "2023-01-01T20:00:00+08:00");
    }

    #[test]
    fn test_convert_naive_uses_source_zone() {
        let converted = resolver()
            .convert("2023-01-01T12:00:00", "Asia/Shanghai", "UTC")
            .unwrap();
        assert_eq!(converted, "2023-01-01T04:00:00+00:00");

        let summer = resolver()
            .convert("2023-07-01 12:00", "America/New_York", "UTC")
            .unwrap();
        assert_eq!(summer, "2023-07-01T16:00:00+00:00");
    }

    #[test]
    fn test_convert_reanchors_embedded_offset() {
        // The embedded +05:00 fixes the instant; the source zone does not move it.
        let converted = resolver()
            .convert("2023-01-01T12:00:00+05:00", "Asia/Tokyo", "UTC")
            .unwrap();
        assert_eq!(converted, "2023-01-01T07:00:00+00:00");
    }

    #[test]
    fn test_convert_accepts_zulu_and_date_only() {
        assert_eq!(
            resolver()
                .convert("2023-01-01T12:00:00Z", "UTC", "Europe/Paris")
                .unwrap(),
            "2023-01-01T13:00:00+01:00"
        );
        assert_eq!(
            resolver()
                .convert("2023-01-01", "UTC", "Asia/Shanghai")
                .unwrap(),
            "2023-01-01T08:00:00+08:00"
        );
        assert_eq!(
            resolver()
                .convert("2023-01-01T12:00+0000", "UTC", "Asia/Shanghai")
                .unwrap(),
            "2023-01-01T20:00:00+08:00"
        );
    }

    #[test]
    fn test_convert_keeps_fractional_seconds() {
        let converted = resolver()
            .convert("2023-01-01T12:00:00.5+00:00", "UTC", "Asia/Shanghai")
            .unwrap();
        assert_eq!(converted, "2023-01-01T20:00:00.500000+08:00");
    }

    #[test]
    fn test_convert_accepts_hour_only() {
        let converted = resolver()
            .convert("2023-01-01T12", "Asia/Shanghai", "UTC")
            .unwrap();
        assert_eq!(converted, "2023-01-01T04:00:00+00:00");
    }

    #[test]
    fn test_convert_rejects_years_outside_four_digits() {
        let inputs = [
            ("+262142-12-31T23:59:59", "UTC", "Pacific/Kiritimati"),
            ("-262143-01-01T00:00:00", "UTC", "America/Los_Angeles"),
            ("+10000-01-01T00:00:00+00:00", "UTC", "Asia/Tokyo"),
            ("0000-06-01T00:00:00", "UTC", "Europe/Paris"),
        ];
        for (time_str, from, to) in inputs {
            let err = resolver().convert(time_str, from, to).unwrap_err();
            assert!(matches!(err, ToolError::InvalidParameter(_)), "{}", time_str);
            assert!(err.to_string().contains("Invalid time format"), "{}", time_str);
        }
    }

    #[test]
    fn test_convert_result_past_year_9999() {
        let err = resolver()
            .convert("9999-12-31T23:00:00", "UTC", "Pacific/Kiritimati")
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter(_)));
        assert!(err.to_string().contains("out of range"));

        let edge = resolver()
            .convert("9999-12-31T09:59:59", "UTC", "Pacific/Kiritimati")
            .unwrap();
        assert_eq!(edge, "9999-12-31T23:59:59+14:00");
    }

    #[test]
    fn test_convert_ambiguous_local_time_prefers_standard() {
        let converted = resolver()
            .convert("2023-11-05T01:30:00", "America/New_York", "UTC")
            .unwrap();
        assert_eq!(converted, "2023-11-05T06:30:00+00:00");
    }

    #[test]
    fn test_convert_nonexistent_local_time() {
        let converted = resolver()
            .convert("2023-03-12T02:30:00", "America/New_York", "UTC")
            .unwrap();
        assert_eq!(converted, "2023-03-12T07:30:00+00:00");
    }

    #[test]
    fn test_convert_round_trip() {
        let zones = ["UTC", "Asia/Shanghai", "America/New_York", "Europe/London", "Asia/Kolkata"];
        let times = [
            "2023-01-01T12:00:00+00:00",
            "2024-02-29T23:59:59-03:00",
            "2023-07-15T08:30:00",
            "2023-10-29T00:15:00+00:00",
        ];

        for t in times {
            for a in zones {
                for b in zones {
                    let there = resolver().convert(t, a, b).unwrap();
                    let back = resolver().convert(&there, b, a).unwrap();
                    let expected = resolver().convert(t, a, a).unwrap();
                    assert_eq!(
                        DateTime::parse_from_rfc3339(&back).unwrap(),
                        DateTime::parse_from_rfc3339(&expected).unwrap(),
                        "{} {} -> {}",
                        t,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_convert_invalid_inputs() {
        let err = resolver()
            .convert("yesterday at noon", "UTC", "Asia/Shanghai")
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter(_)));
        assert!(err.to_string().contains("Invalid time format"));

        let err = resolver()
            .convert("2023-01-01T12:00:00", "UTC", "Nowhere/Special")
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter(_)));

        let err = resolver()
            .convert("2023-01-01T12:00:00", "Nowhere/Special", "UTC")
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter(_)));
    }
}
