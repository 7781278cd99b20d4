//! ISO-8601 datetime literals.
//!
//! A datetime starts with the 11-byte prefix `YYYY-MM-DDT` and extends
//! greedily through the optional time, fraction and zone parts. The
//! scanner only checks shape; the decoder parses the lexeme against a
//! list of layouts, most specific first, and converts the instant to
//! seconds since the Unix epoch with the fraction preserved.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::tokenizer::is_int_digit;
use super::Scan;

/// Scans the datetime at the front of `v`. `Scan::Bad` means the text
/// committed to a datetime (valid date prefix) but its tail is broken.
pub(crate) fn scan_iso_datetime(v: &[u8]) -> Scan {
    if v.len() < 11
        || v[10] != b'T'
        || v[4] != b'-'
        || v[7] != b'-'
        || !is_int_digit(v[0])
        || !is_int_digit(v[1])
        || !is_int_digit(v[2])
        || !is_int_digit(v[3])
        || !is_int_digit(v[5])
        || !is_int_digit(v[6])
        || !is_int_digit(v[8])
        || !is_int_digit(v[9])
    {
        return Scan::No;
    }
    let mut n = 11;
    let mut v = &v[11..];
    if v.is_empty() {
        return Scan::Len(n);
    }
    // HH:MM
    if v.len() < 5
        || !is_int_digit(v[0])
        || !is_int_digit(v[1])
        || v[2] != b':'
        || !is_int_digit(v[3])
        || !is_int_digit(v[4])
    {
        return Scan::Len(n);
    }
    n += 5;
    v = &v[5..];
    if v.is_empty() {
        return Scan::Len(n);
    }
    if v[0] == b'Z' {
        return Scan::Len(n + 1);
    }
    if v[0] != b':' {
        return Scan::Len(n);
    }
    // :SS
    if v.len() < 3 || !is_int_digit(v[1]) || !is_int_digit(v[2]) {
        return Scan::Bad;
    }
    n += 3;
    v = &v[3..];
    if v.is_empty() {
        return Scan::Len(n);
    }
    if v[0] == b'Z' {
        return Scan::Len(n + 1);
    }
    if v[0] != b'.' && v[0] != b'+' && v[0] != b'-' {
        return Scan::Len(n);
    }
    // milli or micro seconds
    if v[0] == b'.' {
        n += 1;
        v = &v[1..];
        let mut p = 0;
        while p < v.len() && is_int_digit(v[p]) {
            p += 1;
        }
        if p != 6 && p != 3 {
            return Scan::Bad;
        }
        n += p;
        v = &v[p..];
    }
    if v.is_empty() {
        return Scan::Len(n);
    }
    if v[0] == b'Z' {
        return Scan::Len(n + 1);
    }
    // optional time offset
    if v[0] == b'+' || v[0] == b'-' {
        n += 1;
        v = &v[1..];
        if v.len() < 5
            || v[2] != b':'
            || !is_int_digit(v[0])
            || !is_int_digit(v[1])
            || !is_int_digit(v[3])
            || !is_int_digit(v[4])
        {
            return Scan::Bad;
        }
        n += 5;
    }
    Scan::Len(n)
}

/// Decodes a scanned datetime to epoch seconds. `None` for fields chrono
/// rejects (hour 25), leap seconds, and instants before the epoch.
pub(crate) fn decode_iso_datetime(v: &[u8]) -> Option<f64> {
    let s = std::str::from_utf8(v).ok()?;
    let (secs, nanos) = instant(s)?;
    if nanos >= 1_000_000_000 {
        // chrono encodes second 60 as an overflowing fraction
        return None;
    }
    let x = secs as f64 + f64::from(nanos) / 1e9;
    if x < 0.0 {
        return None;
    }
    Some(x)
}

fn instant(s: &str) -> Option<(i64, u32)> {
    for fmt in ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%dT%H:%MZ"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            let t = t.and_utc();
            return Some((t.timestamp(), t.timestamp_subsec_nanos()));
        }
    }
    if let Ok(t) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%:z") {
        return Some((t.timestamp(), t.timestamp_subsec_nanos()));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            let t = t.and_utc();
            return Some((t.timestamp(), t.timestamp_subsec_nanos()));
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%dT") {
        let t = d.and_hms_opt(0, 0, 0)?.and_utc();
        return Some((t.timestamp(), t.timestamp_subsec_nanos()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_shapes() {
        assert_eq!(scan_iso_datetime(b"2020-12-23"), Scan::No);
        assert_eq!(scan_iso_datetime(b"2020-12-23T"), Scan::Len(11));
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40"), Scan::Len(16));
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40Z"), Scan::Len(17));
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40:05"), Scan::Len(19));
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40:05Z"), Scan::Len(20));
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40:05.123"), Scan::Len(23));
        assert_eq!(
            scan_iso_datetime(b"2020-12-23T15:40:05.123456Z"),
            Scan::Len(27)
        );
        assert_eq!(
            scan_iso_datetime(b"2020-12-23T15:40:05+01:00"),
            Scan::Len(25)
        );
        assert_eq!(
            scan_iso_datetime(b"2020-12-23T15:40:05.123-07:00"),
            Scan::Len(29)
        );
    }

    #[test]
    fn scan_greedy_stops() {
        // A valid prefix with an unconvincing tail keeps only the prefix.
        assert_eq!(scan_iso_datetime(b"2020-12-23T + 5"), Scan::Len(11));
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40 + 5"), Scan::Len(16));
    }

    #[test]
    fn scan_broken_tails() {
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40:0"), Scan::Bad);
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40:05.12"), Scan::Bad);
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40:05.1234"), Scan::Bad);
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40:05+01"), Scan::Bad);
        assert_eq!(scan_iso_datetime(b"2020-12-23T15:40:05+0a:00"), Scan::Bad);
    }

    #[test]
    fn decode_epoch_values() {
        assert_eq!(decode_iso_datetime(b"2020-12-23T15:40:05"), Some(1608738005.0));
        assert_eq!(decode_iso_datetime(b"2020-12-23T15:40:05Z"), Some(1608738005.0));
        assert_eq!(decode_iso_datetime(b"1970-01-01T"), Some(0.0));
        assert_eq!(decode_iso_datetime(b"1970-01-01T00:01"), Some(60.0));
        assert_eq!(
            decode_iso_datetime(b"2020-12-23T15:40:05.500"),
            Some(1608738005.5)
        );
        // +01:00 is one hour behind the same UTC wall-clock reading
        assert_eq!(
            decode_iso_datetime(b"2020-12-23T15:40:05+01:00"),
            Some(1608738005.0 - 3600.0)
        );
    }

    #[test]
    fn decode_rejects_bad_fields_and_pre_epoch() {
        assert_eq!(decode_iso_datetime(b"2020-12-23T25:40:05"), None);
        assert_eq!(decode_iso_datetime(b"2020-12-23T15:40:60"), None);
        assert_eq!(decode_iso_datetime(b"2020-13-23T"), None);
        assert_eq!(decode_iso_datetime(b"1960-01-01T"), None);
    }
}
