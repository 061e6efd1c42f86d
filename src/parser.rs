//! Line parser for trip-record files.
//!
//! Only the pickup zone (field 2) and the pickup timestamp (field 4) are
//! read. Everything else on the line is ignored.

use crate::stats::SkipReason;

/// Number of hour buckets tracked per zone.
pub const HOURS_PER_DAY: usize = 24;

const DELIMITER: u8 = b',';

/// Shortest timestamp that still carries `YYYY-MM-DD HH`.
const MIN_TIMESTAMP_LEN: usize = 13;
const DATE_TIME_SEPARATOR_AT: usize = 10;

/// The two values pulled out of a valid record.
///
/// The zone is kept as raw bytes; any non-empty field is a valid key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRecord<'a> {
    pub zone: &'a [u8],
    pub hour: usize,
}

/// Parses one raw line (without its `\n`).
///
/// A trailing `\r` is tolerated. Returns the reason the line was rejected
/// when it does not have the expected shape.
///
/// # Errors
///
/// Returns a [`SkipReason`] for any line that fails a structural check.
pub fn parse_record(line: &[u8]) -> Result<TripRecord<'_>, SkipReason> {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.is_empty() {
        return Err(SkipReason::Empty);
    }

    let mut commas = line
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == DELIMITER)
        .map(|(i, _)| i);
    let (Some(c1), Some(c2), Some(c3), Some(c4)) =
        (commas.next(), commas.next(), commas.next(), commas.next())
    else {
        return Err(SkipReason::TooFewFields);
    };

    let zone = &line[c1 + 1..c2];
    if zone.is_empty() {
        return Err(SkipReason::EmptyZone);
    }

    let hour = parse_hour(&line[c3 + 1..c4])?;

    Ok(TripRecord { zone, hour })
}

/// Reads the hour-of-day out of a `YYYY-MM-DD HH...` timestamp field.
fn parse_hour(timestamp: &[u8]) -> Result<usize, SkipReason> {
    if timestamp.len() < MIN_TIMESTAMP_LEN
        || timestamp[DATE_TIME_SEPARATOR_AT] != b' '
    {
        return Err(SkipReason::MalformedTimestamp);
    }

    let (h1, h2) = (timestamp[11], timestamp[12]);
    if !h1.is_ascii_digit() || !h2.is_ascii_digit() {
        return Err(SkipReason::MalformedTimestamp);
    }

    let hour = usize::from(h1 - b'0') * 10 + usize::from(h2 - b'0');
    if hour >= HOURS_PER_DAY {
        return Err(SkipReason::HourOutOfRange);
    }
    Ok(hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_record() {
        let record = parse_record(b"1,A,Z,2023-01-01 08:15,foo").unwrap();
        assert_eq!(record, TripRecord { zone: b"A", hour: 8 });
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        let record = parse_record(b"1,Zone7,Z,2023-01-01 23:59:59,foo\r").unwrap();
        assert_eq!(record.zone, &b"Zone7"[..]);
        assert_eq!(record.hour, 23);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let record = parse_record(b"9,B,Z,2023-01-01 00:00,a,b,c,d").unwrap();
        assert_eq!(record.hour, 0);
    }

    #[test]
    fn test_empty_lines() {
        assert_eq!(parse_record(b""), Err(SkipReason::Empty));
        assert_eq!(parse_record(b"\r"), Err(SkipReason::Empty));
    }

    #[test]
    fn test_too_few_delimiters() {
        // Four fields means only three commas.
        assert_eq!(
            parse_record(b"1,A,Z,2023-01-01 08:15"),
            Err(SkipReason::TooFewFields)
        );
        assert_eq!(parse_record(b"no commas"), Err(SkipReason::TooFewFields));
    }

    #[test]
    fn test_empty_zone() {
        assert_eq!(
            parse_record(b"4,,Z,2023-01-01 10:00,foo"),
            Err(SkipReason::EmptyZone)
        );
    }

    #[test]
    fn test_short_timestamp() {
        assert_eq!(
            parse_record(b"1,A,Z,2023-01-01 8,foo"),
            Err(SkipReason::MalformedTimestamp)
        );
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            parse_record(b"1,A,Z,2023-01-01T08:15,foo"),
            Err(SkipReason::MalformedTimestamp)
        );
    }

    #[test]
    fn test_non_digit_hour() {
        assert_eq!(
            parse_record(b"1,A,Z,2023-01-01 0x:15,foo"),
            Err(SkipReason::MalformedTimestamp)
        );
    }

    #[test]
    fn test_hour_out_of_range() {
        assert_eq!(
            parse_record(b"5,C,Z,2023-01-01 25:00,foo"),
            Err(SkipReason::HourOutOfRange)
        );
        assert_eq!(
            parse_record(b"5,C,Z,2023-01-01 24:00,foo"),
            Err(SkipReason::HourOutOfRange)
        );
    }

    #[test]
    fn test_date_portion_is_not_validated() {
        let record = parse_record(b"1,A,Z,not-a-date 07:00,foo").unwrap();
        assert_eq!(record.hour, 7);
    }

    #[test]
    fn test_shortest_accepted_timestamp() {
        // "2023-01-01 08" is exactly 13 bytes.
        let record = parse_record(b"1,A,Z,2023-01-01 08,foo").unwrap();
        assert_eq!(record.hour, 8);
    }

    #[test]
    fn test_non_utf8_zone_is_accepted() {
        let record = parse_record(b"1,Z\xfcrich,Z,2023-01-01 07:00,foo").unwrap();
        assert_eq!(record.zone, &b"Z\xfcrich"[..]);
        assert_eq!(record.hour, 7);
    }
}
