//! Recency timestamps for merge decisions.
//!
//! Values parse to milliseconds since the Unix epoch. Anything that does not
//! parse becomes `Invalid`, which compares like NaN: it is never greater,
//! smaller or equal to anything, itself included.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::row::Row;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

#[derive(Debug, Clone, Copy)]
pub enum Timestamp {
    Millis(i64),
    Invalid,
}

impl Timestamp {
    /// Parse a raw column value.
    ///
    /// Absent and empty values are the epoch (`Millis(0)`); a value that is
    /// only whitespace does not parse.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Timestamp::Millis(0),
            Some(s) => parse_millis(s.trim()).map_or(Timestamp::Invalid, Timestamp::Millis),
        }
    }

    pub fn millis(&self) -> Option<i64> {
        match self {
            Timestamp::Millis(ms) => Some(*ms),
            Timestamp::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Timestamp::Millis(_))
    }

    /// Strictly newer. False whenever either side is `Invalid`.
    pub fn is_newer_than(&self, other: &Timestamp) -> bool {
        self > other
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        matches!((self, other), (Timestamp::Millis(a), Timestamp::Millis(b)) if a == b)
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Timestamp::Millis(a), Timestamp::Millis(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Recency of a row: `modifyTime`, or `createTime` when `modifyTime` is absent.
pub fn record_timestamp(row: &Row) -> Timestamp {
    Timestamp::parse(row.modify_time().or_else(|| row.create_time()))
}

fn parse_millis(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return parse_numeric(s);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.timestamp_millis());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis());
    }

    // naive values are read as UTC; a trailing `Z` says so explicitly
    let naive = s.strip_suffix(['Z', 'z']).unwrap_or(s);
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(ndt.and_utc().timestamp_millis());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date_millis(date);
        }
    }

    // YYYY-MM
    if s.len() == 7 && s.as_bytes()[4] == b'-' {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return date_millis(date);
        }
    }

    None
}

/// Bare digits: a four digit year, or a Unix epoch value in seconds (up to
/// 11 digits) or milliseconds.
fn parse_numeric(s: &str) -> Option<i64> {
    match s.len() {
        4 => {
            let year: i32 = s.parse().ok()?;
            date_millis(NaiveDate::from_ymd_opt(year, 1, 1)?)
        }
        9..=11 => s.parse::<i64>().ok()?.checked_mul(1000),
        12..=16 => s.parse().ok(),
        _ => None,
    }
}

fn date_millis(date: NaiveDate) -> Option<i64> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}
