use crate::errors::DateError;
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// UTC+9, the zone every civil date in the log is observed in unless configured otherwise.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

/// A calendar day with no time-of-day, already resolved in the reference zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CivilDate(NaiveDate);

impl CivilDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Column of this date in a Sunday-first week (Sunday = 0, Saturday = 6).
    pub fn weekday_from_sunday(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Shifts by whole days. `None` when the result leaves chrono's date range.
    pub fn add_days(self, n: i64) -> Option<Self> {
        let days = Days::new(n.unsigned_abs());
        let shifted = if n >= 0 {
            self.0.checked_add_days(days)
        } else {
            self.0.checked_sub_days(days)
        };
        shifted.map(Self)
    }

    pub fn succ(self) -> Option<Self> {
        self.add_days(1)
    }

    pub fn pred(self) -> Option<Self> {
        self.add_days(-1)
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CivilDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = numeric_parts(s, &[4, 2, 2])?;
        let year = parse_part(s, parts[0])?;
        let month = parse_part(s, parts[1])?;
        let day = parse_part(s, parts[2])?;
        Self::new(year as i32, month, day)
    }
}

impl TryFrom<String> for CivilDate {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CivilDate> for String {
    fn from(date: CivilDate) -> Self {
        date.to_string()
    }
}

/// Month selector for the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        CivilDate::new(year, month, 1)?;
        Ok(Self { year, month })
    }

    pub fn of(date: CivilDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> CivilDate {
        CivilDate(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN))
    }

    pub fn contains(self, date: CivilDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn prev(self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12).ok()
        } else {
            Self::new(self.year, self.month - 1).ok()
        }
    }

    pub fn next(self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1).ok()
        } else {
            Self::new(self.year, self.month + 1).ok()
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = numeric_parts(s, &[4, 2])?;
        let year = parse_part(s, parts[0])?;
        let month = parse_part(s, parts[1])?;
        Self::new(year as i32, month)
    }
}

fn numeric_parts<'a>(s: &'a str, widths: &[usize]) -> Result<Vec<&'a str>, DateError> {
    let parts: Vec<&str> = s.split('-').collect();
    let well_formed = parts.len() == widths.len()
        && parts
            .iter()
            .zip(widths)
            .all(|(part, width)| part.len() == *width && part.bytes().all(|b| b.is_ascii_digit()));
    if well_formed {
        Ok(parts)
    } else {
        Err(DateError::Malformed(s.to_string()))
    }
}

fn parse_part(s: &str, part: &str) -> Result<u32, DateError> {
    part.parse()
        .map_err(|_| DateError::Malformed(s.to_string()))
}

/// Builds the reference offset from whole minutes east of UTC.
pub fn reference_offset(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}

pub fn default_reference_offset() -> FixedOffset {
    reference_offset(DEFAULT_UTC_OFFSET_MINUTES).unwrap_or_else(|| Utc.fix())
}

/// Civil date of `instant` as observed at `offset`, whatever offset the instant carries.
pub fn normalize<Tz: TimeZone>(instant: &DateTime<Tz>, offset: &FixedOffset) -> CivilDate {
    CivilDate(instant.with_timezone(offset).date_naive())
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` civil date.
pub fn normalize_str(input: &str, offset: &FixedOffset) -> Result<CivilDate, DateError> {
    let input = input.trim();
    if input.len() == 10 {
        return input.parse();
    }
    DateTime::parse_from_rfc3339(input)
        .map(|instant| normalize(&instant, offset))
        .map_err(|_| DateError::Malformed(input.to_string()))
}

pub fn compare(a: CivilDate, b: CivilDate) -> i8 {
    a.cmp(&b) as i8
}

pub fn is_consecutive(a: CivilDate, b: CivilDate) -> bool {
    a.succ() == Some(b)
}

/// Source of "today". Pure code takes dates as arguments; only the glue holds a clock.
pub trait Clock: Send + Sync {
    fn today(&self) -> CivilDate;
    fn now(&self) -> DateTime<FixedOffset>;
    fn offset(&self) -> FixedOffset;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> CivilDate {
        normalize(&Utc::now(), &self.offset)
    }

    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock pinned to one civil date; timestamps still advance with the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: CivilDate,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(today: CivilDate, offset: FixedOffset) -> Self {
        Self { today, offset }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CivilDate {
        self.today
    }

    fn now(&self) -> DateTime<FixedOffset> {
        let wall = Utc::now().with_timezone(&self.offset);
        let time = wall.time();
        self.offset
            .from_local_datetime(&self.today.0.and_time(time))
            .single()
            .unwrap_or(wall)
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
