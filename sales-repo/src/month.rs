use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

use crate::transaction_repo::DateRange;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Year that every month selector is resolved against.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReferenceYear(i32);

impl ReferenceYear {
    pub const DEFAULT: ReferenceYear = ReferenceYear(2024);

    // Keeps `year + 1` inside the dates chrono can represent.
    const SUPPORTED: std::ops::RangeInclusive<i32> = -200_000..=200_000;

    pub fn new(year: i32) -> Option<ReferenceYear> {
        if Self::SUPPORTED.contains(&year) {
            Some(ReferenceYear(year))
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.0
    }
}

impl Default for ReferenceYear {
    fn default() -> Self {
        ReferenceYear::DEFAULT
    }
}

/// A calendar month, always in `1..=12`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Month(u32);

impl Month {
    pub const JANUARY: Month = Month(1);
    pub const MARCH: Month = Month(3);
    pub const DECEMBER: Month = Month(12);

    pub fn new(number: u32) -> Option<Month> {
        if (1..=12).contains(&number) {
            Some(Month(number))
        } else {
            None
        }
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.0 as usize - 1]
    }

    pub fn all() -> impl Iterator<Item = Month> {
        (1..=12).map(Month)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid month {0:?}, expected a number from 1 to 12 or a month name")]
pub struct ParseMonthError(pub String);

impl FromStr for Month {
    type Err = ParseMonthError;

    /// Accepts `1`-`12`, full month names and three letter abbreviations, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u32>() {
            return Month::new(number).ok_or_else(|| ParseMonthError(s.to_owned()));
        }

        let lowercase = trimmed.to_lowercase();
        if lowercase.len() >= 3 {
            for month in Month::all() {
                let name = month.name().to_lowercase();
                if name == lowercase || (lowercase.len() == 3 && name.starts_with(&lowercase)) {
                    return Ok(month);
                }
            }
        }
        Err(ParseMonthError(s.to_owned()))
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is a valid time"))
}

/// Range covering `month` of the reference year, `[first of month, first of next month)`.
///
/// December ends on the first of January of the following year.
pub fn month_range(reference_year: ReferenceYear, month: Month) -> DateRange {
    let year = reference_year.year();
    let (end_year, end_month) = if month == Month::DECEMBER {
        (year + 1, 1)
    } else {
        (year, month.number() + 1)
    };

    let start = NaiveDate::from_ymd_opt(year, month.number(), 1)
        .expect("reference year should be within the supported range");
    let end = NaiveDate::from_ymd_opt(end_year, end_month, 1)
        .expect("reference year should be within the supported range");

    DateRange::new(start_of_day(start), start_of_day(end))
}
