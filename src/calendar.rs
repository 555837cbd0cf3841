use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;

use crate::error::{Error, ErrorKind, Result};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

pub fn first_day_of_month(month: &Month, year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1).ok_or_else(|| {
        Error::new(
            ErrorKind::DateOutOfRange,
            &format!("{} {} cannot be represented", month.name(), year),
        )
    })
}

/// Months of `year` to display, most recent first.
///
/// A month is left out when its first day lies after `now`, so a year
/// entirely in the future yields nothing and the month containing `now`
/// is always part of the result.
pub fn enumerate_months(year: i32, now: &NaiveDate) -> Vec<Month> {
    (1..=12u32)
        .rev()
        .filter(|&m| (year, m) <= (now.year(), now.month()))
        .filter_map(Month::from_u32)
        .collect()
}

/// Day layout of a single month in a Monday-first, seven column grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    first: NaiveDate,
    month: Month,
    leading_padding: u32,
    days: Vec<u32>,
}

impl MonthGrid {
    pub const COLUMNS: u32 = 7;

    pub fn new(year: i32, month: Month) -> Result<Self> {
        let first = first_day_of_month(&month, year)?;
        let leading_padding = first.weekday().num_days_from_monday();
        let days = (1..=days_of_month(&month, year)).collect();

        Ok(MonthGrid {
            first,
            month,
            leading_padding,
            days,
        })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// Blank cells in front of day 1, in `0..=6`.
    pub fn leading_padding(&self) -> u32 {
        self.leading_padding
    }

    pub fn days(&self) -> &[u32] {
        &self.days
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().filter_map(move |&day| self.first.with_day(day))
    }

    pub fn num_rows(&self) -> u32 {
        (self.leading_padding + self.days.len() as u32 + Self::COLUMNS - 1) / Self::COLUMNS
    }
}
