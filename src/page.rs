use chrono::{Datelike, NaiveDate};

use crate::archive::Archive;
use crate::calendar::{enumerate_months, MonthGrid};
use crate::classify::{date_key, DayClass};
use crate::config::Config;
use crate::error::Result;

/// Requests a consumer hands on to whatever does the routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Year(i32),
    Entry(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearTab {
    pub year: i32,
    pub selected: bool,
}

impl YearTab {
    pub fn activate(&self) -> Navigation {
        Navigation::Year(self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub key: String,
    pub class: DayClass,
}

impl DayCell {
    /// Only days with an entry lead anywhere.
    pub fn activate(&self) -> Option<Navigation> {
        if self.class.has_entry {
            Some(Navigation::Entry(self.key.clone()))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthPage {
    pub name: String,
    pub grid: MonthGrid,
    pub days: Vec<DayCell>,
}

impl MonthPage {
    pub fn new(grid: MonthGrid, archive: &Archive, config: &Config) -> Self {
        let days = grid
            .dates()
            .map(|date| DayCell {
                day: date.day(),
                key: date_key(&date),
                class: archive.classify(&date, config.leap_day),
            })
            .collect();

        MonthPage {
            name: grid.first_day().format("%b").to_string(),
            grid,
            days,
        }
    }

    pub fn leading_padding(&self) -> u32 {
        self.grid.leading_padding()
    }
}

/// Everything needed to draw the overview of one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearPage {
    pub year: i32,
    pub entry_count: usize,
    pub years: Vec<YearTab>,
    pub months: Vec<MonthPage>,
}

impl YearPage {
    pub fn build(year: i32, archive: &Archive, config: &Config, now: &NaiveDate) -> Result<Self> {
        let years = config
            .years
            .iter()
            .map(|&y| YearTab {
                year: y,
                selected: y == year,
            })
            .collect();

        let months = enumerate_months(year, now)
            .into_iter()
            .map(|month| {
                MonthGrid::new(year, month).map(|grid| MonthPage::new(grid, archive, config))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Built page for {} with {} months", year, months.len());

        Ok(YearPage {
            year,
            entry_count: archive.entry_count(year),
            years,
            months,
        })
    }

    pub fn summary(&self) -> String {
        format!("{} posts in this year", self.entry_count)
    }

    pub fn selected_tab(&self) -> Option<&YearTab> {
        self.years.iter().find(|tab| tab.selected)
    }
}
