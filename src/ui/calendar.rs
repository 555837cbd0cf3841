use itertools::Itertools;

use crate::calendar::MonthGrid;
use crate::page::{DayCell, MonthPage, YearPage};

const WEEKDAY_HEADER: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

pub struct MonthView<'a> {
    page: &'a MonthPage,
    entry_symbol: char,
    special_symbol: char,
    comparison_symbol: char,
}

impl<'a> MonthView<'a> {
    const CELL_WIDTH: usize = 5;

    pub fn new(page: &'a MonthPage) -> Self {
        MonthView {
            page,
            entry_symbol: '*',
            special_symbol: '!',
            comparison_symbol: '+',
        }
    }

    pub fn entry_symbol(mut self, symbol: char) -> Self {
        self.entry_symbol = symbol;
        self
    }

    pub fn special_symbol(mut self, symbol: char) -> Self {
        self.special_symbol = symbol;
        self
    }

    pub fn comparison_symbol(mut self, symbol: char) -> Self {
        self.comparison_symbol = symbol;
        self
    }

    fn cell(&self, day: &DayCell) -> String {
        let markers: String = [
            (day.class.has_entry, self.entry_symbol),
            (day.class.is_special, self.special_symbol),
            (day.class.has_comparison, self.comparison_symbol),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, symbol)| *symbol)
        .collect();

        format!("{:>2}{:<3}", day.day, markers)
    }

    pub fn lines(&self) -> Vec<String> {
        let title = format!("{} {}", self.page.name, self.page.grid.year());
        let header = WEEKDAY_HEADER
            .iter()
            .map(|name| format!("{:<width$}", name, width = Self::CELL_WIDTH))
            .join("");

        let cells: Vec<String> = std::iter::repeat(" ".repeat(Self::CELL_WIDTH))
            .take(self.page.leading_padding() as usize)
            .chain(self.page.days.iter().map(|day| self.cell(day)))
            .collect();

        std::iter::once(title)
            .chain(std::iter::once(header.trim_end().to_owned()))
            .chain(
                cells
                    .chunks(MonthGrid::COLUMNS as usize)
                    .map(|row| row.join("").trim_end().to_owned()),
            )
            .collect()
    }
}

pub struct YearView<'a> {
    page: &'a YearPage,
}

impl<'a> YearView<'a> {
    pub fn new(page: &'a YearPage) -> Self {
        YearView { page }
    }

    fn year_tabs(&self) -> String {
        self.page
            .years
            .iter()
            .map(|tab| {
                if tab.selected {
                    format!("[{}]", tab.year)
                } else {
                    tab.year.to_string()
                }
            })
            .join(" ")
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.year_tabs(), String::new(), self.page.summary()];

        for month in &self.page.months {
            lines.push(String::new());
            lines.extend(MonthView::new(month).lines());
        }

        lines
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}
