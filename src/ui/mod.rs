pub mod calendar;

pub use calendar::{MonthView, YearView};
