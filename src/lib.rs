pub mod archive;
pub mod calendar;
pub mod classify;
pub mod config;
pub mod error;
pub mod page;
pub mod ui;

pub use error::{Error, ErrorKind, Result};
