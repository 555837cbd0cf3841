extern crate yearview as lib;

use chrono::{Datelike, Local, NaiveDate};
use flexi_logger::{FileSpec, Logger};
use lib::archive::Archive;
use lib::page::YearPage;
use lib::ui::YearView;
use std::path::PathBuf;
use structopt::StructOpt;

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "yv",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Yearview - A year overview of a dated archive."
)]
pub struct Args {
    #[structopt(help = "archive file with entries, specials and comparisons", parse(from_os_str))]
    pub archive: Option<PathBuf>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(short = "y", long = "year", help = "year to show")]
    pub year: Option<i32>,

    #[structopt(
        long = "today",
        help = "date to treat as today (YYYY-MM-DD)",
        parse(try_from_str = parse_date)
    )]
    pub today: Option<NaiveDate>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        println!("Yearview ran into a fatal error!");
        println!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let archive = match args.archive.as_ref().or(config.archive.as_ref()) {
        Some(path) => Archive::from_path(path)?,
        None => {
            log::warn!("No archive given, showing an empty calendar");
            Archive::default()
        }
    };

    let now = args.today.unwrap_or_else(|| Local::now().date_naive());
    let year = args
        .year
        .or_else(|| config.default_year())
        .unwrap_or_else(|| now.year());

    let page = YearPage::build(year, &archive, &config, &now)?;

    println!("{}", YearView::new(&page).render());

    Ok(())
}
