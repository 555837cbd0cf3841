use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::classify::{classify, date_key, month_day_key, DayClass, LeapDayPolicy};
use crate::error::{Error, ErrorKind, Result};

/// The three lookup feeds a year page is classified against.
///
/// On disk this is a TOML document:
///
/// ```toml
/// specials = ["02-14", "12-25"]
/// comparisons = ["2013-05-10"]
///
/// [entries]
/// "2018-05-10" = "posts/2018-05-10.md"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Archive {
    pub entries: BTreeMap<String, String>,
    pub specials: BTreeSet<String>,
    pub comparisons: BTreeSet<String>,
}

impl Archive {
    pub fn new<E, S, C>(entries: E, specials: S, comparisons: C) -> Self
    where
        E: IntoIterator<Item = (String, String)>,
        S: IntoIterator<Item = String>,
        C: IntoIterator<Item = String>,
    {
        Archive {
            entries: entries.into_iter().collect(),
            specials: specials.into_iter().collect(),
            comparisons: comparisons.into_iter().collect(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let archive: Archive = content.parse().map_err(|e: Error| {
            let msg = format!(
                "{}: {}",
                path.display(),
                e.message.as_deref().unwrap_or_default()
            );
            e.with_msg(&msg)
        })?;

        log::debug!(
            "Loaded archive '{}' ({} entries, {} specials, {} comparisons)",
            path.display(),
            archive.entries.len(),
            archive.specials.len(),
            archive.comparisons.len()
        );

        Ok(archive)
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries whose key starts with the year's digits.
    pub fn entry_count(&self, year: i32) -> usize {
        let prefix = format!("{:04}", year);
        self.entries
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .count()
    }

    pub fn classify(&self, date: &NaiveDate, policy: LeapDayPolicy) -> DayClass {
        classify(
            date,
            &self.entries,
            &self.specials,
            &self.comparisons,
            policy,
        )
    }

    /// Keys that can never match a day because they are not in canonical
    /// `YYYY-MM-DD` (entries, comparisons) or `MM-DD` (specials) form.
    pub fn malformed_keys(&self) -> Vec<&str> {
        self.entries
            .keys()
            .chain(self.comparisons.iter())
            .filter(|key| !is_date_key(key))
            .chain(self.specials.iter().filter(|key| !is_month_day_key(key)))
            .map(String::as_str)
            .collect()
    }
}

impl FromStr for Archive {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let archive: Archive = toml::from_str(s).map_err(|e| {
            Error::new(ErrorKind::ArchiveParse, &format!("Error while parsing: {}", e))
        })?;

        for key in archive.malformed_keys() {
            log::warn!("Archive key '{}' is malformed and will never match", key);
        }

        Ok(archive)
    }
}

fn is_date_key(key: &str) -> bool {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map(|date| date_key(&date) == key)
        .unwrap_or(false)
}

fn is_month_day_key(key: &str) -> bool {
    // 2000 is a leap year, so "02-29" is accepted
    NaiveDate::parse_from_str(&format!("2000-{}", key), "%Y-%m-%d")
        .map(|date| date.year() == 2000 && month_day_key(&date) == key)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARCHIVE: &str = r#"
specials = ["02-14", "12-25"]
comparisons = ["2013-05-10", "2015-02-28"]

[entries]
"2018-05-10" = "posts/2018-05-10.md"
"2018-01-02" = "posts/2018-01-02.md"
"2017-12-31" = "posts/2017-12-31.md"
"#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_archive() {
        let archive: Archive = ARCHIVE.parse().unwrap();
        assert_eq!(archive.entries.len(), 3);
        assert_eq!(archive.entry("2018-05-10"), Some("posts/2018-05-10.md"));
        assert!(archive.specials.contains("12-25"));
        assert!(archive.comparisons.contains("2013-05-10"));
        assert!(archive.malformed_keys().is_empty());
    }

    #[test]
    fn missing_tables_default_to_empty() {
        let archive: Archive = "specials = [\"01-01\"]".parse().unwrap();
        assert!(archive.entries.is_empty());
        assert!(archive.comparisons.is_empty());
        assert_eq!(archive.specials.len(), 1);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = "articles = []".parse::<Archive>().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ArchiveParse));
    }

    #[test]
    fn entries_per_year() {
        let archive: Archive = ARCHIVE.parse().unwrap();
        assert_eq!(archive.entry_count(2018), 2);
        assert_eq!(archive.entry_count(2017), 1);
        assert_eq!(archive.entry_count(2016), 0);
    }

    #[test]
    fn classify_against_archive() {
        let archive: Archive = ARCHIVE.parse().unwrap();

        let class = archive.classify(&date(2018, 5, 10), LeapDayPolicy::Clamp);
        assert!(class.has_entry);
        assert!(class.has_comparison);
        assert!(!class.is_special);

        let class = archive.classify(&date(2020, 2, 29), LeapDayPolicy::Clamp);
        assert!(class.has_comparison);
        let class = archive.classify(&date(2020, 2, 29), LeapDayPolicy::Rollover);
        assert!(!class.has_comparison);

        let class = archive.classify(&date(1990, 2, 14), LeapDayPolicy::Clamp);
        assert_eq!(
            class,
            DayClass {
                has_entry: false,
                is_special: true,
                has_comparison: false,
            }
        );
    }

    #[test]
    fn malformed_keys_are_reported() {
        let archive = Archive::new(
            vec![
                ("2018-5-10".to_owned(), "a".to_owned()),
                ("2018-05-10".to_owned(), "b".to_owned()),
            ],
            vec!["02-29".to_owned(), "2-14".to_owned(), "13-01".to_owned()],
            vec!["2013-02-30".to_owned()],
        );

        let mut malformed = archive.malformed_keys();
        malformed.sort_unstable();
        assert_eq!(malformed, vec!["13-01", "2-14", "2013-02-30", "2018-5-10"]);

        // still loaded, just never matching
        assert!(!archive.classify(&date(2018, 5, 10), LeapDayPolicy::Clamp).is_special);
        assert!(archive.classify(&date(2018, 5, 10), LeapDayPolicy::Clamp).has_entry);
    }
}
