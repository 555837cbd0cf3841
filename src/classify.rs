use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;

/// Distance between a day and the anchor it is compared against.
pub const COMPARISON_YEARS: u32 = 5;

/// Membership lookup by string key. Only presence matters, so any map
/// keyed by date strings or any collection of them can serve as a lookup.
pub trait KeySet {
    fn contains_key(&self, key: &str) -> bool;
}

impl<V, S: BuildHasher> KeySet for HashMap<String, V, S> {
    fn contains_key(&self, key: &str) -> bool {
        HashMap::contains_key(self, key)
    }
}

impl<V> KeySet for BTreeMap<String, V> {
    fn contains_key(&self, key: &str) -> bool {
        BTreeMap::contains_key(self, key)
    }
}

impl<S: BuildHasher> KeySet for HashSet<String, S> {
    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl KeySet for BTreeSet<String> {
    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl<T: AsRef<str>> KeySet for [T] {
    fn contains_key(&self, key: &str) -> bool {
        self.iter().any(|k| k.as_ref() == key)
    }
}

impl<T: AsRef<str>> KeySet for Vec<T> {
    fn contains_key(&self, key: &str) -> bool {
        self.as_slice().contains_key(key)
    }
}

impl<K: KeySet + ?Sized> KeySet for &K {
    fn contains_key(&self, key: &str) -> bool {
        (**self).contains_key(key)
    }
}

/// Where Feb 29 lands when the year it is moved to has no leap day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeapDayPolicy {
    /// Feb 28 of the target year.
    Clamp,
    /// Mar 1 of the target year.
    Rollover,
}

impl Default for LeapDayPolicy {
    fn default() -> Self {
        LeapDayPolicy::Clamp
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayClass {
    pub has_entry: bool,
    pub is_special: bool,
    pub has_comparison: bool,
}

/// `YYYY-MM-DD`
pub fn date_key(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `MM-DD`
pub fn month_day_key(date: &NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

pub fn years_before(date: &NaiveDate, years: u32, policy: LeapDayPolicy) -> Option<NaiveDate> {
    let year = date.year().checked_sub(years as i32)?;

    NaiveDate::from_ymd_opt(year, date.month(), date.day()).or_else(|| match policy {
        LeapDayPolicy::Clamp => NaiveDate::from_ymd_opt(year, 2, 28),
        LeapDayPolicy::Rollover => NaiveDate::from_ymd_opt(year, 3, 1),
    })
}

pub fn classify<E, S, C>(
    date: &NaiveDate,
    entries: &E,
    specials: &S,
    comparisons: &C,
    policy: LeapDayPolicy,
) -> DayClass
where
    E: KeySet + ?Sized,
    S: KeySet + ?Sized,
    C: KeySet + ?Sized,
{
    let has_comparison = years_before(date, COMPARISON_YEARS, policy)
        .map(|anchor| comparisons.contains_key(&date_key(&anchor)))
        .unwrap_or(false);

    DayClass {
        has_entry: entries.contains_key(&date_key(date)),
        is_special: specials.contains_key(&month_day_key(date)),
        has_comparison,
    }
}
