//! Calendar records as they are scraped and stored.
//!
//! Artifacts keep the compact key names the scraper has always written
//! (`d`, `n`, `holiFest`, ...) so existing data directories stay readable.
//! The descriptive names are accepted as aliases when reading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One cell of the month grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayRecord {
    /// Column in the 7-wide week grid (1..=7), not a weekday name.
    #[serde(rename = "d", alias = "slot")]
    pub slot: u8,

    #[serde(rename = "n", alias = "nepaliDay")]
    pub nepali_day: String,

    #[serde(rename = "e", alias = "englishDay")]
    pub english_day: String,

    #[serde(rename = "t", alias = "tithi")]
    pub tithi: String,

    #[serde(rename = "f", alias = "festival")]
    pub festival: String,

    #[serde(rename = "h", alias = "isHoliday")]
    pub is_holiday: bool,
}

/// Month headings in both calendars, e.g. `np: "बैशाख २०८१"`, `en: "Apr/May 2024"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub en: String,
    pub np: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthRecord {
    pub metadata: Metadata,

    pub days: Vec<DayRecord>,

    #[serde(rename = "holiFest", alias = "holidaysAndFestivals")]
    pub holidays_and_festivals: Vec<String>,

    #[serde(rename = "marriage", alias = "marriageDates")]
    pub marriage_dates: Vec<String>,

    #[serde(rename = "bratabandha", alias = "comingOfAgeDates")]
    pub coming_of_age_dates: Vec<String>,
}

/// All twelve months of a year, keyed by month number.
///
/// Serializes as an object with string keys `"1"` through `"12"` in
/// numeric order.
pub type YearRecord = BTreeMap<u8, MonthRecord>;

/// Which artifacts a scrape writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputModes {
    /// Per-year aggregate at `<root>/<year>.json`.
    pub single: bool,
    /// Per-month files under `<root>/<year>/`.
    pub directory: bool,
}

impl Default for OutputModes {
    fn default() -> Self {
        OutputModes {
            single: true,
            directory: true,
        }
    }
}

impl OutputModes {
    /// Neither flag set means both outputs.
    pub fn from_flags(single: bool, directory: bool) -> Self {
        if !single && !directory {
            return OutputModes::default();
        }
        OutputModes { single, directory }
    }
}
