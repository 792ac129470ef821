//! Calendar-month type for partner analytics.

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::{AnalyticsError, AnalyticsResult};

/// The externally visible month label format, e.g. `"Jul 2025"`.
const LABEL_FORMAT: &str = "%b %Y";

/// A calendar month, the aggregation grain of the dataset.
///
/// This is a newtype wrapper around `chrono::NaiveDate` truncated to the
/// first day of the month. Internally months compare and group by date;
/// externally they are labelled in abbreviated-month form (`"Jul 2025"`),
/// which is also how they serialize, including as map keys in reports.
///
/// # Example
///
/// ```rust
/// use pdash_core::types::Month;
///
/// let month = Month::from_ymd(2025, 7).unwrap();
/// assert_eq!(month.label(), "Jul 2025");
/// assert_eq!(Month::parse_label("Jul 2025").unwrap(), month);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// Creates a month from a year and month number (1-12).
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidMonth` if the month number is out
    /// of range.
    pub fn from_ymd(year: i32, month: u32) -> AnalyticsResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Month)
            .ok_or_else(|| AnalyticsError::invalid_month(format!("{year}-{month:02}")))
    }

    /// Creates a month by truncating a date to the first of its month.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Month(
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .expect("first of month is always a valid date"),
        )
    }

    /// Parses an abbreviated-month label such as `"Jul 2025"`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidMonth` if the label does not match
    /// the `"%b %Y"` format.
    pub fn parse_label(label: &str) -> AnalyticsResult<Self> {
        // chrono needs a complete date to parse, so pin the day to 1.
        NaiveDate::parse_from_str(&format!("01 {label}"), "%d %b %Y")
            .map(Month)
            .map_err(|_| AnalyticsError::invalid_month(label))
    }

    /// Returns the display label, e.g. `"Jul 2025"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.format(LABEL_FORMAT).to_string()
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the underlying first-of-month date.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LABEL_FORMAT))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MonthVisitor;

        impl Visitor<'_> for MonthVisitor {
            type Value = Month;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a month label such as \"Jul 2025\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Month, E> {
                Month::parse_label(v).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(MonthVisitor)
    }
}
