//! Holiday records and the per-country holiday calendar.
//!
//! This module contains the [`Holiday`] record and the [`HolidayCalendar`]
//! that groups holidays by country so a member's country selects the set of
//! dates excluded from their workdays.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::HolidaySet;

/// A public holiday observed in one country.
///
/// # Example
///
/// ```
/// use capacity_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 4, 27).unwrap(),
///     name: "King's Day".to_string(),
///     country_id: "nl".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "New Year's Day").
    pub name: String,
    /// The country that observes this holiday.
    pub country_id: String,
}

/// All known holidays, looked up by country.
///
/// Duplicate dates for a country are tolerated; they collapse when the
/// country's [`HolidaySet`] is built.
///
/// # Example
///
/// ```
/// use capacity_engine::models::{Holiday, HolidayCalendar};
/// use chrono::NaiveDate;
///
/// let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let calendar = HolidayCalendar::new(vec![Holiday {
///     date: new_year,
///     name: "Nieuwjaarsdag".to_string(),
///     country_id: "nl".to_string(),
/// }]);
///
/// assert!(calendar.is_holiday(new_year, "nl"));
/// assert!(!calendar.is_holiday(new_year, "gb"));
/// assert!(calendar.for_country("gb").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendar {
    holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    /// Creates a calendar from holiday records.
    pub fn new(holidays: Vec<Holiday>) -> Self {
        Self { holidays }
    }

    /// Returns every holiday record.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Adds holiday records to the calendar.
    pub fn extend(&mut self, holidays: impl IntoIterator<Item = Holiday>) {
        self.holidays.extend(holidays);
    }

    /// Returns the holiday dates observed in `country_id`.
    ///
    /// An unknown country yields an empty set, so workdays fall back to
    /// weekday-only counting.
    pub fn for_country(&self, country_id: &str) -> HolidaySet {
        self.holidays
            .iter()
            .filter(|h| h.country_id == country_id)
            .map(|h| h.date)
            .collect()
    }

    /// Checks whether `date` is a holiday in `country_id`.
    pub fn is_holiday(&self, date: NaiveDate, country_id: &str) -> bool {
        self.holidays
            .iter()
            .any(|h| h.date == date && h.country_id == country_id)
    }

    /// Returns the ids of all countries with at least one holiday.
    pub fn countries(&self) -> BTreeSet<&str> {
        self.holidays.iter().map(|h| h.country_id.as_str()).collect()
    }
}
