//! Weekend, holiday and workday counting primitives.
//!
//! Every finer-grained figure in the engine derives a proportion from these
//! counts, so they are computed by an exact inclusive day-by-day scan rather
//! than by arithmetic shortcuts.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

use super::Period;

/// The set of holiday dates that apply to one country.
pub type HolidaySet = HashSet<NaiveDate>;

/// Returns true for Saturdays and Sundays.
///
/// # Example
///
/// ```
/// use capacity_engine::period::is_weekend;
/// use chrono::NaiveDate;
///
/// // 2026-01-03 is a Saturday, 2026-01-05 a Monday
/// assert!(is_weekend(NaiveDate::from_ymd_opt(2026, 1, 3).unwrap()));
/// assert!(!is_weekend(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()));
/// ```
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns true when `date` is in the holiday set (exact calendar-date match).
pub fn is_holiday(date: NaiveDate, holidays: &HolidaySet) -> bool {
    holidays.contains(&date)
}

/// Returns true when `date` is neither a weekend day nor a holiday.
pub fn is_workday(date: NaiveDate, holidays: &HolidaySet) -> bool {
    !is_weekend(date) && !is_holiday(date, holidays)
}

/// Counts workdays in the inclusive range `[start, end]`.
///
/// An inverted range (start after end) has no days and counts as zero.
///
/// # Example
///
/// ```
/// use capacity_engine::period::{HolidaySet, workdays_between};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(); // Monday
/// let end = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(); // Sunday
/// assert_eq!(workdays_between(start, end, &HolidaySet::new()), 5);
/// ```
pub fn workdays_between(start: NaiveDate, end: NaiveDate, holidays: &HolidaySet) -> u32 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_workday(*day, holidays))
        .count() as u32
}

/// Counts the workdays covered by a resolved period.
pub fn workdays_in(period: &Period, holidays: &HolidaySet) -> u32 {
    workdays_between(period.start, period.end, holidays)
}
