//! ISO week labels (`W14 2026`).
//!
//! Week 1 is the week containing the first Thursday of the year and weeks
//! start on Monday, so the ISO year in a label can differ from the calendar
//! year of some of its days (`W1 2026` starts on 2025-12-29).

use chrono::{Datelike, Days, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Period, PeriodKind};

static WEEK_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^W(\d{1,2}) (\d{4})$").expect("week label pattern is valid"));

/// Formats the label of the ISO week containing `date`.
pub fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("W{} {}", iso.week(), iso.year())
}

fn monday_of(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}

/// Parses an ISO week label such as `W14 2026`.
///
/// Returns `None` for malformed labels and for week numbers the ISO year
/// does not have (week 0, or week 53 in a 52-week year).
///
/// # Example
///
/// ```
/// use capacity_engine::period::parse_week;
/// use chrono::NaiveDate;
///
/// let week = parse_week("W1 2026").unwrap();
/// assert_eq!(week.start, NaiveDate::from_ymd_opt(2025, 12, 29).unwrap());
/// assert_eq!(week.end, NaiveDate::from_ymd_opt(2026, 1, 4).unwrap());
/// ```
pub fn parse_week(label: &str) -> Option<Period> {
    let captures = WEEK_LABEL.captures(label)?;
    let week: u32 = captures[1].parse().ok()?;
    let iso_year: i32 = captures[2].parse().ok()?;
    let start = NaiveDate::from_isoywd_opt(iso_year, week, Weekday::Mon)?;
    Some(Period {
        label: format!("W{} {}", week, iso_year),
        kind: PeriodKind::Week { iso_year, week },
        start,
        end: start.checked_add_days(Days::new(6))?,
    })
}

/// Generates `count` consecutive week labels starting at the ISO week of `anchor`.
///
/// Stops early if the weeks run past the last representable date.
pub fn generate_weeks(count: usize, anchor: NaiveDate) -> Vec<String> {
    let Some(first) = monday_of(anchor) else {
        return Vec::new();
    };
    (0..count as u64)
        .map_while(|offset| first.checked_add_days(Days::new(offset * 7)))
        .map(week_label)
        .collect()
}
