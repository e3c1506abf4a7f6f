//! Calendar month labels (`Jan 2026`).

use chrono::{Datelike, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Period, PeriodKind};

/// Three-letter month abbreviations, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

static MONTH_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) (\d{4})$")
        .expect("month label pattern is valid")
});

/// Returns the last day of the given month, honouring leap years.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Builds the period for a month given by number.
pub(crate) fn month_period(year: i32, month: u32) -> Option<Period> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = last_day_of_month(year, month)?;
    Some(Period {
        label: month_label(start),
        kind: PeriodKind::Month { year, month },
        start,
        end,
    })
}

/// Formats the label of the month containing `date`.
pub fn month_label(date: NaiveDate) -> String {
    format!(
        "{} {}",
        MONTH_ABBREVIATIONS[date.month0() as usize],
        date.year()
    )
}

/// Parses a month label such as `Feb 2026`.
///
/// The abbreviation is case-sensitive. Returns `None` for anything else.
///
/// # Example
///
/// ```
/// use capacity_engine::period::parse_month;
/// use chrono::NaiveDate;
///
/// let feb = parse_month("Feb 2024").unwrap();
/// assert_eq!(feb.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(parse_month("feb 2024").is_none());
/// ```
pub fn parse_month(label: &str) -> Option<Period> {
    let captures = MONTH_LABEL.captures(label)?;
    let month = MONTH_ABBREVIATIONS
        .iter()
        .position(|abbrev| *abbrev == &captures[1])? as u32
        + 1;
    let year: i32 = captures[2].parse().ok()?;
    month_period(year, month)
}

/// Generates `count` consecutive month labels starting at the month of `anchor`.
pub fn generate_months(count: usize, anchor: NaiveDate) -> Vec<String> {
    let Some(first) = anchor.with_day(1) else {
        return Vec::new();
    };
    (0..count)
        .filter_map(|offset| first.checked_add_months(Months::new(offset as u32)))
        .map(month_label)
        .collect()
}
