//! Calendar quarter labels (`Q1 2026`).
//!
//! Quarters are the only granularity at which assignments and time off are
//! stored, so every other period is eventually mapped back onto them.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::month::last_day_of_month;
use super::{Period, PeriodKind};

static QUARTER_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Q([1-4]) (\d{4})$").expect("quarter label pattern is valid"));

/// Returns the quarter number (1-4) containing `date`.
pub fn quarter_of(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// Formats the label of the quarter containing `date`.
///
/// # Example
///
/// ```
/// use capacity_engine::period::quarter_label;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 8, 14).unwrap();
/// assert_eq!(quarter_label(date), "Q3 2026");
/// ```
pub fn quarter_label(date: NaiveDate) -> String {
    format!("Q{} {}", quarter_of(date), date.year())
}

/// Builds the period for quarter `quarter` (1-4) of `year`.
pub(crate) fn quarter_period(year: i32, quarter: u32) -> Option<Period> {
    if !(1..=4).contains(&quarter) {
        return None;
    }
    let first_month = (quarter - 1) * 3 + 1;
    let start = NaiveDate::from_ymd_opt(year, first_month, 1)?;
    let end = last_day_of_month(year, first_month + 2)?;
    Some(Period {
        label: format!("Q{} {}", quarter, year),
        kind: PeriodKind::Quarter { year, quarter },
        start,
        end,
    })
}

/// Parses a quarter label such as `Q2 2026`.
///
/// Quarter `q` spans the first day of month `(q-1)*3+1` through the last day
/// of the third month. Returns `None` for anything that is not `Q1`-`Q4`
/// followed by a four-digit year.
pub fn parse_quarter(label: &str) -> Option<Period> {
    let captures = QUARTER_LABEL.captures(label)?;
    let quarter: u32 = captures[1].parse().ok()?;
    let year: i32 = captures[2].parse().ok()?;
    quarter_period(year, quarter)
}

/// Generates `count` consecutive quarter labels starting at the quarter of `anchor`.
pub fn generate_quarters(count: usize, anchor: NaiveDate) -> Vec<String> {
    let mut year = anchor.year();
    let mut quarter = quarter_of(anchor);
    let mut labels = Vec::with_capacity(count);
    for _ in 0..count {
        labels.push(format!("Q{} {}", quarter, year));
        quarter += 1;
        if quarter > 4 {
            quarter = 1;
            year += 1;
        }
    }
    labels
}
