//! Calendar year labels (`2026`).

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Period, PeriodKind};

static YEAR_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})$").expect("year label pattern is valid"));

/// Formats the label of the year containing `date`.
pub fn year_label(date: NaiveDate) -> String {
    date.year().to_string()
}

/// Parses a four-digit year label into January 1st through December 31st.
pub fn parse_year(label: &str) -> Option<Period> {
    let captures = YEAR_LABEL.captures(label)?;
    let year: i32 = captures[1].parse().ok()?;
    Some(Period {
        label: year.to_string(),
        kind: PeriodKind::Year { year },
        start: NaiveDate::from_ymd_opt(year, 1, 1)?,
        end: NaiveDate::from_ymd_opt(year, 12, 31)?,
    })
}

/// Generates `count` consecutive year labels starting at the year of `anchor`.
pub fn generate_years(count: usize, anchor: NaiveDate) -> Vec<String> {
    (0..count as i32)
        .map(|offset| (anchor.year() + offset).to_string())
        .collect()
}
