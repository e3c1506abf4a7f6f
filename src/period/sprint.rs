//! Sprint calendar.
//!
//! Sprints are labelled `YY-NN` and laid out from a configured start date:
//! each sprint lasts `duration_weeks`, and a one-week bye follows every
//! sprint number listed in `bye_weeks_after`. Each sprint year starts on the
//! configured start date shifted by whole calendar years.
//!
//! Sprint labels are not self-describing: the same label resolves to
//! different dates under different configurations, so every function here
//! takes the [`SprintConfig`] explicitly.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use chrono::{Datelike, Days, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Period, PeriodKind};

/// Full years a two-digit sprint label can name (`YY` is read as `20YY`).
pub const SPRINT_YEARS: RangeInclusive<i32> = 2000..=2099;

static SPRINT_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})$").expect("sprint label pattern is valid"));

/// Sprint cadence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintConfig {
    /// Length of every sprint in weeks.
    pub duration_weeks: u32,
    /// First day of sprint 1 in the base year.
    pub start_date: NaiveDate,
    /// Number of sprints in each sprint year.
    pub sprints_per_year: u32,
    /// Sprint numbers that are followed by a one-week bye.
    pub bye_weeks_after: BTreeSet<u32>,
    /// Weeks of holiday at the end of the sprint year.
    ///
    /// Informational only: no date arithmetic reserves this gap.
    pub holiday_weeks_at_end: u32,
}

impl Default for SprintConfig {
    fn default() -> Self {
        Self {
            duration_weeks: 3,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap_or_default(),
            sprints_per_year: 16,
            bye_weeks_after: [8, 12].into_iter().collect(),
            holiday_weeks_at_end: 2,
        }
    }
}

impl SprintConfig {
    fn sprint_length(&self) -> Option<Duration> {
        Duration::try_weeks(i64::from(self.duration_weeks))
    }

    fn has_bye_after(&self, number: u32) -> bool {
        self.bye_weeks_after.contains(&number)
    }

    fn is_usable(&self) -> bool {
        self.duration_weeks > 0 && self.sprints_per_year > 0
    }
}

/// Where a date falls in the sprint calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintPosition {
    /// Label of the sprint the date is attributed to.
    pub label: String,
    /// Full sprint year.
    pub year: i32,
    /// Sprint number within the year.
    pub number: u32,
    /// The date is in the bye week following `number`.
    pub is_bye_week: bool,
    /// The date is after the last sprint of the year.
    pub is_holiday_period: bool,
}

/// Formats a sprint label (`26-04`) from a full year and sprint number.
///
/// Only the last two digits of the year are kept, so the label resolves back
/// to the same year only within [`SPRINT_YEARS`].
pub fn sprint_label(year: i32, number: u32) -> String {
    format!("{:02}-{:02}", year.rem_euclid(100), number)
}

/// Returns the first day of sprint 1 for `year`.
///
/// The base start date is shifted by whole calendar years keeping month and
/// day; a February 29th base rolls over to March 1st in common years.
pub fn start_date_of_year(year: i32, config: &SprintConfig) -> Option<NaiveDate> {
    let base = config.start_date;
    let first_of_month = NaiveDate::from_ymd_opt(year, base.month(), 1)?;
    first_of_month.checked_add_signed(Duration::days(base.day0() as i64))
}

/// Returns the first day of sprint `number` in `year`.
///
/// Sprint `N` starts `sum(duration_weeks + bye)` weeks after the year's first
/// sprint, summing over sprints `1..N`.
pub fn sprint_start(year: i32, number: u32, config: &SprintConfig) -> Option<NaiveDate> {
    if !config.is_usable() || number == 0 || number > config.sprints_per_year {
        return None;
    }
    let weeks: i64 = (1..number)
        .map(|s| config.duration_weeks as i64 + i64::from(config.has_bye_after(s)))
        .sum();
    start_date_of_year(year, config)?.checked_add_signed(Duration::try_weeks(weeks)?)
}

/// Parses a sprint label such as `26-09` under the given configuration.
///
/// Returns `None` for malformed labels, sprint number 0, numbers beyond
/// `sprints_per_year`, or an unusable configuration.
///
/// # Example
///
/// ```
/// use capacity_engine::period::{SprintConfig, parse_sprint};
/// use chrono::NaiveDate;
///
/// let config = SprintConfig::default();
/// let sprint = parse_sprint("26-09", &config).unwrap();
/// // 8 sprints of 3 weeks plus the bye week after sprint 8
/// assert_eq!(sprint.start, NaiveDate::from_ymd_opt(2026, 6, 29).unwrap());
/// assert_eq!(sprint.end, NaiveDate::from_ymd_opt(2026, 7, 19).unwrap());
/// ```
pub fn parse_sprint(label: &str, config: &SprintConfig) -> Option<Period> {
    let captures = SPRINT_LABEL.captures(label)?;
    let year = 2000 + captures[1].parse::<i32>().ok()?;
    let number: u32 = captures[2].parse().ok()?;
    let start = sprint_start(year, number, config)?;
    let end = start
        .checked_add_signed(config.sprint_length()?)?
        .pred_opt()?;
    Some(Period {
        label: sprint_label(year, number),
        kind: PeriodKind::Sprint { year, number },
        start,
        end,
    })
}

/// Locates the sprint a date belongs to.
///
/// Walks the year's sprint and bye-week blocks in order. Dates in a bye week
/// are attributed to the preceding sprint with `is_bye_week`; dates after the
/// final sprint are attributed to the final sprint number with
/// `is_holiday_period`. A date before the year's first sprint belongs to the
/// previous sprint year.
///
/// Returns `None` for an unusable configuration and for dates whose sprint
/// year is outside [`SPRINT_YEARS`].
pub fn sprint_for_date(date: NaiveDate, config: &SprintConfig) -> Option<SprintPosition> {
    if !config.is_usable() {
        return None;
    }
    let sprint_length = config.sprint_length()?;
    let mut year = date.year();
    let mut cursor = start_date_of_year(year, config)?;
    if date < cursor {
        year -= 1;
        cursor = start_date_of_year(year, config)?;
    }
    if !SPRINT_YEARS.contains(&year) {
        return None;
    }

    let position = |number: u32, is_bye_week: bool, is_holiday_period: bool| SprintPosition {
        label: sprint_label(year, number),
        year,
        number,
        is_bye_week,
        is_holiday_period,
    };

    for number in 1..=config.sprints_per_year {
        // A block ending past the calendar contains every remaining date.
        let Some(sprint_end) = cursor.checked_add_signed(sprint_length) else {
            return Some(position(number, false, false));
        };
        cursor = sprint_end;
        if date < cursor {
            return Some(position(number, false, false));
        }
        if config.has_bye_after(number) {
            let Some(bye_end) = cursor.checked_add_days(Days::new(7)) else {
                return Some(position(number, true, false));
            };
            cursor = bye_end;
            if date < cursor {
                return Some(position(number, true, false));
            }
        }
    }
    Some(position(config.sprints_per_year, false, true))
}

/// Generates `count` consecutive sprint labels from `start_sprint` of `start_year`.
///
/// Numbering wraps from `sprints_per_year` back to 1 and advances the year.
/// Generation stops at the end of [`SPRINT_YEARS`].
pub fn generate_sprints(
    count: usize,
    start_year: i32,
    start_sprint: u32,
    config: &SprintConfig,
) -> Vec<String> {
    if config.sprints_per_year == 0 || !SPRINT_YEARS.contains(&start_year) {
        return Vec::new();
    }
    let mut year = start_year;
    let mut number = start_sprint.max(1);
    let mut labels = Vec::with_capacity(count);
    for _ in 0..count {
        if number > config.sprints_per_year {
            number = 1;
            year += 1;
        }
        if !SPRINT_YEARS.contains(&year) {
            break;
        }
        labels.push(sprint_label(year, number));
        number += 1;
    }
    labels
}
