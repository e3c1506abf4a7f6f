//! Period algebra: label grammars, date ranges and workday counting.
//!
//! A [`Period`] is a resolved window (week, month, quarter, year or sprint)
//! with an inclusive `[start, end]` date range. Week, month, quarter and year
//! ranges are reproducible from the label alone. Sprint ranges also depend on
//! the [`SprintConfig`] in force, which is passed explicitly to every call
//! that resolves a sprint.
//!
//! # Example
//!
//! ```
//! use capacity_engine::period::{HolidaySet, SprintConfig, parse_period, workdays_in};
//!
//! let config = SprintConfig::default();
//! let quarter = parse_period("Q1 2026", &config).unwrap();
//! assert_eq!(workdays_in(&quarter, &HolidaySet::new()), 64);
//! ```

mod detect;
mod headers;
mod month;
mod overlap;
mod quarter;
mod sprint;
mod timeline;
mod week;
mod workdays;
mod year;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use detect::{PERIOD_PATTERNS, detect_period_type, parse_period};
pub use headers::{PeriodInfo, describe_period, generate_period_headers};
pub use month::{MONTH_ABBREVIATIONS, generate_months, month_label, parse_month};
pub use overlap::{intersect, overlapping_quarters, period_to_quarters, sprint_to_quarters};
pub use quarter::{generate_quarters, parse_quarter, quarter_label, quarter_of};
pub use sprint::{
    SprintConfig, SprintPosition, generate_sprints, parse_sprint, sprint_for_date,
    sprint_label, sprint_start, start_date_of_year,
};
pub use timeline::QuarterTimeline;
pub use week::{generate_weeks, parse_week, week_label};
pub use workdays::{HolidaySet, is_holiday, is_weekend, is_workday, workdays_between, workdays_in};
pub use year::{generate_years, parse_year, year_label};

/// The granularity of a period.
///
/// Also used to select a timeline view when generating header rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// ISO week, Monday through Sunday.
    Week,
    /// Calendar month.
    Month,
    /// Three calendar months; the granularity assignments are stored at.
    Quarter,
    /// Calendar year.
    Year,
    /// Configurable multi-week sprint.
    Sprint,
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodType::Week => write!(f, "week"),
            PeriodType::Month => write!(f, "month"),
            PeriodType::Quarter => write!(f, "quarter"),
            PeriodType::Year => write!(f, "year"),
            PeriodType::Sprint => write!(f, "sprint"),
        }
    }
}

/// Type-specific metadata of a resolved period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeriodKind {
    /// ISO week `week` of ISO year `iso_year`.
    Week {
        /// The ISO week-numbering year (may differ from the calendar year).
        iso_year: i32,
        /// ISO week number, 1-53.
        week: u32,
    },
    /// Calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Month number, 1-12.
        month: u32,
    },
    /// Calendar quarter.
    Quarter {
        /// Calendar year.
        year: i32,
        /// Quarter number, 1-4.
        quarter: u32,
    },
    /// Calendar year.
    Year {
        /// Calendar year.
        year: i32,
    },
    /// Sprint `number` of sprint year `year`.
    Sprint {
        /// Full sprint year (e.g. 2026 for label `26-04`).
        year: i32,
        /// Sprint number within the year, starting at 1.
        number: u32,
    },
}

/// A resolved period with an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The canonical label, e.g. `W3 2026`, `Feb 2026`, `Q1 2026`, `2026`, `26-04`.
    pub label: String,
    /// Type-specific metadata.
    pub kind: PeriodKind,
    /// First day of the period (inclusive).
    pub start: NaiveDate,
    /// Last day of the period (inclusive).
    pub end: NaiveDate,
}

impl Period {
    /// Returns the granularity of this period.
    pub fn period_type(&self) -> PeriodType {
        match self.kind {
            PeriodKind::Week { .. } => PeriodType::Week,
            PeriodKind::Month { .. } => PeriodType::Month,
            PeriodKind::Quarter { .. } => PeriodType::Quarter,
            PeriodKind::Year { .. } => PeriodType::Year,
            PeriodKind::Sprint { .. } => PeriodType::Sprint,
        }
    }

    /// Checks if `date` falls within the period (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days in the period.
    pub fn calendar_days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1).max(0) as u32
    }

    /// True for quarters and years, whose assignment totals are exact sums
    /// rather than workday-weighted estimates.
    pub fn is_whole_quarters(&self) -> bool {
        matches!(
            self.kind,
            PeriodKind::Quarter { .. } | PeriodKind::Year { .. }
        )
    }
}
