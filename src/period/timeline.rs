//! The canonical ordered list of quarters.
//!
//! Phase ranges are compared by position in this list, not by date. A label
//! that is not in the timeline has no position, and any range check that
//! involves it is false.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{generate_quarters, parse_quarter};

/// An ordered sequence of quarter labels.
///
/// # Example
///
/// ```
/// use capacity_engine::period::QuarterTimeline;
/// use chrono::NaiveDate;
///
/// let timeline = QuarterTimeline::generate(4, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// assert!(timeline.is_in_range("Q2 2026", "Q1 2026", "Q3 2026"));
/// assert!(!timeline.is_in_range("Q1 2030", "Q1 2026", "Q4 2026"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuarterTimeline {
    quarters: Vec<String>,
}

impl QuarterTimeline {
    /// Creates a timeline from labels in display order.
    pub fn new(quarters: Vec<String>) -> Self {
        Self { quarters }
    }

    /// Creates a timeline of `count` quarters starting at the quarter of `anchor`.
    pub fn generate(count: usize, anchor: NaiveDate) -> Self {
        Self::new(generate_quarters(count, anchor))
    }

    /// Returns the labels in order.
    pub fn quarters(&self) -> &[String] {
        &self.quarters
    }

    /// Returns the number of quarters.
    pub fn len(&self) -> usize {
        self.quarters.len()
    }

    /// Returns true when the timeline has no quarters.
    pub fn is_empty(&self) -> bool {
        self.quarters.is_empty()
    }

    /// Returns the position of `label`, or `None` if it is not in the timeline.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.quarters.iter().position(|q| q == label)
    }

    /// Checks whether `quarter` lies within `[start, end]` by position.
    ///
    /// Returns false if any of the three labels is missing from the timeline.
    pub fn is_in_range(&self, quarter: &str, start: &str, end: &str) -> bool {
        match (
            self.index_of(quarter),
            self.index_of(start),
            self.index_of(end),
        ) {
            (Some(idx), Some(start_idx), Some(end_idx)) => idx >= start_idx && idx <= end_idx,
            _ => false,
        }
    }

    /// Returns the quarter the analysis should treat as "now".
    ///
    /// This is the first quarter that has not ended by `today`, which is the
    /// earliest quarter when `today` predates the whole timeline. When every
    /// quarter has ended the last one is used. Labels that do not parse are
    /// skipped when comparing dates.
    pub fn current_quarter(&self, today: NaiveDate) -> Option<&str> {
        self.quarters
            .iter()
            .find(|label| parse_quarter(label).is_some_and(|q| q.end >= today))
            .or_else(|| self.quarters.last())
            .map(String::as_str)
    }
}
