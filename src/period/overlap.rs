//! Mapping periods onto the quarters they overlap.
//!
//! The quarter set is found by sampling the period's range at fixed steps
//! (monthly for ordinary periods, weekly for sprints) and collecting the
//! quarter of each sample point. A period whose tail crosses into a new
//! quarter between the last sample and its end date does not report that
//! quarter; `W14 2026` (Mon 30 Mar to Sun 5 Apr) maps to `Q1 2026` only.

use chrono::{Duration, Months, NaiveDate};

use super::{Period, PeriodKind, quarter_label};

/// Returns the inclusive intersection of two periods, if any.
pub fn intersect(a: &Period, b: &Period) -> Option<(NaiveDate, NaiveDate)> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end);
    (start <= end).then_some((start, end))
}

fn push_unique(labels: &mut Vec<String>, label: String) {
    if !labels.contains(&label) {
        labels.push(label);
    }
}

/// Collects the quarters of the period's start and every whole month after it.
pub fn period_to_quarters(period: &Period) -> Vec<String> {
    let mut labels = Vec::new();
    let mut cursor = period.start;
    while cursor <= period.end {
        push_unique(&mut labels, quarter_label(cursor));
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    labels
}

/// Collects the quarters of the sprint's start and every whole week after it.
pub fn sprint_to_quarters(sprint: &Period) -> Vec<String> {
    let mut labels = Vec::new();
    let mut cursor = sprint.start;
    while cursor <= sprint.end {
        push_unique(&mut labels, quarter_label(cursor));
        cursor += Duration::weeks(1);
    }
    labels
}

/// Returns the quarters a period is attributed to.
///
/// A quarter maps to itself, a sprint is sampled weekly and everything else
/// monthly.
pub fn overlapping_quarters(period: &Period) -> Vec<String> {
    match period.kind {
        PeriodKind::Quarter { .. } => vec![period.label.clone()],
        PeriodKind::Sprint { .. } => sprint_to_quarters(period),
        _ => period_to_quarters(period),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::{SprintConfig, parse_month, parse_quarter, parse_sprint, parse_week, parse_year};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_intersect_overlapping_and_disjoint() {
        let q1 = parse_quarter("Q1 2026").unwrap();
        let week = parse_week("W14 2026").unwrap();
        assert_eq!(
            intersect(&q1, &week),
            Some((make_date("2026-03-30"), make_date("2026-03-31")))
        );
        let q3 = parse_quarter("Q3 2026").unwrap();
        assert_eq!(intersect(&q1, &q3), None);
    }

    #[test]
    fn test_year_maps_to_four_quarters() {
        let year = parse_year("2026").unwrap();
        assert_eq!(
            overlapping_quarters(&year),
            vec!["Q1 2026", "Q2 2026", "Q3 2026", "Q4 2026"]
        );
    }

    #[test]
    fn test_month_maps_to_its_quarter() {
        let month = parse_month("May 2026").unwrap();
        assert_eq!(period_to_quarters(&month), vec!["Q2 2026"]);
    }

    #[test]
    fn test_quarter_maps_to_itself() {
        let quarter = parse_quarter("Q4 2026").unwrap();
        assert_eq!(overlapping_quarters(&quarter), vec!["Q4 2026"]);
    }

    #[test]
    fn test_sprint_spanning_boundary_reports_both_quarters() {
        let config = SprintConfig {
            start_date: make_date("2026-03-23"),
            ..SprintConfig::default()
        };
        // 2026-03-23..2026-04-12, samples on 23 Mar, 30 Mar and 6 Apr
        let sprint = parse_sprint("26-01", &config).unwrap();
        assert_eq!(sprint_to_quarters(&sprint), vec!["Q1 2026", "Q2 2026"]);
    }

    #[test]
    fn test_week_crossing_quarter_boundary_keeps_sampling_gap() {
        let week = parse_week("W14 2026").unwrap();
        assert_eq!(overlapping_quarters(&week), vec!["Q1 2026"]);
    }

    #[test]
    fn test_sprint_tail_between_samples_is_missed() {
        let config = SprintConfig {
            start_date: make_date("2026-03-13"),
            ..SprintConfig::default()
        };
        // 2026-03-13..2026-04-02: samples on 13, 20 and 27 Mar never reach April
        let sprint = parse_sprint("26-01", &config).unwrap();
        assert_eq!(sprint.end, make_date("2026-04-02"));
        assert_eq!(sprint_to_quarters(&sprint), vec!["Q1 2026"]);
    }
}
