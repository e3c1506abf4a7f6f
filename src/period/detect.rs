//! Period type detection from a bare label.
//!
//! Detection walks [`PERIOD_PATTERNS`] in order and the first matching shape
//! decides the type; anything unmatched is treated as a month label. The
//! order is sprint, week, quarter, year. A label whose shape matches but
//! whose value is out of range (e.g. `W60 2026`) resolves to `None` rather
//! than falling through to a later grammar.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{
    Period, PeriodType, SprintConfig, parse_month, parse_quarter, parse_sprint, parse_week,
    parse_year,
};

/// Ordered `(shape, type)` pairs used by [`detect_period_type`].
pub static PERIOD_PATTERNS: Lazy<Vec<(Regex, PeriodType)>> = Lazy::new(|| {
    [
        (r"^\d{2}-\d{2}$", PeriodType::Sprint),
        (r"^W\d+ \d{4}$", PeriodType::Week),
        (r"^Q\d \d{4}$", PeriodType::Quarter),
        (r"^\d{4}$", PeriodType::Year),
    ]
    .into_iter()
    .map(|(pattern, period_type)| {
        (
            Regex::new(pattern).expect("period detection pattern is valid"),
            period_type,
        )
    })
    .collect()
});

/// Detects the period type of a label by ordered pattern matching.
///
/// # Example
///
/// ```
/// use capacity_engine::period::{PeriodType, detect_period_type};
///
/// assert_eq!(detect_period_type("26-04"), PeriodType::Sprint);
/// assert_eq!(detect_period_type("W4 2026"), PeriodType::Week);
/// assert_eq!(detect_period_type("Q4 2026"), PeriodType::Quarter);
/// assert_eq!(detect_period_type("2026"), PeriodType::Year);
/// assert_eq!(detect_period_type("Apr 2026"), PeriodType::Month);
/// ```
pub fn detect_period_type(label: &str) -> PeriodType {
    PERIOD_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(label))
        .map(|(_, period_type)| *period_type)
        .unwrap_or(PeriodType::Month)
}

/// Parses a label of any period type.
///
/// The type is chosen by [`detect_period_type`]; the matching parser then
/// resolves the range. Sprint labels are resolved under `sprint_config`.
pub fn parse_period(label: &str, sprint_config: &SprintConfig) -> Option<Period> {
    match detect_period_type(label) {
        PeriodType::Sprint => parse_sprint(label, sprint_config),
        PeriodType::Week => parse_week(label),
        PeriodType::Quarter => parse_quarter(label),
        PeriodType::Year => parse_year(label),
        PeriodType::Month => parse_month(label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_detection_order_is_sprint_week_quarter_year() {
        let order: Vec<PeriodType> = PERIOD_PATTERNS.iter().map(|(_, t)| *t).collect();
        assert_eq!(
            order,
            vec![
                PeriodType::Sprint,
                PeriodType::Week,
                PeriodType::Quarter,
                PeriodType::Year
            ]
        );
    }

    #[test]
    fn test_unmatched_labels_default_to_month() {
        assert_eq!(detect_period_type("Jan 2026"), PeriodType::Month);
        assert_eq!(detect_period_type("garbage"), PeriodType::Month);
        assert_eq!(detect_period_type(""), PeriodType::Month);
    }

    #[test]
    fn test_parse_period_dispatches_each_type() {
        let config = SprintConfig::default();
        assert_eq!(
            parse_period("26-09", &config).unwrap().period_type(),
            PeriodType::Sprint
        );
        assert_eq!(
            parse_period("W14 2026", &config).unwrap().period_type(),
            PeriodType::Week
        );
        assert_eq!(
            parse_period("Q2 2026", &config).unwrap().period_type(),
            PeriodType::Quarter
        );
        assert_eq!(
            parse_period("2026", &config).unwrap().period_type(),
            PeriodType::Year
        );
        assert_eq!(
            parse_period("May 2026", &config).unwrap().period_type(),
            PeriodType::Month
        );
    }

    #[test]
    fn test_matched_shape_with_invalid_value_does_not_fall_through() {
        let config = SprintConfig::default();
        assert_eq!(detect_period_type("W60 2026"), PeriodType::Week);
        assert!(parse_period("W60 2026", &config).is_none());
        assert_eq!(detect_period_type("Q7 2026"), PeriodType::Quarter);
        assert!(parse_period("Q7 2026", &config).is_none());
        assert!(parse_period("26-40", &config).is_none());
    }

    #[test]
    fn test_unparseable_label_is_none() {
        let config = SprintConfig::default();
        assert!(parse_period("next sprint", &config).is_none());
        assert!(parse_period("Q1 2026 ", &config).is_none());
    }

    #[test]
    fn test_sprint_resolution_follows_config() {
        let mut config = SprintConfig::default();
        let before = parse_period("26-02", &config).unwrap();
        config.duration_weeks = 2;
        let after = parse_period("26-02", &config).unwrap();
        assert_eq!(before.start, NaiveDate::from_ymd_opt(2026, 1, 26).unwrap());
        assert_eq!(after.start, NaiveDate::from_ymd_opt(2026, 1, 19).unwrap());
    }
}
