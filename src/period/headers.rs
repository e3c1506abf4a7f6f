//! Header metadata for timeline views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    HolidaySet, Period, PeriodType, SprintConfig, generate_months, generate_quarters,
    generate_sprints, generate_weeks, generate_years, parse_period, sprint_for_date, workdays_in,
};

/// A resolved period together with its day counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    /// The resolved period.
    #[serde(flatten)]
    pub period: Period,
    /// Workdays under the holiday set used to describe it.
    pub workdays: u32,
    /// Calendar days, weekends and holidays included.
    pub calendar_days: u32,
}

/// Resolves a label and counts its days.
///
/// # Example
///
/// ```
/// use capacity_engine::period::{HolidaySet, SprintConfig, describe_period};
///
/// let info = describe_period("W2 2026", &SprintConfig::default(), &HolidaySet::new()).unwrap();
/// assert_eq!(info.workdays, 5);
/// assert_eq!(info.calendar_days, 7);
/// ```
pub fn describe_period(
    label: &str,
    sprint_config: &SprintConfig,
    holidays: &HolidaySet,
) -> Option<PeriodInfo> {
    let period = parse_period(label, sprint_config)?;
    Some(PeriodInfo {
        workdays: workdays_in(&period, holidays),
        calendar_days: period.calendar_days(),
        period,
    })
}

/// Generates `count` consecutive header entries for a view, starting at the
/// period that contains `anchor`.
///
/// Sprint views start at the sprint containing `anchor`; an anchor in the
/// year-end holiday tail starts at the following year's first sprint.
pub fn generate_period_headers(
    view: PeriodType,
    count: usize,
    anchor: NaiveDate,
    sprint_config: &SprintConfig,
    holidays: &HolidaySet,
) -> Vec<PeriodInfo> {
    let labels = match view {
        PeriodType::Week => generate_weeks(count, anchor),
        PeriodType::Month => generate_months(count, anchor),
        PeriodType::Quarter => generate_quarters(count, anchor),
        PeriodType::Year => generate_years(count, anchor),
        PeriodType::Sprint => match sprint_for_date(anchor, sprint_config) {
            Some(position) if position.is_holiday_period => {
                generate_sprints(count, position.year, position.number + 1, sprint_config)
            }
            Some(position) => generate_sprints(count, position.year, position.number, sprint_config),
            None => Vec::new(),
        },
    };

    labels
        .iter()
        .filter_map(|label| describe_period(label, sprint_config, holidays))
        .collect()
}
