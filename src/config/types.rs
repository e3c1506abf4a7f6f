//! Configuration types for capacity planning.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Holiday;
use crate::period::{PeriodType, QuarterTimeline, SprintConfig};

/// Longest accepted sprint, in weeks.
pub const MAX_SPRINT_DURATION_WEEKS: u32 = 52;

/// Most sprints accepted in one sprint year.
pub const MAX_SPRINTS_PER_YEAR: u32 = 53;

/// Planning settings.
///
/// Every field has a default, so a partial `settings.yaml` (or a partial
/// settings override in an API request) is valid.
///
/// # Example
///
/// ```
/// use capacity_engine::config::Settings;
/// use rust_decimal::Decimal;
///
/// let settings: Settings = serde_yaml::from_str("bau_reserve_days: 3").unwrap();
/// assert_eq!(settings.bau_reserve_days, Decimal::new(3, 0));
/// assert_eq!(settings.sprints_per_year, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Days reserved per member per quarter for business-as-usual work.
    pub bau_reserve_days: Decimal,
    /// Working hours in one day.
    pub hours_per_day: Decimal,
    /// Number of quarters in the planning timeline.
    pub quarters_to_show: usize,
    /// Country applied to members without one.
    pub default_country_id: String,
    /// Length of every sprint in weeks.
    pub sprint_duration_weeks: u32,
    /// First day of sprint 1 in the base sprint year.
    pub sprint_start_date: NaiveDate,
    /// Number of sprints in the sprint timeline view.
    pub sprints_to_show: usize,
    /// Number of sprints in each sprint year.
    pub sprints_per_year: u32,
    /// Sprint numbers followed by a one-week bye.
    pub bye_weeks_after: Vec<u32>,
    /// Weeks of holiday at the end of the sprint year.
    pub holiday_weeks_at_end: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let sprint = SprintConfig::default();
        Self {
            bau_reserve_days: Decimal::new(5, 0),
            hours_per_day: Decimal::new(8, 0),
            quarters_to_show: 8,
            default_country_id: "nl".to_string(),
            sprint_duration_weeks: sprint.duration_weeks,
            sprint_start_date: sprint.start_date,
            sprints_to_show: 6,
            sprints_per_year: sprint.sprints_per_year,
            bye_weeks_after: sprint.bye_weeks_after.into_iter().collect(),
            holiday_weeks_at_end: sprint.holiday_weeks_at_end,
        }
    }
}

impl Settings {
    /// Checks that the settings describe a usable calendar.
    ///
    /// # Returns
    ///
    /// Returns an `InvalidSettings` error if:
    /// - `sprint_duration_weeks` or `sprints_per_year` is zero
    /// - a sprint is longer than [`MAX_SPRINT_DURATION_WEEKS`] or a year holds
    ///   more than [`MAX_SPRINTS_PER_YEAR`] sprints
    /// - `hours_per_day` is not positive
    /// - `bau_reserve_days` is negative
    pub fn validate(&self) -> EngineResult<()> {
        if self.sprint_duration_weeks == 0 {
            return Err(invalid("sprint_duration_weeks", "must be at least 1"));
        }
        if self.sprint_duration_weeks > MAX_SPRINT_DURATION_WEEKS {
            return Err(invalid(
                "sprint_duration_weeks",
                &format!("must be at most {}", MAX_SPRINT_DURATION_WEEKS),
            ));
        }
        if self.sprints_per_year == 0 {
            return Err(invalid("sprints_per_year", "must be at least 1"));
        }
        if self.sprints_per_year > MAX_SPRINTS_PER_YEAR {
            return Err(invalid(
                "sprints_per_year",
                &format!("must be at most {}", MAX_SPRINTS_PER_YEAR),
            ));
        }
        if self.hours_per_day <= Decimal::ZERO {
            return Err(invalid("hours_per_day", "must be positive"));
        }
        if self.bau_reserve_days < Decimal::ZERO {
            return Err(invalid("bau_reserve_days", "must not be negative"));
        }
        Ok(())
    }

    /// Derives the sprint calendar configuration.
    ///
    /// Called on every resolution; the result is never cached, so a
    /// settings change takes effect on the next call.
    pub fn sprint_config(&self) -> SprintConfig {
        SprintConfig {
            duration_weeks: self.sprint_duration_weeks,
            start_date: self.sprint_start_date,
            sprints_per_year: self.sprints_per_year,
            bye_weeks_after: self.bye_weeks_after.iter().copied().collect(),
            holiday_weeks_at_end: self.holiday_weeks_at_end,
        }
    }

    /// Builds the planning timeline: `quarters_to_show` quarters starting at
    /// the quarter of `anchor`.
    pub fn quarter_timeline(&self, anchor: NaiveDate) -> QuarterTimeline {
        QuarterTimeline::generate(self.quarters_to_show, anchor)
    }

    /// Number of headers a timeline view shows by default.
    ///
    /// Sprint views show `sprints_to_show` sprints. The other views cover
    /// the span of `quarters_to_show` quarters: 13 weeks, 3 months or a
    /// quarter of a year per quarter, with years rounded up.
    pub fn default_header_count(&self, view: PeriodType) -> usize {
        let quarters = self.quarters_to_show;
        match view {
            PeriodType::Sprint => self.sprints_to_show,
            PeriodType::Quarter => quarters,
            PeriodType::Week => quarters.saturating_mul(13),
            PeriodType::Month => quarters.saturating_mul(3),
            PeriodType::Year => quarters.div_ceil(4),
        }
    }

    /// Converts days to hours using `hours_per_day`.
    pub fn days_to_hours(&self, days: Decimal) -> Decimal {
        days.saturating_mul(self.hours_per_day)
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidSettings {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// One entry of a country holiday file.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayEntry {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Holiday file structure (`holidays/<country>.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayFile {
    /// The country the holidays apply to.
    pub country_id: String,
    /// Human-readable country name.
    pub name: String,
    /// The holidays observed.
    #[serde(default)]
    pub holidays: Vec<HolidayEntry>,
}

impl HolidayFile {
    /// Converts the entries into country-tagged holiday records.
    pub fn into_holidays(self) -> Vec<Holiday> {
        let country_id = self.country_id;
        self.holidays
            .into_iter()
            .map(|entry| Holiday {
                date: entry.date,
                name: entry.name,
                country_id: country_id.clone(),
            })
            .collect()
    }
}
