//! Request types for the capacity engine API.
//!
//! Every calculation endpoint receives the planning state in the request
//! body as a [`SnapshotRequest`]; the server only contributes the loaded
//! settings and holiday calendars.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigLoader, Settings};
use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, PlanningSnapshot, Project, Skill, TeamMember, TimeOff};
use crate::period::{PeriodType, QuarterTimeline};

/// Planning state supplied with a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotRequest {
    /// Team members.
    #[serde(default)]
    pub members: Vec<TeamMember>,
    /// Projects with phases and assignments.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Time-off entries.
    #[serde(default)]
    pub time_off: Vec<TimeOff>,
    /// Known skills.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Settings replacing the server's configured settings.
    #[serde(default)]
    pub settings: Option<Settings>,
    /// Holidays added to the server's holiday calendars.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    /// Explicit quarter timeline; generated from settings when absent.
    #[serde(default)]
    pub quarters: Option<Vec<String>>,
}

impl SnapshotRequest {
    /// Builds the snapshot and quarter timeline for one request.
    ///
    /// Returns an `InvalidSettings` error if the settings override does not
    /// validate, and an `InvalidDays` error for a negative assignment or
    /// time-off quantity.
    pub fn into_snapshot(
        self,
        config: &ConfigLoader,
        today: NaiveDate,
    ) -> EngineResult<(PlanningSnapshot, QuarterTimeline)> {
        self.check_days()?;
        let settings = match self.settings {
            Some(settings) => {
                settings.validate()?;
                settings
            }
            None => config.settings().clone(),
        };

        let mut holidays = config.holidays().clone();
        holidays.extend(self.holidays);

        let timeline = match self.quarters {
            Some(quarters) => QuarterTimeline::new(quarters),
            None => settings.quarter_timeline(today),
        };

        let snapshot = PlanningSnapshot {
            settings,
            members: self.members,
            projects: self.projects,
            time_off: self.time_off,
            holidays,
            skills: self.skills,
        };

        Ok((snapshot, timeline))
    }

    fn check_days(&self) -> EngineResult<()> {
        for project in &self.projects {
            for phase in &project.phases {
                if let Some(a) = phase.assignments.iter().find(|a| a.days < Decimal::ZERO) {
                    return Err(EngineError::InvalidDays {
                        context: format!(
                            "assignment of {} in phase {} for {}",
                            a.member_id, phase.id, a.quarter
                        ),
                        days: a.days.to_string(),
                    });
                }
            }
        }
        if let Some(t) = self.time_off.iter().find(|t| t.days < Decimal::ZERO) {
            return Err(EngineError::InvalidDays {
                context: format!("time off of {} for {}", t.member_id, t.quarter),
                days: t.days.to_string(),
            });
        }
        Ok(())
    }
}

/// Request body for the `/capacity` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityRequest {
    /// The planning state.
    pub snapshot: SnapshotRequest,
    /// The member to account for.
    pub member_id: String,
    /// Quarter label, e.g. "Q1 2026".
    pub quarter: String,
    /// Date used to anchor a generated timeline; defaults to the current date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for the `/allocation` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// The planning state.
    pub snapshot: SnapshotRequest,
    /// The project whose assignments are projected.
    pub project_id: String,
    /// The member whose assignments are projected.
    pub member_id: String,
    /// Any period label: week, month, quarter, year or sprint.
    pub period: String,
    /// Date used to anchor a generated timeline; defaults to the current date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for the `/member-load` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberLoadRequest {
    /// The planning state.
    pub snapshot: SnapshotRequest,
    /// The member whose load is summed.
    pub member_id: String,
    /// Any period label: week, month, quarter, year or sprint.
    pub period: String,
    /// Date used to anchor a generated timeline; defaults to the current date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for the `/warnings` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningsRequest {
    /// The planning state.
    pub snapshot: SnapshotRequest,
    /// The date treated as "now"; defaults to the current date.
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Request body for the `/periods` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodsRequest {
    /// The timeline view to generate headers for.
    pub view: PeriodType,
    /// Number of headers; defaults to the settings for the view.
    #[serde(default)]
    pub count: Option<usize>,
    /// Date the first header contains; defaults to the current date.
    #[serde(default)]
    pub anchor: Option<NaiveDate>,
    /// Country whose holidays reduce workdays; defaults to the default country.
    #[serde(default)]
    pub country_id: Option<String>,
    /// Settings replacing the server's configured settings.
    #[serde(default)]
    pub settings: Option<Settings>,
}
