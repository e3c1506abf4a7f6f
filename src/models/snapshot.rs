//! The immutable planning state every calculation reads from.

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::period::HolidaySet;

use super::{HolidayCalendar, Project, Skill, TeamMember, TimeOff};

/// A consistent view of members, projects, time off, holidays and settings.
///
/// Calculations never mutate a snapshot. A multi-step computation passes the
/// same snapshot to every step, so all steps observe the same state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningSnapshot {
    /// Planning settings in force.
    #[serde(default)]
    pub settings: Settings,
    /// Team members.
    #[serde(default)]
    pub members: Vec<TeamMember>,
    /// Projects with their phases and assignments.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Time-off entries.
    #[serde(default)]
    pub time_off: Vec<TimeOff>,
    /// Holidays for every country.
    #[serde(default)]
    pub holidays: HolidayCalendar,
    /// Known skills.
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl PlanningSnapshot {
    /// Looks up a member by id.
    pub fn member(&self, member_id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.id == member_id)
    }

    /// Looks up a project by id.
    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    /// Returns the projects that still consume capacity.
    pub fn active_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.is_active())
    }

    /// Returns the country whose holidays apply to a member.
    ///
    /// Members without a country, and unknown members, use the default
    /// country from settings.
    pub fn country_for(&self, member_id: &str) -> &str {
        self.member(member_id)
            .and_then(|m| m.country_id.as_deref())
            .unwrap_or(&self.settings.default_country_id)
    }

    /// Returns the holiday dates that apply to a member.
    pub fn holidays_for_member(&self, member_id: &str) -> HolidaySet {
        self.holidays.for_country(self.country_for(member_id))
    }

    /// Returns the member's time-off entry for a quarter.
    ///
    /// Only the first matching entry counts.
    pub fn time_off_for(&self, member_id: &str, quarter: &str) -> Option<&TimeOff> {
        self.time_off
            .iter()
            .find(|t| t.member_id == member_id && t.quarter == quarter)
    }

    /// Returns a skill's display name, falling back to its id.
    pub fn skill_name<'a>(&'a self, skill_id: &'a str) -> &'a str {
        self.skills
            .iter()
            .find(|s| s.id == skill_id)
            .map_or(skill_id, |s| s.name.as_str())
    }
}
