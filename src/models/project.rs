//! Project, phase and assignment models.
//!
//! Assignments are always anchored to a quarter label; that is the only
//! granularity at which users allocate capacity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Not started yet.
    Planning,
    /// In progress.
    #[default]
    Active,
    /// Paused but still holding its allocations.
    OnHold,
    /// Finished; its assignments no longer consume capacity.
    Completed,
}

/// Days allocated to one member in one quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// The assigned member.
    pub member_id: String,
    /// The quarter label the days belong to (e.g., "Q2 2026").
    pub quarter: String,
    /// Number of days allocated; never negative.
    pub days: Decimal,
}

/// A phase of a project spanning a range of quarters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Unique identifier for the phase.
    pub id: String,
    /// Display name.
    pub name: String,
    /// First quarter of the phase.
    pub start_quarter: String,
    /// Last quarter of the phase (inclusive).
    pub end_quarter: String,
    /// Skills every assignee must hold.
    #[serde(default)]
    pub required_skill_ids: Vec<String>,
    /// Id of a phase in the same project that must finish first.
    #[serde(default)]
    pub depends_on: Option<String>,
    /// Days allocated to members in this phase.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Phase {
    /// Sums the member's assignment days for exactly `quarter`.
    ///
    /// Returns `None` when the member has no assignment for that quarter.
    pub fn days_for(&self, member_id: &str, quarter: &str) -> Option<Decimal> {
        self.assignments
            .iter()
            .filter(|a| a.member_id == member_id && a.quarter == quarter)
            .map(|a| a.days)
            .reduce(Decimal::saturating_add)
    }
}

/// A project made of phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lifecycle state.
    #[serde(default)]
    pub status: ProjectStatus,
    /// Phases in display order.
    #[serde(default)]
    pub phases: Vec<Phase>,
}

impl Project {
    /// Returns true unless the project is completed.
    ///
    /// # Examples
    ///
    /// ```
    /// use capacity_engine::models::{Project, ProjectStatus};
    ///
    /// let project = Project {
    ///     id: "p-1".to_string(),
    ///     name: "Billing revamp".to_string(),
    ///     status: ProjectStatus::OnHold,
    ///     phases: vec![],
    /// };
    /// assert!(project.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status != ProjectStatus::Completed
    }

    /// Looks up a phase by id.
    pub fn phase(&self, phase_id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == phase_id)
    }

    /// Sums the member's assignment days for `quarter` across all phases.
    pub fn assigned_days(&self, member_id: &str, quarter: &str) -> Decimal {
        self.phases
            .iter()
            .filter_map(|phase| phase.days_for(member_id, quarter))
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn assignment(member: &str, quarter: &str, days: &str) -> Assignment {
        Assignment {
            member_id: member.to_string(),
            quarter: quarter.to_string(),
            days: dec(days),
        }
    }

    fn create_project() -> Project {
        Project {
            id: "p-1".to_string(),
            name: "Platform".to_string(),
            status: ProjectStatus::Active,
            phases: vec![
                Phase {
                    id: "ph-1".to_string(),
                    name: "Discovery".to_string(),
                    start_quarter: "Q1 2026".to_string(),
                    end_quarter: "Q1 2026".to_string(),
                    required_skill_ids: vec![],
                    depends_on: None,
                    assignments: vec![
                        assignment("m-1", "Q1 2026", "10"),
                        assignment("m-1", "Q1 2026", "2.5"),
                        assignment("m-2", "Q1 2026", "4"),
                    ],
                },
                Phase {
                    id: "ph-2".to_string(),
                    name: "Build".to_string(),
                    start_quarter: "Q1 2026".to_string(),
                    end_quarter: "Q3 2026".to_string(),
                    required_skill_ids: vec!["rust".to_string()],
                    depends_on: Some("ph-1".to_string()),
                    assignments: vec![assignment("m-1", "Q1 2026", "5")],
                },
            ],
        }
    }

    #[test]
    fn test_days_for_sums_matching_assignments() {
        let project = create_project();
        assert_eq!(project.phases[0].days_for("m-1", "Q1 2026"), Some(dec("12.5")));
        assert_eq!(project.phases[0].days_for("m-1", "Q2 2026"), None);
        assert_eq!(project.phases[0].days_for("m-3", "Q1 2026"), None);
    }

    #[test]
    fn test_assigned_days_across_phases() {
        let project = create_project();
        assert_eq!(project.assigned_days("m-1", "Q1 2026"), dec("17.5"));
        assert_eq!(project.assigned_days("m-1", "Q4 2026"), Decimal::ZERO);
    }

    #[test]
    fn test_completed_project_is_not_active() {
        let mut project = create_project();
        assert!(project.is_active());
        project.status = ProjectStatus::Completed;
        assert!(!project.is_active());
    }

    #[test]
    fn test_phase_lookup() {
        let project = create_project();
        assert_eq!(project.phase("ph-2").unwrap().name, "Build");
        assert!(project.phase("ph-9").is_none());
    }

    #[test]
    fn test_deserialize_project_with_numeric_days() {
        let json = r#"{
            "id": "p-2",
            "name": "Mobile",
            "status": "on_hold",
            "phases": [{
                "id": "ph-1",
                "name": "Build",
                "start_quarter": "Q2 2026",
                "end_quarter": "Q3 2026",
                "assignments": [{"member_id": "m-1", "quarter": "Q2 2026", "days": 7.5}]
            }]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, ProjectStatus::OnHold);
        assert_eq!(project.phases[0].assignments[0].days, dec("7.5"));
        assert!(project.phases[0].depends_on.is_none());
    }

    #[test]
    fn test_status_defaults_to_active() {
        let json = r#"{"id": "p-3", "name": "Ops"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, ProjectStatus::Active);
        assert!(project.phases.is_empty());
    }
}
