//! Planning warning analysis.
//!
//! Every call recomputes the full set of warnings from the snapshot. Member
//! checks run against the current quarter of the timeline; phase checks
//! compare quarter positions on the timeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    CapacityStatus, Phase, PlanningSnapshot, Project, TeamMember, Warning, WarningDetail,
    WarningReport,
};
use crate::period::QuarterTimeline;

use super::calculate_capacity;

/// Analyzes the snapshot and returns every planning warning.
///
/// The current quarter is the first timeline quarter that has not ended by
/// `today` (or the last one when all have ended). An empty timeline has no
/// current quarter, so only skill mismatches can be reported.
///
/// # Example
///
/// ```
/// use capacity_engine::calculation::analyze_warnings;
/// use capacity_engine::models::PlanningSnapshot;
/// use capacity_engine::period::QuarterTimeline;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// let snapshot = PlanningSnapshot::default();
/// let timeline = snapshot.settings.quarter_timeline(today);
///
/// let report = analyze_warnings(&snapshot, &timeline, today);
/// assert_eq!(report.quarter.as_deref(), Some("Q4 2026"));
/// assert!(report.is_empty());
/// ```
pub fn analyze_warnings(
    snapshot: &PlanningSnapshot,
    timeline: &QuarterTimeline,
    today: NaiveDate,
) -> WarningReport {
    let current = timeline.current_quarter(today);
    let mut warnings = Vec::new();

    if let Some(quarter) = current {
        for member in &snapshot.members {
            member_warnings(member, quarter, snapshot, timeline, &mut warnings);
        }
    }

    let current_idx = current.and_then(|q| timeline.index_of(q));
    for project in snapshot.active_projects() {
        for phase in &project.phases {
            skill_mismatches(project, phase, snapshot, &mut warnings);
            if let Some(current_idx) = current_idx {
                unassigned_phase(project, phase, timeline, current_idx, &mut warnings);
            }
            dependency_violation(project, phase, timeline, &mut warnings);
        }
    }

    WarningReport::new(current.map(str::to_string), warnings)
}

fn member_warnings(
    member: &TeamMember,
    quarter: &str,
    snapshot: &PlanningSnapshot,
    timeline: &QuarterTimeline,
    warnings: &mut Vec<Warning>,
) {
    let breakdown = calculate_capacity(&member.id, quarter, snapshot, timeline);

    match breakdown.status {
        CapacityStatus::Overallocated => warnings.push(Warning {
            message: format!(
                "{} is overallocated in {}: {} days planned against {} workdays",
                member.name, quarter, breakdown.used_days, breakdown.total_workdays
            ),
            detail: WarningDetail::Overallocated {
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                quarter: quarter.to_string(),
                used_days: breakdown.used_days,
                total_workdays: breakdown.total_workdays,
                available_days_raw: breakdown.available_days_raw,
            },
        }),
        CapacityStatus::Warning => warnings.push(Warning {
            message: format!(
                "{} is at {}% utilization in {}",
                member.name, breakdown.used_percent, quarter
            ),
            detail: WarningDetail::HighUtilization {
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                quarter: quarter.to_string(),
                used_percent: breakdown.used_percent,
            },
        }),
        CapacityStatus::Normal => {}
    }

    let project_ids = concurrent_projects(&member.id, quarter, snapshot);
    let count = project_ids.len() as u32;
    if count > member.max_concurrent_projects {
        warnings.push(Warning {
            message: format!(
                "{} is on {} projects in {} (maximum {})",
                member.name, count, quarter, member.max_concurrent_projects
            ),
            detail: WarningDetail::TooManyProjects {
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                quarter: quarter.to_string(),
                count,
                max: member.max_concurrent_projects,
                project_ids,
            },
        });
    }
}

/// Ids of active projects with a positive assignment for the member in `quarter`.
fn concurrent_projects(member_id: &str, quarter: &str, snapshot: &PlanningSnapshot) -> Vec<String> {
    snapshot
        .active_projects()
        .filter(|project| {
            project.phases.iter().any(|phase| {
                phase.assignments.iter().any(|a| {
                    a.member_id == member_id && a.quarter == quarter && a.days > Decimal::ZERO
                })
            })
        })
        .map(|project| project.id.clone())
        .collect()
}

fn skill_mismatches(
    project: &Project,
    phase: &Phase,
    snapshot: &PlanningSnapshot,
    warnings: &mut Vec<Warning>,
) {
    if phase.required_skill_ids.is_empty() {
        return;
    }

    let mut seen: Vec<&str> = Vec::new();
    for assignment in &phase.assignments {
        if seen.contains(&assignment.member_id.as_str()) {
            continue;
        }
        seen.push(&assignment.member_id);

        // Assignees without a member record have no skills to compare
        let Some(member) = snapshot.member(&assignment.member_id) else {
            continue;
        };
        let missing = member.missing_skills(&phase.required_skill_ids);
        if missing.is_empty() {
            continue;
        }

        let missing_names: Vec<&str> = missing.iter().map(|id| snapshot.skill_name(id)).collect();
        warnings.push(Warning {
            message: format!(
                "{} lacks {} required by {} in {}",
                member.name,
                missing_names.join(", "),
                phase.name,
                project.name
            ),
            detail: WarningDetail::SkillMismatch {
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                phase_id: phase.id.clone(),
                phase_name: phase.name.clone(),
                missing_skill_ids: missing.into_iter().map(str::to_string).collect(),
            },
        });
    }
}

fn unassigned_phase(
    project: &Project,
    phase: &Phase,
    timeline: &QuarterTimeline,
    current_idx: usize,
    warnings: &mut Vec<Warning>,
) {
    let Some(start_idx) = timeline.index_of(&phase.start_quarter) else {
        return;
    };
    if start_idx < current_idx || start_idx > current_idx + 1 || !phase.assignments.is_empty() {
        return;
    }

    warnings.push(Warning {
        message: format!(
            "{} in {} starts in {} with no one assigned",
            phase.name, project.name, phase.start_quarter
        ),
        detail: WarningDetail::UnassignedPhase {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            phase_id: phase.id.clone(),
            phase_name: phase.name.clone(),
            start_quarter: phase.start_quarter.clone(),
        },
    });
}

fn dependency_violation(
    project: &Project,
    phase: &Phase,
    timeline: &QuarterTimeline,
    warnings: &mut Vec<Warning>,
) {
    let Some(predecessor) = phase.depends_on.as_deref().and_then(|id| project.phase(id)) else {
        return;
    };
    let (Some(start_idx), Some(end_idx)) = (
        timeline.index_of(&phase.start_quarter),
        timeline.index_of(&predecessor.end_quarter),
    ) else {
        return;
    };
    if start_idx > end_idx {
        return;
    }

    warnings.push(Warning {
        message: format!(
            "{} in {} starts in {} before {} ends in {}",
            phase.name, project.name, phase.start_quarter, predecessor.name, predecessor.end_quarter
        ),
        detail: WarningDetail::DependencyViolation {
            project_id: project.id.clone(),
            project_name: project.name.clone(),
            phase_id: phase.id.clone(),
            phase_name: phase.name.clone(),
            depends_on_id: predecessor.id.clone(),
            depends_on_name: predecessor.name.clone(),
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, ProjectStatus, Skill, WarningKind};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// 2026-10-19 falls in Q4 2026, the first timeline quarter.
    fn today() -> NaiveDate {
        make_date("2026-10-19")
    }

    fn timeline() -> QuarterTimeline {
        QuarterTimeline::generate(8, today())
    }

    fn member(id: &str, skills: &[&str], max: u32) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: format!("Member {}", id),
            country_id: Some("xx".to_string()),
            skill_ids: skills.iter().map(|s| s.to_string()).collect(),
            max_concurrent_projects: max,
        }
    }

    fn assignment(member: &str, quarter: &str, days: &str) -> Assignment {
        Assignment {
            member_id: member.to_string(),
            quarter: quarter.to_string(),
            days: dec(days),
        }
    }

    fn phase(id: &str, start: &str, end: &str) -> Phase {
        Phase {
            id: id.to_string(),
            name: format!("Phase {}", id),
            start_quarter: start.to_string(),
            end_quarter: end.to_string(),
            required_skill_ids: vec![],
            depends_on: None,
            assignments: vec![],
        }
    }

    fn project(id: &str, status: ProjectStatus, phases: Vec<Phase>) -> Project {
        Project {
            id: id.to_string(),
            name: format!("Project {}", id),
            status,
            phases,
        }
    }

    fn staffed_project(id: &str, status: ProjectStatus, member: &str, days: &str) -> Project {
        let mut build = phase(&format!("{}-build", id), "Q4 2026", "Q1 2027");
        build.assignments = vec![assignment(member, "Q4 2026", days)];
        project(id, status, vec![build])
    }

    fn snapshot(members: Vec<TeamMember>, projects: Vec<Project>) -> PlanningSnapshot {
        PlanningSnapshot {
            members,
            projects,
            ..PlanningSnapshot::default()
        }
    }

    #[test]
    fn test_too_many_projects_counts_distinct_active_projects() {
        let snapshot = snapshot(
            vec![member("m-1", &[], 2)],
            vec![
                staffed_project("p-1", ProjectStatus::Active, "m-1", "5"),
                staffed_project("p-2", ProjectStatus::Planning, "m-1", "5"),
                staffed_project("p-3", ProjectStatus::OnHold, "m-1", "5"),
                staffed_project("p-4", ProjectStatus::Completed, "m-1", "5"),
                staffed_project("p-5", ProjectStatus::Active, "m-1", "0"),
            ],
        );

        let report = analyze_warnings(&snapshot, &timeline(), today());
        let too_many: Vec<&Warning> = report.of_kind(WarningKind::TooManyProjects).collect();

        assert_eq!(too_many.len(), 1);
        match &too_many[0].detail {
            WarningDetail::TooManyProjects {
                count,
                max,
                project_ids,
                quarter,
                ..
            } => {
                assert_eq!(*count, 3);
                assert_eq!(*max, 2);
                assert_eq!(project_ids, &vec!["p-1", "p-2", "p-3"]);
                assert_eq!(quarter, "Q4 2026");
            }
            other => panic!("Expected TooManyProjects, got {:?}", other),
        }
    }

    #[test]
    fn test_project_count_at_maximum_is_fine() {
        let snapshot = snapshot(
            vec![member("m-1", &[], 2)],
            vec![
                staffed_project("p-1", ProjectStatus::Active, "m-1", "5"),
                staffed_project("p-2", ProjectStatus::Active, "m-1", "5"),
            ],
        );
        let report = analyze_warnings(&snapshot, &timeline(), today());
        assert_eq!(report.of_kind(WarningKind::TooManyProjects).count(), 0);
    }

    #[test]
    fn test_dependency_starting_in_predecessor_end_quarter_fires() {
        let design = phase("design", "Q1 2027", "Q2 2027");
        let mut build = phase("build", "Q2 2027", "Q3 2027");
        build.depends_on = Some("design".to_string());
        build.assignments = vec![assignment("m-1", "Q2 2027", "10")];
        let snapshot = snapshot(
            vec![member("m-1", &[], 3)],
            vec![project("p-1", ProjectStatus::Active, vec![design, build])],
        );

        let report = analyze_warnings(&snapshot, &timeline(), today());
        let violations: Vec<&Warning> = report.of_kind(WarningKind::DependencyViolation).collect();

        assert_eq!(violations.len(), 1);
        assert!(matches!(
            &violations[0].detail,
            WarningDetail::DependencyViolation { phase_id, depends_on_id, .. }
                if phase_id == "build" && depends_on_id == "design"
        ));
    }

    #[test]
    fn test_dependency_starting_after_predecessor_is_fine() {
        let design = phase("design", "Q1 2027", "Q2 2027");
        let mut build = phase("build", "Q3 2027", "Q4 2027");
        build.depends_on = Some("design".to_string());
        let snapshot = snapshot(vec![], vec![project("p-1", ProjectStatus::Active, vec![design, build])]);

        let report = analyze_warnings(&snapshot, &timeline(), today());
        assert_eq!(report.of_kind(WarningKind::DependencyViolation).count(), 0);
    }

    #[test]
    fn test_dependency_on_unknown_phase_or_quarter_is_skipped() {
        let mut orphan = phase("orphan", "Q1 2027", "Q1 2027");
        orphan.depends_on = Some("missing".to_string());
        let early = phase("early", "Q1 2020", "Q1 2020");
        let mut late = phase("late", "Q1 2027", "Q1 2027");
        late.depends_on = Some("early".to_string());
        let snapshot = snapshot(
            vec![],
            vec![project("p-1", ProjectStatus::Active, vec![orphan, early, late])],
        );

        let report = analyze_warnings(&snapshot, &timeline(), today());
        assert_eq!(report.of_kind(WarningKind::DependencyViolation).count(), 0);
    }

    #[test]
    fn test_unassigned_phase_in_current_or_next_quarter() {
        let snapshot = snapshot(
            vec![],
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![
                    phase("now", "Q4 2026", "Q4 2026"),
                    phase("next", "Q1 2027", "Q2 2027"),
                    phase("later", "Q2 2027", "Q2 2027"),
                    phase("past", "Q4 2025", "Q4 2026"),
                ],
            )],
        );

        let report = analyze_warnings(&snapshot, &timeline(), today());
        let phases: Vec<&str> = report
            .of_kind(WarningKind::UnassignedPhase)
            .filter_map(|w| match &w.detail {
                WarningDetail::UnassignedPhase { phase_id, .. } => Some(phase_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec!["now", "next"]);
    }

    #[test]
    fn test_skill_mismatch_once_per_member_and_phase() {
        let mut build = phase("build", "Q4 2026", "Q1 2027");
        build.required_skill_ids = vec!["rust".to_string(), "sql".to_string()];
        build.assignments = vec![
            assignment("m-1", "Q4 2026", "5"),
            assignment("m-1", "Q1 2027", "5"),
            assignment("m-2", "Q4 2026", "5"),
        ];
        let mut snapshot = snapshot(
            vec![member("m-1", &["rust"], 3), member("m-2", &["rust", "sql"], 3)],
            vec![project("p-1", ProjectStatus::Active, vec![build])],
        );
        snapshot.skills = vec![Skill {
            id: "sql".to_string(),
            name: "SQL".to_string(),
        }];

        let report = analyze_warnings(&snapshot, &timeline(), today());
        let mismatches: Vec<&Warning> = report.of_kind(WarningKind::SkillMismatch).collect();

        assert_eq!(mismatches.len(), 1);
        assert!(mismatches[0].message.contains("SQL"));
        assert!(matches!(
            &mismatches[0].detail,
            WarningDetail::SkillMismatch { member_id, missing_skill_ids, .. }
                if member_id == "m-1" && missing_skill_ids == &vec!["sql".to_string()]
        ));
    }

    #[test]
    fn test_overallocation_and_high_utilization() {
        // Q4 2026 without holidays has 66 workdays; BAU is 5
        let snapshot = snapshot(
            vec![member("m-1", &[], 3), member("m-2", &[], 3), member("m-3", &[], 3)],
            vec![
                staffed_project("p-1", ProjectStatus::Active, "m-1", "70"),
                staffed_project("p-2", ProjectStatus::Active, "m-2", "58"),
                staffed_project("p-3", ProjectStatus::Active, "m-3", "20"),
            ],
        );

        let report = analyze_warnings(&snapshot, &timeline(), today());

        let over: Vec<&Warning> = report.of_kind(WarningKind::Overallocated).collect();
        assert_eq!(over.len(), 1);
        assert!(matches!(
            &over[0].detail,
            WarningDetail::Overallocated { member_id, available_days_raw, .. }
                if member_id == "m-1" && *available_days_raw == dec("-9")
        ));

        let high: Vec<&Warning> = report.of_kind(WarningKind::HighUtilization).collect();
        assert_eq!(high.len(), 1);
        assert!(matches!(
            &high[0].detail,
            WarningDetail::HighUtilization { member_id, used_percent, .. }
                if member_id == "m-2" && *used_percent == 95
        ));
    }

    #[test]
    fn test_completed_projects_raise_no_phase_warnings() {
        let mut build = phase("build", "Q4 2026", "Q4 2026");
        build.required_skill_ids = vec!["rust".to_string()];
        build.assignments = vec![assignment("m-1", "Q4 2026", "5")];
        let snapshot = snapshot(
            vec![member("m-1", &[], 3)],
            vec![
                project("p-1", ProjectStatus::Completed, vec![build]),
                project("p-2", ProjectStatus::Completed, vec![phase("empty", "Q4 2026", "Q4 2026")]),
            ],
        );

        let report = analyze_warnings(&snapshot, &timeline(), today());
        assert!(report.is_empty(), "unexpected warnings: {:?}", report.warnings);
    }

    #[test]
    fn test_empty_timeline_has_no_quarter_warnings() {
        let mut build = phase("build", "Q4 2026", "Q4 2026");
        build.required_skill_ids = vec!["rust".to_string()];
        build.assignments = vec![assignment("m-1", "Q4 2026", "90")];
        let snapshot = snapshot(
            vec![member("m-1", &[], 0)],
            vec![
                project("p-1", ProjectStatus::Active, vec![build]),
                project("p-2", ProjectStatus::Active, vec![phase("empty", "Q4 2026", "Q4 2026")]),
            ],
        );

        let report = analyze_warnings(&snapshot, &QuarterTimeline::default(), today());
        assert_eq!(report.quarter, None);
        assert_eq!(report.len(), 1);
        assert_eq!(report.warnings[0].kind(), WarningKind::SkillMismatch);
    }

    #[test]
    fn test_report_is_ordered_by_kind() {
        let mut build = phase("build", "Q4 2026", "Q4 2026");
        build.required_skill_ids = vec!["rust".to_string()];
        build.assignments = vec![assignment("m-1", "Q4 2026", "70")];
        let snapshot = snapshot(
            vec![member("m-1", &[], 3)],
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![phase("empty", "Q1 2027", "Q1 2027"), build],
            )],
        );

        let report = analyze_warnings(&snapshot, &timeline(), today());
        let kinds: Vec<WarningKind> = report.warnings.iter().map(Warning::kind).collect();
        assert_eq!(
            kinds,
            vec![
                WarningKind::Overallocated,
                WarningKind::SkillMismatch,
                WarningKind::UnassignedPhase
            ]
        );
    }
}
