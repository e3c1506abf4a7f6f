//! Quarter capacity accounting.
//!
//! This module computes how a member's workdays in one quarter are consumed
//! by the BAU reserve, time off and project assignments.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CapacityBreakdown, CapacityItem, CapacityStatus, PlanningSnapshot};
use crate::period::{QuarterTimeline, parse_quarter, workdays_in};

/// Utilization percentage above which a member is flagged.
pub const HIGH_UTILIZATION_PERCENT: u32 = 90;

/// Computes the capacity breakdown of a member for one quarter.
///
/// The items are accounted in a fixed order:
///
/// 1. the BAU reserve from settings, always present and never prorated
/// 2. the member's first time-off entry for the quarter, if any
/// 3. one item per `(project, phase)` of every non-completed project whose
///    phase spans `quarter` on the timeline and holds an assignment for the
///    member in exactly that quarter
///
/// The holiday set comes from the member's country, falling back to the
/// default country. A quarter label that does not parse has no workdays, and
/// a quarter missing from `timeline` matches no phase.
///
/// # Arguments
///
/// * `member_id` - The member to account for
/// * `quarter` - Quarter label, e.g. "Q1 2026"
/// * `snapshot` - The planning state to read from
/// * `timeline` - Ordered quarters used for phase containment
///
/// # Example
///
/// ```
/// use capacity_engine::calculation::calculate_capacity;
/// use capacity_engine::models::{CapacityStatus, PlanningSnapshot};
/// use capacity_engine::period::QuarterTimeline;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let snapshot = PlanningSnapshot::default();
/// let timeline = QuarterTimeline::generate(4, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline);
///
/// assert_eq!(breakdown.total_workdays, 64);
/// assert_eq!(breakdown.used_days, Decimal::new(5, 0));
/// assert_eq!(breakdown.status, CapacityStatus::Normal);
/// ```
pub fn calculate_capacity(
    member_id: &str,
    quarter: &str,
    snapshot: &PlanningSnapshot,
    timeline: &QuarterTimeline,
) -> CapacityBreakdown {
    let settings = &snapshot.settings;
    let country_id = snapshot.country_for(member_id).to_string();
    let holidays = snapshot.holidays.for_country(&country_id);

    let total_workdays = parse_quarter(quarter)
        .map(|period| workdays_in(&period, &holidays))
        .unwrap_or(0);

    let mut items = vec![CapacityItem::Bau {
        days: settings.bau_reserve_days,
    }];

    if let Some(time_off) = snapshot.time_off_for(member_id, quarter) {
        items.push(CapacityItem::TimeOff {
            days: time_off.days,
            reason: time_off.reason.clone(),
        });
    }

    for project in snapshot.active_projects() {
        for phase in &project.phases {
            if !timeline.is_in_range(quarter, &phase.start_quarter, &phase.end_quarter) {
                continue;
            }
            if let Some(days) = phase.days_for(member_id, quarter) {
                items.push(CapacityItem::Project {
                    days,
                    project_id: project.id.clone(),
                    project_name: project.name.clone(),
                    phase_id: phase.id.clone(),
                    phase_name: phase.name.clone(),
                });
            }
        }
    }

    let used_days = items
        .iter()
        .map(CapacityItem::days)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let total = Decimal::from(total_workdays);
    let available_days_raw = total.saturating_sub(used_days);
    let used_percent = used_percent(used_days, total_workdays);

    let status = if used_days > total {
        CapacityStatus::Overallocated
    } else if used_percent > HIGH_UTILIZATION_PERCENT {
        CapacityStatus::Warning
    } else {
        CapacityStatus::Normal
    };

    CapacityBreakdown {
        member_id: member_id.to_string(),
        quarter: quarter.to_string(),
        country_id,
        total_workdays,
        used_days,
        available_days_raw,
        available_days: available_days_raw.max(Decimal::ZERO),
        used_percent,
        status,
        total_hours: settings.days_to_hours(total),
        used_hours: settings.days_to_hours(used_days),
        items,
    }
}

/// Rounded `used / total * 100`, or 0 when there are no workdays.
///
/// Saturates at `u32::MAX`.
fn used_percent(used_days: Decimal, total_workdays: u32) -> u32 {
    if total_workdays == 0 || used_days <= Decimal::ZERO {
        return 0;
    }
    (used_days / Decimal::from(total_workdays))
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|percent| {
            percent
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
        })
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{
        Assignment, Holiday, HolidayCalendar, Phase, Project, ProjectStatus, TeamMember, TimeOff,
    };
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn timeline() -> QuarterTimeline {
        QuarterTimeline::generate(8, make_date("2026-01-01"))
    }

    fn member(id: &str, country: Option<&str>) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            name: format!("Member {}", id),
            country_id: country.map(str::to_string),
            skill_ids: vec![],
            max_concurrent_projects: 3,
        }
    }

    fn phase(id: &str, start: &str, end: &str, assignments: Vec<Assignment>) -> Phase {
        Phase {
            id: id.to_string(),
            name: format!("Phase {}", id),
            start_quarter: start.to_string(),
            end_quarter: end.to_string(),
            required_skill_ids: vec![],
            depends_on: None,
            assignments,
        }
    }

    fn assignment(member: &str, quarter: &str, days: &str) -> Assignment {
        Assignment {
            member_id: member.to_string(),
            quarter: quarter.to_string(),
            days: dec(days),
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

    fn dutch_holidays() -> HolidayCalendar {
        HolidayCalendar::new(vec![Holiday {
            date: make_date("2026-01-01"),
            name: "Nieuwjaarsdag".to_string(),
            country_id: "nl".to_string(),
        }])
    }

    fn snapshot_with(projects: Vec<Project>, time_off: Vec<TimeOff>) -> PlanningSnapshot {
        PlanningSnapshot {
            members: vec![member("m-1", Some("nl"))],
            projects,
            time_off,
            holidays: dutch_holidays(),
            ..PlanningSnapshot::default()
        }
    }

    #[test]
    fn test_huge_assignment_saturates_instead_of_overflowing() {
        let snapshot = snapshot_with(
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![phase(
                    "ph-1",
                    "Q1 2026",
                    "Q2 2026",
                    vec![Assignment {
                        member_id: "m-1".to_string(),
                        quarter: "Q1 2026".to_string(),
                        days: Decimal::MAX,
                    }],
                )],
            )],
            vec![],
        );

        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());

        assert_eq!(breakdown.used_days, Decimal::MAX);
        assert_eq!(breakdown.status, CapacityStatus::Overallocated);
        assert_eq!(breakdown.available_days, Decimal::ZERO);
        assert_eq!(breakdown.used_percent, u32::MAX);
        assert_eq!(breakdown.used_hours, Decimal::MAX);
    }

    #[test]
    fn test_first_quarter_2026_netherlands() {
        let snapshot = snapshot_with(
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![phase("ph-1", "Q1 2026", "Q2 2026", vec![assignment("m-1", "Q1 2026", "10")])],
            )],
            vec![],
        );

        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());

        assert_eq!(breakdown.total_workdays, 63);
        assert_eq!(breakdown.used_days, dec("15"));
        assert_eq!(breakdown.available_days_raw, dec("48"));
        assert_eq!(breakdown.available_days, dec("48"));
        assert_eq!(breakdown.used_percent, 24);
        assert_eq!(breakdown.status, CapacityStatus::Normal);
        assert_eq!(breakdown.country_id, "nl");
        assert_eq!(breakdown.items.len(), 2);
    }

    #[test]
    fn test_items_in_accounting_order() {
        let snapshot = snapshot_with(
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![phase("ph-1", "Q1 2026", "Q1 2026", vec![assignment("m-1", "Q1 2026", "4")])],
            )],
            vec![TimeOff {
                member_id: "m-1".to_string(),
                quarter: "Q1 2026".to_string(),
                days: dec("3"),
                reason: "Holiday".to_string(),
            }],
        );

        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());

        assert!(matches!(breakdown.items[0], CapacityItem::Bau { .. }));
        assert!(matches!(
            &breakdown.items[1],
            CapacityItem::TimeOff { reason, .. } if reason == "Holiday"
        ));
        assert!(matches!(
            &breakdown.items[2],
            CapacityItem::Project { phase_id, .. } if phase_id == "ph-1"
        ));
        assert_eq!(breakdown.used_days, dec("12"));
    }

    #[test]
    fn test_completed_projects_are_ignored() {
        let snapshot = snapshot_with(
            vec![project(
                "p-1",
                ProjectStatus::Completed,
                vec![phase("ph-1", "Q1 2026", "Q1 2026", vec![assignment("m-1", "Q1 2026", "40")])],
            )],
            vec![],
        );

        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());
        assert_eq!(breakdown.used_days, dec("5"));
        assert_eq!(breakdown.project_items().count(), 0);
    }

    #[test]
    fn test_phase_outside_quarter_contributes_nothing() {
        // The assignment names Q1 but the phase only spans Q2..Q3
        let snapshot = snapshot_with(
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![phase("ph-1", "Q2 2026", "Q3 2026", vec![assignment("m-1", "Q1 2026", "20")])],
            )],
            vec![],
        );

        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());
        assert_eq!(breakdown.project_items().count(), 0);
    }

    #[test]
    fn test_quarter_missing_from_timeline_matches_no_phase() {
        let snapshot = snapshot_with(
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![phase("ph-1", "Q1 2026", "Q4 2026", vec![assignment("m-1", "Q1 2026", "20")])],
            )],
            vec![],
        );
        let short = QuarterTimeline::new(vec!["Q2 2026".to_string(), "Q3 2026".to_string()]);

        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &short);
        assert_eq!(breakdown.project_items().count(), 0);
        assert_eq!(breakdown.total_workdays, 63);
    }

    #[test]
    fn test_overallocation_keeps_negative_raw_value() {
        let snapshot = snapshot_with(
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![phase("ph-1", "Q1 2026", "Q1 2026", vec![assignment("m-1", "Q1 2026", "60")])],
            )],
            vec![],
        );

        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());
        assert_eq!(breakdown.used_days, dec("65"));
        assert_eq!(breakdown.available_days_raw, dec("-2"));
        assert_eq!(breakdown.available_days, Decimal::ZERO);
        assert_eq!(breakdown.used_percent, 103);
        assert_eq!(breakdown.status, CapacityStatus::Overallocated);
        assert!(breakdown.is_overallocated());
    }

    #[test]
    fn test_high_utilization_is_warning() {
        // 5 BAU + 53 project = 58 of 63, 92%
        let snapshot = snapshot_with(
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![phase("ph-1", "Q1 2026", "Q1 2026", vec![assignment("m-1", "Q1 2026", "53")])],
            )],
            vec![],
        );

        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());
        assert_eq!(breakdown.used_percent, 92);
        assert_eq!(breakdown.status, CapacityStatus::Warning);
    }

    #[test]
    fn test_exactly_full_is_warning_not_overallocated() {
        let snapshot = snapshot_with(
            vec![project(
                "p-1",
                ProjectStatus::Active,
                vec![phase("ph-1", "Q1 2026", "Q1 2026", vec![assignment("m-1", "Q1 2026", "58")])],
            )],
            vec![],
        );

        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());
        assert_eq!(breakdown.used_days, dec("63"));
        assert_eq!(breakdown.used_percent, 100);
        assert_eq!(breakdown.status, CapacityStatus::Warning);
    }

    #[test]
    fn test_unparseable_quarter_has_no_workdays() {
        let snapshot = snapshot_with(vec![], vec![]);
        let breakdown = calculate_capacity("m-1", "Q9 2026", &snapshot, &timeline());
        assert_eq!(breakdown.total_workdays, 0);
        assert_eq!(breakdown.used_percent, 0);
        assert_eq!(breakdown.status, CapacityStatus::Overallocated);
    }

    #[test]
    fn test_unknown_member_uses_default_country() {
        let snapshot = snapshot_with(vec![], vec![]);
        let breakdown = calculate_capacity("ghost", "Q1 2026", &snapshot, &timeline());
        assert_eq!(breakdown.country_id, "nl");
        assert_eq!(breakdown.total_workdays, 63);
    }

    #[test]
    fn test_hours_follow_settings() {
        let mut snapshot = snapshot_with(vec![], vec![]);
        snapshot.settings = Settings {
            hours_per_day: dec("7.5"),
            ..Settings::default()
        };
        let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());
        assert_eq!(breakdown.total_hours, dec("472.5"));
        assert_eq!(breakdown.used_hours, dec("37.5"));
    }

    #[test]
    fn test_used_percent_rounds_half_away_from_zero() {
        // 1 of 8 = 12.5%
        assert_eq!(used_percent(dec("1"), 8), 13);
        assert_eq!(used_percent(dec("0"), 8), 0);
        assert_eq!(used_percent(dec("3"), 0), 0);
    }

    proptest! {
        #[test]
        fn prop_used_days_is_sum_of_items(
            project_days in proptest::collection::vec(0u32..40, 0..5),
            time_off in proptest::option::of(0u32..20),
        ) {
            let phases = project_days
                .iter()
                .enumerate()
                .map(|(i, days)| {
                    phase(
                        &format!("ph-{}", i),
                        "Q1 2026",
                        "Q2 2026",
                        vec![assignment("m-1", "Q1 2026", &days.to_string())],
                    )
                })
                .collect();
            let time_off = time_off
                .map(|days| TimeOff {
                    member_id: "m-1".to_string(),
                    quarter: "Q1 2026".to_string(),
                    days: Decimal::from(days),
                    reason: String::new(),
                })
                .into_iter()
                .collect();
            let snapshot = snapshot_with(vec![project("p-1", ProjectStatus::Active, phases)], time_off);

            let breakdown = calculate_capacity("m-1", "Q1 2026", &snapshot, &timeline());

            let sum: Decimal = breakdown.items.iter().map(CapacityItem::days).sum();
            prop_assert_eq!(breakdown.used_days, sum);
            prop_assert_eq!(
                breakdown.available_days_raw,
                Decimal::from(breakdown.total_workdays) - breakdown.used_days
            );
            prop_assert!(breakdown.available_days >= Decimal::ZERO);
        }
    }
}
