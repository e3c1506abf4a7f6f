//! Allocation projection across period granularities.
//!
//! Assignments are stored per quarter. Quarter and year views sum them
//! exactly; week, month and sprint views distribute each overlapping
//! quarter's days by the share of that quarter's workdays the period covers.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{MemberPeriodLoad, PlanningSnapshot, Project, ProjectedAllocation};
use crate::period::{
    HolidaySet, Period, PeriodKind, QuarterTimeline, intersect, overlapping_quarters,
    parse_quarter, workdays_between, workdays_in,
};

use super::calculate_capacity;

/// Decimal places kept for estimated allocations.
pub const PROJECTION_DECIMAL_PLACES: u32 = 1;

/// Projects a member's assigned days in one project onto a period.
///
/// - Quarter: the exact sum of the member's assignment days for it.
/// - Year: the exact sum over the year's four quarters.
/// - Week, month, sprint: for each overlapping quarter,
///   `assigned * overlap_workdays / quarter_workdays`, summed and rounded
///   to one decimal place. Quarters without workdays are skipped.
///
/// Workdays use the member's holiday set.
///
/// # Example
///
/// ```
/// use capacity_engine::calculation::project_allocation;
/// use capacity_engine::models::{Assignment, Phase, PlanningSnapshot, Project, ProjectStatus};
/// use capacity_engine::period::parse_period;
/// use rust_decimal::Decimal;
///
/// let project = Project {
///     id: "p-1".to_string(),
///     name: "Platform".to_string(),
///     status: ProjectStatus::Active,
///     phases: vec![Phase {
///         id: "ph-1".to_string(),
///         name: "Build".to_string(),
///         start_quarter: "Q2 2026".to_string(),
///         end_quarter: "Q2 2026".to_string(),
///         required_skill_ids: vec![],
///         depends_on: None,
///         assignments: vec![Assignment {
///             member_id: "m-1".to_string(),
///             quarter: "Q2 2026".to_string(),
///             days: Decimal::new(65, 0),
///         }],
///     }],
/// };
/// let snapshot = PlanningSnapshot::default();
/// let april = parse_period("Apr 2026", &snapshot.settings.sprint_config()).unwrap();
///
/// let projected = project_allocation(&project, "m-1", &april, &snapshot);
/// assert_eq!(projected.days, Decimal::new(22, 0));
/// assert!(projected.is_proportional);
/// ```
pub fn project_allocation(
    project: &Project,
    member_id: &str,
    period: &Period,
    snapshot: &PlanningSnapshot,
) -> ProjectedAllocation {
    match period.kind {
        PeriodKind::Quarter { .. } => ProjectedAllocation {
            days: project.assigned_days(member_id, &period.label),
            is_proportional: false,
        },
        PeriodKind::Year { year } => ProjectedAllocation {
            days: (1..=4)
                .map(|q| project.assigned_days(member_id, &format!("Q{} {}", q, year)))
                .fold(Decimal::ZERO, Decimal::saturating_add),
            is_proportional: false,
        },
        PeriodKind::Week { .. } | PeriodKind::Month { .. } | PeriodKind::Sprint { .. } => {
            let holidays = snapshot.holidays_for_member(member_id);
            ProjectedAllocation {
                days: proportional_days(project, member_id, period, &holidays),
                is_proportional: true,
            }
        }
    }
}

fn proportional_days(
    project: &Project,
    member_id: &str,
    period: &Period,
    holidays: &HolidaySet,
) -> Decimal {
    let mut total = Decimal::ZERO;

    for label in overlapping_quarters(period) {
        let Some(quarter) = parse_quarter(&label) else {
            continue;
        };
        let quarter_workdays = workdays_in(&quarter, holidays);
        if quarter_workdays == 0 {
            continue;
        }
        let overlap_workdays = intersect(period, &quarter)
            .map(|(start, end)| workdays_between(start, end, holidays))
            .unwrap_or(0);

        let assigned = project.assigned_days(member_id, &label);
        let share = assigned.saturating_mul(Decimal::from(overlap_workdays))
            / Decimal::from(quarter_workdays);
        total = total.saturating_add(share);
    }

    total.round_dp_with_strategy(
        PROJECTION_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Returns the quarters overlapping `period` in which the member is
/// overallocated.
///
/// Overlap uses the same sampling as projection, so a period and its
/// projected days always refer to the same quarters.
pub fn overallocated_quarters(
    member_id: &str,
    period: &Period,
    snapshot: &PlanningSnapshot,
    timeline: &QuarterTimeline,
) -> Vec<String> {
    overlapping_quarters(period)
        .into_iter()
        .filter(|quarter| {
            calculate_capacity(member_id, quarter, snapshot, timeline).is_overallocated()
        })
        .collect()
}

/// Checks whether any quarter overlapping `period` is overallocated.
pub fn is_period_overallocated(
    member_id: &str,
    period: &Period,
    snapshot: &PlanningSnapshot,
    timeline: &QuarterTimeline,
) -> bool {
    !overallocated_quarters(member_id, period, snapshot, timeline).is_empty()
}

/// Sums a member's projected days across all non-completed projects.
///
/// # Example
///
/// ```
/// use capacity_engine::calculation::member_period_load;
/// use capacity_engine::models::PlanningSnapshot;
/// use capacity_engine::period::{QuarterTimeline, parse_period};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let snapshot = PlanningSnapshot::default();
/// let timeline = QuarterTimeline::generate(4, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// let week = parse_period("W3 2026", &snapshot.settings.sprint_config()).unwrap();
///
/// let load = member_period_load("m-1", &week, &snapshot, &timeline);
/// assert_eq!(load.allocated_days, Decimal::ZERO);
/// assert_eq!(load.workdays, 5);
/// assert!(!load.is_overallocated);
/// ```
pub fn member_period_load(
    member_id: &str,
    period: &Period,
    snapshot: &PlanningSnapshot,
    timeline: &QuarterTimeline,
) -> MemberPeriodLoad {
    let allocated_days = snapshot
        .active_projects()
        .map(|project| project_allocation(project, member_id, period, snapshot).days)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let holidays = snapshot.holidays_for_member(member_id);
    let overallocated_quarters = overallocated_quarters(member_id, period, snapshot, timeline);

    MemberPeriodLoad {
        member_id: member_id.to_string(),
        period: period.label.clone(),
        period_type: period.period_type(),
        allocated_days,
        workdays: workdays_in(period, &holidays),
        is_proportional: !period.is_whole_quarters(),
        is_overallocated: !overallocated_quarters.is_empty(),
        overallocated_quarters,
    }
}
