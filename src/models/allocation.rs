//! Projected allocation models for periods finer or coarser than a quarter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::period::PeriodType;

/// Days shown for one (project, member, period) cell.
///
/// Exact for quarters and years; a workday-weighted estimate otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedAllocation {
    /// Allocated days, rounded to one decimal place when estimated.
    pub days: Decimal,
    /// True when the value is derived from quarter totals by proportion.
    pub is_proportional: bool,
}

/// A member's total projected load in one period across all active projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPeriodLoad {
    /// The member.
    pub member_id: String,
    /// The period label.
    pub period: String,
    /// The period granularity.
    pub period_type: PeriodType,
    /// Sum of projected days across active projects.
    pub allocated_days: Decimal,
    /// Workdays in the period under the member's holidays.
    pub workdays: u32,
    /// True when `allocated_days` is an estimate.
    pub is_proportional: bool,
    /// True when any quarter the period maps to is overallocated.
    pub is_overallocated: bool,
    /// The overallocated quarters behind `is_overallocated`.
    pub overallocated_quarters: Vec<String>,
}
