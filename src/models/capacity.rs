//! Capacity breakdown models.
//!
//! This module contains the [`CapacityBreakdown`] type and its line items.
//! A breakdown is computed on demand for one member and one quarter and is
//! never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Utilization status of a member in a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityStatus {
    /// Used days are at most 90% of workdays.
    Normal,
    /// Used days exceed 90% of workdays without exceeding them.
    Warning,
    /// Used days exceed the quarter's workdays.
    Overallocated,
}

impl std::fmt::Display for CapacityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapacityStatus::Normal => write!(f, "normal"),
            CapacityStatus::Warning => write!(f, "warning"),
            CapacityStatus::Overallocated => write!(f, "overallocated"),
        }
    }
}

/// One consumer of a member's days in a quarter.
///
/// # Example
///
/// ```
/// use capacity_engine::models::CapacityItem;
/// use rust_decimal::Decimal;
///
/// let item = CapacityItem::Bau { days: Decimal::new(5, 0) };
/// assert_eq!(item.days(), Decimal::new(5, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapacityItem {
    /// Flat business-as-usual reserve.
    Bau {
        /// Reserved days.
        days: Decimal,
    },
    /// Recorded time off.
    TimeOff {
        /// Days off.
        days: Decimal,
        /// Reason given for the time off.
        reason: String,
    },
    /// Assignment days in one phase of one project.
    Project {
        /// Assigned days for the quarter.
        days: Decimal,
        /// The project id.
        project_id: String,
        /// The project name.
        project_name: String,
        /// The phase id.
        phase_id: String,
        /// The phase name.
        phase_name: String,
    },
}

impl CapacityItem {
    /// Returns the days this item consumes.
    pub fn days(&self) -> Decimal {
        match self {
            CapacityItem::Bau { days }
            | CapacityItem::TimeOff { days, .. }
            | CapacityItem::Project { days, .. } => *days,
        }
    }
}

/// How a member's workdays in a quarter are consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityBreakdown {
    /// The member the breakdown is for.
    pub member_id: String,
    /// The quarter label.
    pub quarter: String,
    /// Country whose holidays were applied.
    pub country_id: String,
    /// Workdays in the quarter after weekends and holidays.
    pub total_workdays: u32,
    /// Sum of all item days.
    pub used_days: Decimal,
    /// `total_workdays - used_days`; negative when overallocated.
    pub available_days_raw: Decimal,
    /// `available_days_raw` clamped at zero.
    pub available_days: Decimal,
    /// `used_days / total_workdays` as a rounded percentage; 0 without workdays.
    pub used_percent: u32,
    /// Derived utilization status.
    pub status: CapacityStatus,
    /// Workdays expressed in hours.
    pub total_hours: Decimal,
    /// Used days expressed in hours.
    pub used_hours: Decimal,
    /// Consumers of the used days, in accounting order.
    pub items: Vec<CapacityItem>,
}

impl CapacityBreakdown {
    /// Returns true when used days exceed workdays.
    pub fn is_overallocated(&self) -> bool {
        self.status == CapacityStatus::Overallocated
    }

    /// Returns the project items only.
    pub fn project_items(&self) -> impl Iterator<Item = &CapacityItem> {
        self.items
            .iter()
            .filter(|item| matches!(item, CapacityItem::Project { .. }))
    }
}
