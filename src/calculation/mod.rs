//! Calculation logic for the capacity engine.
//!
//! This module contains the quarter capacity accounting, the projection of
//! quarter-level assignments onto weeks, months, sprints and years, and the
//! planning warning analysis. All functions are pure over a
//! [`PlanningSnapshot`](crate::models::PlanningSnapshot).

mod capacity;
mod projection;
mod warnings;

pub use capacity::{HIGH_UTILIZATION_PERCENT, calculate_capacity};
pub use projection::{
    PROJECTION_DECIMAL_PLACES, is_period_overallocated, member_period_load,
    overallocated_quarters, project_allocation,
};
pub use warnings::analyze_warnings;
