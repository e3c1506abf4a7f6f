//! Core data models for the capacity engine.
//!
//! This module contains the planning entities (members, projects, time off,
//! holidays), the snapshot that groups them, and the computed outputs.

mod allocation;
mod capacity;
mod holiday;
mod member;
mod project;
mod snapshot;
mod time_off;
mod warning;

pub use allocation::{MemberPeriodLoad, ProjectedAllocation};
pub use capacity::{CapacityBreakdown, CapacityItem, CapacityStatus};
pub use holiday::{Holiday, HolidayCalendar};
pub use member::{DEFAULT_MAX_CONCURRENT_PROJECTS, Skill, TeamMember};
pub use project::{Assignment, Phase, Project, ProjectStatus};
pub use snapshot::PlanningSnapshot;
pub use time_off::TimeOff;
pub use warning::{Warning, WarningDetail, WarningKind, WarningReport};
