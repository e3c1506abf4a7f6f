//! Planning warning models.
//!
//! Warnings are recomputed from scratch on every analysis; they are never
//! stored or diffed.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The six kinds of planning warning, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Used days exceed workdays in the current quarter.
    Overallocated,
    /// Utilization above 90% in the current quarter.
    HighUtilization,
    /// More concurrent projects than the member's maximum.
    TooManyProjects,
    /// An assignee lacks a skill the phase requires.
    SkillMismatch,
    /// A phase starts before its predecessor has finished.
    DependencyViolation,
    /// A phase starting now or next quarter has nobody assigned.
    UnassignedPhase,
}

/// The entities involved in a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningDetail {
    /// See [`WarningKind::Overallocated`].
    Overallocated {
        /// The member.
        member_id: String,
        /// The member's name.
        member_name: String,
        /// The analysed quarter.
        quarter: String,
        /// Days consumed.
        used_days: Decimal,
        /// Workdays available.
        total_workdays: u32,
        /// Signed remaining days (negative).
        available_days_raw: Decimal,
    },
    /// See [`WarningKind::HighUtilization`].
    HighUtilization {
        /// The member.
        member_id: String,
        /// The member's name.
        member_name: String,
        /// The analysed quarter.
        quarter: String,
        /// Rounded utilization percentage.
        used_percent: u32,
    },
    /// See [`WarningKind::TooManyProjects`].
    TooManyProjects {
        /// The member.
        member_id: String,
        /// The member's name.
        member_name: String,
        /// The analysed quarter.
        quarter: String,
        /// Number of distinct projects with assigned days.
        count: u32,
        /// The member's configured maximum.
        max: u32,
        /// The projects counted.
        project_ids: Vec<String>,
    },
    /// See [`WarningKind::SkillMismatch`].
    SkillMismatch {
        /// The assignee.
        member_id: String,
        /// The assignee's name.
        member_name: String,
        /// The project.
        project_id: String,
        /// The project's name.
        project_name: String,
        /// The phase requiring the skills.
        phase_id: String,
        /// The phase's name.
        phase_name: String,
        /// Required skills the assignee lacks.
        missing_skill_ids: Vec<String>,
    },
    /// See [`WarningKind::DependencyViolation`].
    DependencyViolation {
        /// The project.
        project_id: String,
        /// The project's name.
        project_name: String,
        /// The dependent phase.
        phase_id: String,
        /// The dependent phase's name.
        phase_name: String,
        /// The predecessor phase.
        depends_on_id: String,
        /// The predecessor phase's name.
        depends_on_name: String,
    },
    /// See [`WarningKind::UnassignedPhase`].
    UnassignedPhase {
        /// The project.
        project_id: String,
        /// The project's name.
        project_name: String,
        /// The phase.
        phase_id: String,
        /// The phase's name.
        phase_name: String,
        /// The quarter the phase starts in.
        start_quarter: String,
    },
}

/// A planning warning with a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Explanation suitable for display.
    pub message: String,
    /// The involved entities; serialized inline with a `kind` tag.
    #[serde(flatten)]
    pub detail: WarningDetail,
}

impl Warning {
    /// Returns the kind of this warning.
    pub fn kind(&self) -> WarningKind {
        match self.detail {
            WarningDetail::Overallocated { .. } => WarningKind::Overallocated,
            WarningDetail::HighUtilization { .. } => WarningKind::HighUtilization,
            WarningDetail::TooManyProjects { .. } => WarningKind::TooManyProjects,
            WarningDetail::SkillMismatch { .. } => WarningKind::SkillMismatch,
            WarningDetail::DependencyViolation { .. } => WarningKind::DependencyViolation,
            WarningDetail::UnassignedPhase { .. } => WarningKind::UnassignedPhase,
        }
    }
}

/// The result of one warning analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningReport {
    /// The quarter treated as "now", if the timeline had one.
    pub quarter: Option<String>,
    /// Warnings ordered by kind, then by discovery order.
    pub warnings: Vec<Warning>,
    /// Number of warnings per kind.
    pub counts: BTreeMap<WarningKind, usize>,
}

impl WarningReport {
    /// Builds a report, ordering the warnings by kind.
    ///
    /// The sort is stable, so warnings of the same kind keep their order.
    pub fn new(quarter: Option<String>, mut warnings: Vec<Warning>) -> Self {
        warnings.sort_by_key(Warning::kind);
        let mut counts = BTreeMap::new();
        for warning in &warnings {
            *counts.entry(warning.kind()).or_insert(0) += 1;
        }
        Self {
            quarter,
            warnings,
            counts,
        }
    }

    /// Returns the warnings of one kind.
    pub fn of_kind(&self, kind: WarningKind) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |w| w.kind() == kind)
    }

    /// Returns the number of warnings.
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Returns true when nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
