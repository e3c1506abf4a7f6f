//! Time-off model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Days a member is away during a quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOff {
    /// The absent member.
    pub member_id: String,
    /// The quarter label the days belong to.
    pub quarter: String,
    /// Number of days off.
    pub days: Decimal,
    /// Free-text reason shown in the capacity breakdown.
    #[serde(default)]
    pub reason: String,
}
