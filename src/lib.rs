//! Team capacity planning engine.
//!
//! This crate resolves weeks, months, quarters, years and a configurable
//! sprint calendar into date ranges and workday counts per country, and
//! computes how much of each team member's time is consumed by BAU work,
//! time off and quarter-level project assignments. Quarter figures are
//! projected onto finer and coarser periods, and planning problems are
//! reported as warnings.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod period;
