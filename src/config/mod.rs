//! Configuration loading and management for the capacity engine.
//!
//! This module loads planning settings and per-country holiday calendars
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use capacity_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Quarters shown: {}", config.settings().quarters_to_show);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    HolidayEntry, HolidayFile, MAX_SPRINT_DURATION_WEEKS, MAX_SPRINTS_PER_YEAR, Settings,
};
