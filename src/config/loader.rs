//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading planning
//! settings and country holiday calendars from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::HolidayCalendar;
use crate::period::HolidaySet;

use super::types::{HolidayFile, Settings};

/// Loads and provides access to planning configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── settings.yaml   # Planning settings
/// └── holidays/
///     ├── nl.yaml     # One file per country
///     └── gb.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use capacity_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("BAU reserve: {} days", loader.settings().bau_reserve_days);
/// println!("Countries: {:?}", loader.holidays().countries());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
    holidays: HolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `settings.yaml` or the `holidays` directory is missing
    /// - Any file contains invalid YAML
    /// - The settings fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;
        settings.validate()?;

        let holidays = Self::load_holidays(&path.join("holidays"))?;

        info!(
            path = %path.display(),
            countries = holidays.countries().len(),
            holidays = holidays.holidays().len(),
            "Loaded planning configuration"
        );

        Ok(Self { settings, holidays })
    }

    /// Creates a loader from values already in memory.
    pub fn from_parts(settings: Settings, holidays: HolidayCalendar) -> Self {
        Self { settings, holidays }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every country file from the holidays directory.
    ///
    /// Files are read in name order so that the calendar is deterministic.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<HolidayCalendar> {
        let dir_str = holidays_dir.display().to_string();

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut calendar = HolidayCalendar::default();
        for path in paths {
            let file = Self::load_yaml::<HolidayFile>(&path)?;
            debug!(
                country = %file.country_id,
                count = file.holidays.len(),
                "Loaded holiday file"
            );
            calendar.extend(file.into_holidays());
        }

        Ok(calendar)
    }

    /// Returns the planning settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the holiday calendar for every configured country.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Returns the holiday dates for a country.
    ///
    /// `None` selects the default country from settings.
    pub fn holidays_for(&self, country_id: Option<&str>) -> HolidaySet {
        let country = country_id.unwrap_or(&self.settings.default_country_id);
        self.holidays.for_country(country)
    }
}
