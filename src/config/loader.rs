//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading portal
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Holiday, HolidayList};

use super::types::{LeaveEntitlements, PolicyFile, PortalConfig, PortalMetadata, TimesheetPolicy};

/// Loads and provides access to portal configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml        # Metadata, timesheet policy, leave allowances
/// └── holidays/
///     └── 2025.yaml      # Company holidays, one file per year
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Hours per day: {}", loader.policy().hours_per_day);
/// println!("Holidays in April: {}", loader.holidays_in_month(2025, 4).len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PortalConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `policy.yaml` or the `holidays` directory is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    ///
    /// An empty `holidays` directory is allowed.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_file = Self::load_yaml::<PolicyFile>(&path.join("policy.yaml"))?;
        let holidays = Self::load_holidays(&path.join("holidays"))?;

        debug!(
            organisation = %policy_file.portal.organisation,
            version = %policy_file.portal.version,
            holidays = holidays.len(),
            "Loaded portal configuration"
        );

        let config = PortalConfig::new(
            policy_file.portal,
            policy_file.timesheet,
            policy_file.leave,
            holidays,
        );

        Ok(Self { config })
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

    /// Loads every holiday file from the holidays directory.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<HolidayList> {
        let holidays_dir_str = holidays_dir.display().to_string();

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: holidays_dir_str.clone(),
        })?;

        let mut holidays = HolidayList::default();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: holidays_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                holidays.extend(Self::load_yaml::<HolidayList>(&path)?);
            }
        }

        Ok(holidays)
    }

    /// Returns the underlying portal configuration.
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &PortalMetadata {
        self.config.metadata()
    }

    /// Returns the timesheet policy.
    pub fn policy(&self) -> &TimesheetPolicy {
        self.config.policy()
    }

    /// Returns the yearly leave allowances.
    pub fn leave_entitlements(&self) -> &LeaveEntitlements {
        self.config.leave()
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayList {
        self.config.holidays()
    }

    /// Returns the holidays in a calendar month, sorted by date.
    pub fn holidays_in_month(&self, year: i32, month: u32) -> Vec<Holiday> {
        self.config
            .holidays()
            .in_month(year, month)
            .into_iter()
            .cloned()
            .collect()
    }
}
