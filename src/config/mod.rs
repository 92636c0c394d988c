//! Configuration loading and management for the Timesheet Engine.
//!
//! This module loads the portal configuration from YAML files: the timesheet
//! policy (hours per day, casual-leave cutoff, metadata rows), yearly leave
//! allowances, and the company holiday calendar.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded configuration for: {}", config.metadata().organisation);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_CASUAL_LEAVE_CUTOFF_DAY, DEFAULT_HOURS_PER_DAY, DEFAULT_METADATA_ROWS,
    LeaveEntitlements, PolicyFile, PortalConfig, PortalMetadata, TimesheetPolicy,
};
