// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{LevelFilter, debug};
use serde::{Deserialize, Serialize};

use crate::error::SwdError;

/// Fewest turnaround cycles an SWD link can be configured for
pub const TURNAROUND_MIN_CYCLES: usize = 1;
/// Most turnaround cycles an SWD link can be configured for (DLCR.TURNAROUND allows 1 to 4)
pub const TURNAROUND_MAX_CYCLES: usize = 4;

/// Adapter supplied configuration for a driver instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig
{
	/// Smallest number of turnaround cycles the adapter accepts
	turnaround_min: usize,
	/// Largest number of turnaround cycles the adapter accepts
	turnaround_max: usize,
	/// Least severe diagnostic level that still gets emitted
	log_level: LevelFilter,
}

impl Default for DriverConfig
{
	fn default() -> Self
	{
		Self {
			turnaround_min: TURNAROUND_MIN_CYCLES,
			turnaround_max: TURNAROUND_MAX_CYCLES,
			log_level: LevelFilter::Info,
		}
	}
}

impl DriverConfig
{
	pub fn new(turnaround_min: usize, turnaround_max: usize) -> Result<Self, SwdError>
	{
		let config = Self {
			turnaround_min,
			turnaround_max,
			..Self::default()
		};
		config.validate()?;
		Ok(config)
	}

	pub fn with_log_level(mut self, log_level: LevelFilter) -> Self
	{
		self.log_level = log_level;
		self
	}

	/// Read a JSON driver configuration, filling in defaults for anything left out
	pub fn from_reader<R: Read>(reader: R) -> Result<Self, SwdError>
	{
		let config: Self = serde_json::from_reader(reader)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_path(path: &Path) -> Result<Self, SwdError>
	{
		debug!("Loading driver configuration from {}", path.display());
		let file = File::open(path)?;
		Self::from_reader(file)
	}

	fn validate(&self) -> Result<(), SwdError>
	{
		if self.turnaround_min > self.turnaround_max {
			return Err(SwdError::InvalidTurnaroundBound {
				min: self.turnaround_min,
				max: self.turnaround_max,
			});
		}
		Ok(())
	}

	pub fn turnaround_min(&self) -> usize
	{
		self.turnaround_min
	}

	pub fn turnaround_max(&self) -> usize
	{
		self.turnaround_max
	}

	pub fn log_level(&self) -> LevelFilter
	{
		self.log_level
	}

	/// Check a turnaround request against the adapter's inclusive [min, max] bound,
	/// handing back the accepted cycle count.
	pub fn check_turnaround(&self, cycles: usize) -> Result<usize, SwdError>
	{
		if cycles < self.turnaround_min || cycles > self.turnaround_max {
			return Err(SwdError::InvalidTurnaroundCycles {
				cycles,
				min: self.turnaround_min,
				max: self.turnaround_max,
			});
		}
		Ok(cycles)
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn defaults_match_swd_turnaround_range()
	{
		let config = DriverConfig::default();
		assert_eq!(config.turnaround_min(), 1);
		assert_eq!(config.turnaround_max(), 4);
		assert_eq!(config.log_level(), LevelFilter::Info);
	}

	#[test]
	fn bound_is_inclusive()
	{
		let config = DriverConfig::new(1, 7).unwrap();
		assert!(config.check_turnaround(0).is_err());
		assert_eq!(config.check_turnaround(1).unwrap(), 1);
		assert_eq!(config.check_turnaround(4).unwrap(), 4);
		assert_eq!(config.check_turnaround(7).unwrap(), 7);
		assert!(matches!(
			config.check_turnaround(8),
			Err(SwdError::InvalidTurnaroundCycles { cycles: 8, min: 1, max: 7 })
		));
	}

	#[test]
	fn inverted_bound_rejected()
	{
		assert!(matches!(
			DriverConfig::new(5, 2),
			Err(SwdError::InvalidTurnaroundBound { min: 5, max: 2 })
		));
	}

	#[test]
	fn single_value_bound()
	{
		let config = DriverConfig::new(2, 2).unwrap();
		assert!(config.check_turnaround(1).is_err());
		assert_eq!(config.check_turnaround(2).unwrap(), 2);
		assert!(config.check_turnaround(3).is_err());
	}
}
