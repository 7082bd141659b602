// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors

use std::num::ParseIntError;

use clap::{Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use directories::ProjectDirs;
use log::debug;
use swdbridge::DriverConfig;

use crate::cli_commands::bits::{PackArguments, UnpackArguments};
use crate::cli_commands::link::{TransferArguments, TurnaroundArguments};
use crate::{CliArguments, CompletionArguments};

pub mod bits;
pub mod link;

const CONFIG_FILE_NAME: &str = "swdbridge.json";

#[derive(Subcommand)]
pub enum ToplevelCommands
{
	/// Lay a value out as the bit sequence clocked onto the wire
	Pack(PackArguments),
	/// Reassemble a value from a bit sequence as clocked off the wire
	Unpack(UnpackArguments),
	/// Validate and perform a line turnaround against the loopback adapter
	Turnaround(TurnaroundArguments),
	/// Write a value and read it back through the loopback adapter
	Transfer(TransferArguments),
	/// Generate completions data for the shell
	Complete(CompletionArguments),
}

/// The word size a value is carried in
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Container
{
	#[value(name = "8")]
	Byte,
	#[value(name = "32")]
	Word,
}

impl Container
{
	pub fn bits(self) -> usize
	{
		match self {
			Self::Byte => 8,
			Self::Word => 32,
		}
	}
}

/// Parse a number given either in decimal or as 0x prefixed hex
pub fn parse_number(value: &str) -> Result<u32, ParseIntError>
{
	match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		Some(hex) => u32::from_str_radix(hex, 16),
		None => value.parse(),
	}
}

/// Work out the driver configuration for this invocation.
///
/// An explicitly given file must load. Otherwise the user's config directory is checked, and if
/// nothing is there the built-in defaults are used.
pub fn driver_config(cli_args: &CliArguments) -> Result<DriverConfig>
{
	if let Some(path) = &cli_args.config {
		return DriverConfig::from_path(path)
			.wrap_err_with(|| format!("Failed to load driver configuration from {}", path.display()));
	}

	let default_path = ProjectDirs::from("org", "swdbridge", "swdbridge")
		.map(|paths| paths.config_dir().join(CONFIG_FILE_NAME))
		.filter(|path| path.is_file());
	match default_path {
		Some(path) => DriverConfig::from_path(&path)
			.wrap_err_with(|| format!("Failed to load driver configuration from {}", path.display())),
		None => {
			debug!("No driver configuration file found, using defaults");
			Ok(DriverConfig::default())
		},
	}
}
