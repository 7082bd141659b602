// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors

use clap::Args;
use color_eyre::eyre::{Context, Result};
use log::info;
use swdbridge::transport::loopback::LoopbackTransport;
use swdbridge::{Direction, DriverConfig, ShiftOrder, SwdDriver};

use crate::CliArguments;
use crate::cli_commands::{driver_config, parse_number};

#[derive(Args)]
pub struct TurnaroundArguments
{
	#[arg(short = 'd', long = "direction", value_enum)]
	/// Which side should be driving the line once the turnaround completes
	direction: Direction,
	#[arg(long = "cycles")]
	/// How many clock cycles to spend turning the line around
	cycles: usize,
	#[arg(long = "min")]
	/// Override the configured minimum number of turnaround cycles
	min: Option<usize>,
	#[arg(long = "max")]
	/// Override the configured maximum number of turnaround cycles
	max: Option<usize>,
}

impl TurnaroundArguments
{
	pub fn run(&self, cli_args: &CliArguments) -> Result<()>
	{
		let config = driver_config(cli_args)?;
		let config = DriverConfig::new(
			self.min.unwrap_or(config.turnaround_min()),
			self.max.unwrap_or(config.turnaround_max()),
		)?
		.with_log_level(config.log_level());

		let mut driver = SwdDriver::new(LoopbackTransport::new(), config);
		let cycles = driver
			.turnaround(self.direction, self.cycles)
			.wrap_err("Turnaround rejected")?;
		println!("{} turnaround accepted, {} cycles", self.direction, cycles);
		Ok(())
	}
}

#[derive(Args)]
pub struct TransferArguments
{
	#[arg(value_parser = parse_number)]
	/// The value to write, in decimal or 0x prefixed hex
	value: u32,
	#[arg(short = 'w', long = "width", default_value_t = 32)]
	/// How many bits of the value to transfer
	width: usize,
	#[arg(short = 'o', long = "order", value_enum, default_value_t = ShiftOrder::LsbFirst)]
	/// Which end of the value goes onto the wire first
	order: ShiftOrder,
	#[arg(long = "trn")]
	/// Turnaround cycles to use between the phases (defaults to the configured minimum)
	turnaround: Option<usize>,
}

impl TransferArguments
{
	pub fn run(&self, cli_args: &CliArguments) -> Result<()>
	{
		let config = driver_config(cli_args)?;
		let turnaround = self.turnaround.unwrap_or(config.turnaround_min());
		let mut driver = SwdDriver::new(LoopbackTransport::new(), config);

		// Write phase, then hand the line over and read back what the loopback latched
		driver.mosi_32(Some(self.value), self.width, self.order)?;
		driver.miso_trn(turnaround)?;
		let mut readback = 0u32;
		driver.miso_32(Some(&mut readback), self.width, self.order)?;
		driver.mosi_trn(turnaround)?;

		let transport = driver.into_transport();
		info!("Transfer complete after {} clock cycles", transport.clock_cycles());
		println!("wrote 0x{:08X}, read back 0x{:08X}", self.value, readback);
		Ok(())
	}
}
