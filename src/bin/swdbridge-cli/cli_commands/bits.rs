// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors

use std::str::FromStr;

use clap::Args;
use color_eyre::eyre::Result;
use log::{info, warn};
use swdbridge::bits::{pack, unpack};
use swdbridge::{BitSequence, ShiftOrder, Word};

use crate::cli_commands::{Container, parse_number};

#[derive(Args)]
pub struct PackArguments
{
	#[arg(value_parser = parse_number)]
	/// The value to pack, in decimal or 0x prefixed hex
	value: u32,
	#[arg(short = 'w', long = "width")]
	/// How many bits to transfer (defaults to the whole container)
	width: Option<usize>,
	#[arg(short = 'o', long = "order", value_enum, default_value_t = ShiftOrder::LsbFirst)]
	/// Which end of the value goes onto the wire first
	order: ShiftOrder,
	#[arg(long = "container", value_enum, default_value_t = Container::Word)]
	/// Size of the word the value is carried in
	container: Container,
}

impl PackArguments
{
	pub fn run(&self) -> Result<()>
	{
		let width = self.width.unwrap_or(self.container.bits());
		let sequence = match self.container {
			Container::Byte => {
				if self.value > u32::from(u8::MAX) {
					warn!("Value 0x{:X} does not fit in a byte, upper bits will be discarded", self.value);
				}
				pack(<u8 as Word>::from_u32(self.value), width, self.order)?
			},
			Container::Word => pack(self.value, width, self.order)?,
		};

		info!("Packed 0x{:X} into {} bits, {}", self.value, width, self.order);
		println!("{sequence}");
		Ok(())
	}
}

#[derive(Args)]
pub struct UnpackArguments
{
	#[arg(value_parser = BitSequence::from_str)]
	/// Bits in wire order, first bit on the left (e.g. 11000000)
	bits: BitSequence,
	#[arg(short = 'w', long = "width")]
	/// How many bits to reassemble (defaults to the length of the sequence)
	width: Option<usize>,
	#[arg(short = 'o', long = "order", value_enum, default_value_t = ShiftOrder::LsbFirst)]
	/// Which end of the value came off the wire first
	order: ShiftOrder,
	#[arg(long = "container", value_enum, default_value_t = Container::Word)]
	/// Size of the word to reassemble into
	container: Container,
}

impl UnpackArguments
{
	pub fn run(&self) -> Result<()>
	{
		let width = self.width.unwrap_or(self.bits.len());
		let value = match self.container {
			Container::Byte => u32::from(unpack::<u8>(&self.bits, width, self.order)?),
			Container::Word => unpack::<u32>(&self.bits, width, self.order)?,
		};

		// Show the binary form most significant bit first, as people write numbers
		let binary = pack(value, self.container.bits(), ShiftOrder::MsbFirst)?;
		let digits = self.container.bits() / 4;
		println!("0x{value:0digits$X} (0b{binary})");
		Ok(())
	}
}
