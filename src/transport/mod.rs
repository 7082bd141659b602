// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors

pub mod loopback;

use std::fmt::Display;

use clap::ValueEnum;
use clap::builder::PossibleValue;

use crate::bits::BitSequence;
use crate::error::TransportError;

/// Which side is driving the shared SWDIO line
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Direction
{
	/// MOSI, the host drives the line
	#[default]
	Write,
	/// MISO, the target drives the line
	Read,
}

impl Direction
{
	/// Level of the adapter's RnW signal for this direction
	pub fn rnw(self) -> bool
	{
		matches!(self, Self::Read)
	}
}

impl Display for Direction
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self {
			Self::Write => write!(f, "MOSI"),
			Self::Read => write!(f, "MISO"),
		}
	}
}

impl ValueEnum for Direction
{
	fn value_variants<'a>() -> &'a [Self]
	{
		&[Self::Write, Self::Read]
	}

	fn to_possible_value(&self) -> Option<PossibleValue>
	{
		match self {
			Self::Write => Some(PossibleValue::new("write").alias("mosi")),
			Self::Read => Some(PossibleValue::new("read").alias("miso")),
		}
	}
}

/// Types implementing this trait do the physical shift-register clocking for a driver
pub trait SwdTransport
{
	/// Clock `outgoing.len()` bits, returning the bits sampled on the line in the same cycles
	fn transfer(&mut self, outgoing: &BitSequence) -> Result<BitSequence, TransportError>;
	/// Set the RnW signal so the adapter's output buffer matches the given line direction
	fn set_direction(&mut self, direction: Direction) -> Result<(), TransportError>;

	/// Hand the line over to `direction` and clock `cycles` turnaround cycles, during which
	/// nobody drives it and nothing sampled is meaningful.
	///
	/// RnW is driven first so the output buffer is released/taken before the TRN clocks.
	fn turnaround(&mut self, direction: Direction, cycles: usize) -> Result<(), TransportError>
	{
		self.set_direction(direction)?;
		self.transfer(&BitSequence::idle(cycles))?;
		Ok(())
	}
}

impl<T: SwdTransport + ?Sized> SwdTransport for &mut T
{
	fn transfer(&mut self, outgoing: &BitSequence) -> Result<BitSequence, TransportError>
	{
		(**self).transfer(outgoing)
	}

	fn set_direction(&mut self, direction: Direction) -> Result<(), TransportError>
	{
		(**self).set_direction(direction)
	}

	fn turnaround(&mut self, direction: Direction, cycles: usize) -> Result<(), TransportError>
	{
		(**self).turnaround(direction, cycles)
	}
}

impl<T: SwdTransport + ?Sized> SwdTransport for Box<T>
{
	fn transfer(&mut self, outgoing: &BitSequence) -> Result<BitSequence, TransportError>
	{
		(**self).transfer(outgoing)
	}

	fn set_direction(&mut self, direction: Direction) -> Result<(), TransportError>
	{
		(**self).set_direction(direction)
	}

	fn turnaround(&mut self, direction: Direction, cycles: usize) -> Result<(), TransportError>
	{
		(**self).turnaround(direction, cycles)
	}
}
