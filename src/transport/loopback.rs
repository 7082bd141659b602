// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors

use std::collections::VecDeque;

use log::trace;

use crate::bits::BitSequence;
use crate::error::TransportError;
use crate::transport::{Direction, SwdTransport};

/// A transport with no hardware behind it.
///
/// While writing, every bit clocked out is sampled straight back, as on a line nothing else is
/// driving. The last write is latched, and reads hand it back (resized to the read's width)
/// unless a response has been queued with [`LoopbackTransport::queue_response`]. Turnaround
/// cycles are counted but leave both the latch and the response queue alone.
#[derive(Debug, Default)]
pub struct LoopbackTransport
{
	direction: Direction,
	latched: BitSequence,
	responses: VecDeque<BitSequence>,
	clock_cycles: usize,
}

impl LoopbackTransport
{
	pub fn new() -> Self
	{
		Self::default()
	}

	/// Queue up bits for the target to drive on a future read
	pub fn queue_response(&mut self, response: BitSequence)
	{
		self.responses.push_back(response);
	}

	pub fn direction(&self) -> Direction
	{
		self.direction
	}

	/// Total number of clock cycles issued so far
	pub fn clock_cycles(&self) -> usize
	{
		self.clock_cycles
	}

	pub fn latched(&self) -> &BitSequence
	{
		&self.latched
	}

	fn sample_read(&mut self, width: usize) -> BitSequence
	{
		let source = self.responses.pop_front().unwrap_or_else(|| self.latched.clone());
		// Anything the target does not drive reads back low
		source.iter().copied().chain(std::iter::repeat(false)).take(width).collect()
	}
}

impl SwdTransport for LoopbackTransport
{
	fn transfer(&mut self, outgoing: &BitSequence) -> Result<BitSequence, TransportError>
	{
		self.clock_cycles += outgoing.len();
		let incoming = match self.direction {
			Direction::Write => {
				self.latched = outgoing.clone();
				outgoing.clone()
			},
			Direction::Read => self.sample_read(outgoing.len()),
		};
		trace!("Loopback {} clocked {} bits, out {} in {}", self.direction, outgoing.len(), outgoing, incoming);
		Ok(incoming)
	}

	fn set_direction(&mut self, direction: Direction) -> Result<(), TransportError>
	{
		self.direction = direction;
		Ok(())
	}

	fn turnaround(&mut self, direction: Direction, cycles: usize) -> Result<(), TransportError>
	{
		self.set_direction(direction)?;
		self.clock_cycles += cycles;
		trace!("Loopback turned the line around to {} over {} cycles", direction, cycles);
		Ok(())
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn write_echoes_and_latches()
	{
		let mut transport = LoopbackTransport::new();
		let outgoing: BitSequence = "1011".parse().unwrap();
		assert_eq!(transport.transfer(&outgoing).unwrap(), outgoing);
		assert_eq!(transport.latched(), &outgoing);
		assert_eq!(transport.clock_cycles(), 4);
	}

	#[test]
	fn read_returns_latched_bits_resized()
	{
		let mut transport = LoopbackTransport::new();
		transport.transfer(&"11".parse().unwrap()).unwrap();
		transport.set_direction(Direction::Read).unwrap();
		let incoming = transport.transfer(&BitSequence::idle(4)).unwrap();
		assert_eq!(incoming.to_string(), "1100");
		let incoming = transport.transfer(&BitSequence::idle(1)).unwrap();
		assert_eq!(incoming.to_string(), "1");
	}

	#[test]
	fn queued_responses_take_priority()
	{
		let mut transport = LoopbackTransport::new();
		transport.set_direction(Direction::Read).unwrap();
		transport.queue_response("0101".parse().unwrap());
		assert_eq!(transport.transfer(&BitSequence::idle(4)).unwrap().to_string(), "0101");
		// Queue drained, falls back to the (empty) latch
		assert_eq!(transport.transfer(&BitSequence::idle(4)).unwrap().to_string(), "0000");
	}

	#[test]
	fn turnaround_leaves_queue_and_latch_alone()
	{
		let mut transport = LoopbackTransport::new();
		transport.transfer(&"1110".parse().unwrap()).unwrap();
		transport.queue_response("0101".parse().unwrap());

		transport.turnaround(Direction::Read, 2).unwrap();
		assert_eq!(transport.direction(), Direction::Read);
		assert_eq!(transport.clock_cycles(), 6);
		assert_eq!(transport.transfer(&BitSequence::idle(4)).unwrap().to_string(), "0101");

		transport.turnaround(Direction::Write, 1).unwrap();
		assert_eq!(transport.direction(), Direction::Write);
		assert_eq!(transport.latched().to_string(), "1110");
	}
}
