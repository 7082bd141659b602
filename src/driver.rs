// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors
//! The driver bridge an SWD protocol layer calls into to move data phases and turnarounds
//! across an adapter.

use log::Level;

use crate::bits::{BitSequence, ShiftOrder, Word, check_width, pack, unpack};
use crate::config::DriverConfig;
use crate::diagnostic;
use crate::diagnostics::Diagnostics;
use crate::error::{SwdError, TransportError};
use crate::transport::{Direction, SwdTransport};

pub struct SwdDriver<T>
{
	transport: T,
	config: DriverConfig,
	diagnostics: Diagnostics,
}

impl<T: SwdTransport> SwdDriver<T>
{
	/// Build a driver that reports diagnostics through the `log` facade at the configured level
	pub fn new(transport: T, config: DriverConfig) -> Self
	{
		let diagnostics = Diagnostics::new(config.log_level());
		Self::with_diagnostics(transport, config, diagnostics)
	}

	pub fn with_diagnostics(transport: T, config: DriverConfig, diagnostics: Diagnostics) -> Self
	{
		Self {
			transport,
			config,
			diagnostics,
		}
	}

	pub fn config(&self) -> &DriverConfig
	{
		&self.config
	}

	pub fn transport(&self) -> &T
	{
		&self.transport
	}

	pub fn transport_mut(&mut self) -> &mut T
	{
		&mut self.transport
	}

	pub fn into_transport(self) -> T
	{
		self.transport
	}

	/// Write (MOSI) up to 8 bits of `data`, returning the number of bits clocked out
	pub fn mosi_8(&mut self, data: Option<u8>, bits: usize, order: ShiftOrder) -> Result<usize, SwdError>
	{
		self.mosi(data, bits, order)
	}

	/// Write (MOSI) up to 32 bits of `data`, returning the number of bits clocked out
	pub fn mosi_32(&mut self, data: Option<u32>, bits: usize, order: ShiftOrder) -> Result<usize, SwdError>
	{
		self.mosi(data, bits, order)
	}

	/// Read (MISO) up to 8 bits into `data`, returning the number of bits clocked in
	pub fn miso_8(&mut self, data: Option<&mut u8>, bits: usize, order: ShiftOrder) -> Result<usize, SwdError>
	{
		self.miso(data, bits, order)
	}

	/// Read (MISO) up to 32 bits into `data`, returning the number of bits clocked in
	pub fn miso_32(&mut self, data: Option<&mut u32>, bits: usize, order: ShiftOrder) -> Result<usize, SwdError>
	{
		self.miso(data, bits, order)
	}

	/// Hand the line over to the host for `cycles` turnaround cycles
	pub fn mosi_trn(&mut self, cycles: usize) -> Result<usize, SwdError>
	{
		self.turnaround(Direction::Write, cycles)
	}

	/// Hand the line over to the target for `cycles` turnaround cycles
	pub fn miso_trn(&mut self, cycles: usize) -> Result<usize, SwdError>
	{
		self.turnaround(Direction::Read, cycles)
	}

	/// Switch the line's drive direction, clocking `cycles` idle bits while it turns around.
	///
	/// `cycles` must sit within the configured turnaround bound, inclusive at both ends.
	pub fn turnaround(&mut self, direction: Direction, cycles: usize) -> Result<usize, SwdError>
	{
		let cycles = match self.config.check_turnaround(cycles) {
			Ok(cycles) => cycles,
			Err(err) => {
				diagnostic!(self.diagnostics, Level::Warn, "{} turnaround rejected: {}", direction, err);
				return Err(err);
			},
		};
		diagnostic!(self.diagnostics, Level::Debug, "{} turnaround of {} cycles", direction, cycles);

		if let Err(source) = self.transport.turnaround(direction, cycles) {
			return Err(self.driver_failure(source));
		}
		Ok(cycles)
	}

	fn mosi<W: Word>(&mut self, data: Option<W>, bits: usize, order: ShiftOrder) -> Result<usize, SwdError>
	{
		let data = data.ok_or(SwdError::NullInput)?;
		diagnostic!(
			self.diagnostics,
			Level::Debug,
			"mosi_{}(data=0x{:0width$X}, bits={}, order={})",
			W::BITS,
			data.to_u32(),
			bits,
			order,
			width = W::BITS / 4
		);

		let outgoing = pack(data, bits, order)?;
		self.clock(&outgoing)?;
		Ok(bits)
	}

	fn miso<W: Word>(&mut self, data: Option<&mut W>, bits: usize, order: ShiftOrder) -> Result<usize, SwdError>
	{
		let data = data.ok_or(SwdError::NullInput)?;
		check_width::<W>(bits)?;

		let incoming = self.clock(&BitSequence::idle(bits))?;
		*data = unpack(&incoming, bits, order)?;
		diagnostic!(
			self.diagnostics,
			Level::Debug,
			"miso_{}(bits={}, order={}) reads: 0x{:0width$X}",
			W::BITS,
			bits,
			order,
			data.to_u32(),
			width = W::BITS / 4
		);
		Ok(bits)
	}

	fn clock(&mut self, outgoing: &BitSequence) -> Result<BitSequence, SwdError>
	{
		match self.transport.transfer(outgoing) {
			Ok(incoming) => Ok(incoming),
			Err(source) => Err(self.driver_failure(source)),
		}
	}

	/// Report a transport failure through this driver's diagnostics and wrap it for the caller
	fn driver_failure(&self, source: TransportError) -> SwdError
	{
		diagnostic!(self.diagnostics, Level::Error, "Adapter driver failure: {}", source);
		SwdError::DriverFailure(source)
	}
}
