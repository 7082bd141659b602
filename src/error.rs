// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors
//! Module for error handling code.

use thiserror::Error;

/// Error type handed back by a transport when the physical transfer fails
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum SwdError
{
	#[error("Requested transfer width of {width} bits exceeds the {capacity} bit word it was asked to carry")]
	InvalidWidth
	{
		/// The number of bits the caller asked for
		width: usize,
		/// How many bits the word type can actually hold
		capacity: usize,
	},

	#[error("Bit sequence of length {length} is too short to hold a {width} bit transfer")]
	ShortSequence
	{
		width: usize,
		length: usize,
	},

	#[error("Turnaround of {cycles} cycles is outside the adapter's supported range of {min} to {max} cycles")]
	InvalidTurnaroundCycles
	{
		cycles: usize,
		min: usize,
		max: usize,
	},

	#[error("Turnaround bound is invalid, minimum of {min} cycles is larger than maximum of {max}")]
	InvalidTurnaroundBound
	{
		min: usize,
		max: usize,
	},

	#[error("A required data buffer was not provided")]
	NullInput,

	#[error("Bit sequences may only contain '0' and '1', got '{0}'")]
	InvalidBitCharacter(char),

	#[error("Adapter driver failed to complete the transfer")]
	DriverFailure(#[source] TransportError),

	#[error("Failed to parse driver configuration")]
	Config(#[from] serde_json::Error),

	#[error("Failed to read driver configuration")]
	Io(#[from] std::io::Error),
}
