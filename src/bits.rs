// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors
//! Conversion between data phase words and the bit sequences clocked over SWDIO.
//!
//! An SWD data phase is shifted out of (or into) the adapter one bit per clock. The functions
//! here lay a word out as a sequence of individual bits in wire order, where index 0 is the first
//! bit placed on or read from the wire, and put words back together from such sequences.

use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;

use clap::ValueEnum;
use clap::builder::PossibleValue;

use crate::error::SwdError;

mod sealed
{
	pub trait Sealed {}

	impl Sealed for u8 {}
	impl Sealed for u32 {}
}

/// A fixed width unsigned word that can be carried by a data phase.
///
/// Only `u8` and `u32` implement this, matching the byte and word sized transfers the
/// adapter drivers are asked to perform.
pub trait Word: sealed::Sealed + Copy + Default + std::fmt::Debug
{
	/// Number of bits the word type can hold
	const BITS: usize;

	/// Widen the word to a `u32` without changing its value
	fn to_u32(self) -> u32;
	/// Build a word from the low `Self::BITS` bits of `value`
	fn from_u32(value: u32) -> Self;
}

impl Word for u8
{
	const BITS: usize = 8;

	fn to_u32(self) -> u32
	{
		u32::from(self)
	}

	fn from_u32(value: u32) -> Self
	{
		(value & 0xff) as u8
	}
}

impl Word for u32
{
	const BITS: usize = 32;

	fn to_u32(self) -> u32
	{
		self
	}

	fn from_u32(value: u32) -> Self
	{
		value
	}
}

/// The order in which a word's bits are shifted onto the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ShiftOrder
{
	/// Bit 0 of the word goes out first. This is what SWD uses for all data phases.
	#[default]
	LsbFirst,
	/// The most significant bit of the transfer goes out first.
	MsbFirst,
}

impl ShiftOrder
{
	/// Where numeric bit `bit` of a `width` bit transfer sits in wire order.
	#[inline]
	pub fn wire_index(self, bit: usize, width: usize) -> usize
	{
		match self {
			Self::LsbFirst => bit,
			Self::MsbFirst => width - 1 - bit,
		}
	}
}

impl Display for ShiftOrder
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		match self {
			Self::LsbFirst => write!(f, "LSB first"),
			Self::MsbFirst => write!(f, "MSB first"),
		}
	}
}

impl ValueEnum for ShiftOrder
{
	fn value_variants<'a>() -> &'a [Self]
	{
		&[Self::LsbFirst, Self::MsbFirst]
	}

	fn to_possible_value(&self) -> Option<PossibleValue>
	{
		match self {
			Self::LsbFirst => Some(PossibleValue::new("lsb").alias("lsb-first")),
			Self::MsbFirst => Some(PossibleValue::new("msb").alias("msb-first")),
		}
	}
}

/// An ordered run of bits as they appear on the wire, index 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitSequence(Vec<bool>);

impl BitSequence
{
	/// A sequence of `width` low bits, as clocked out while only reading or idling the line.
	pub fn idle(width: usize) -> Self
	{
		Self(vec![false; width])
	}

	pub fn as_slice(&self) -> &[bool]
	{
		&self.0
	}

	pub fn into_inner(self) -> Vec<bool>
	{
		self.0
	}

	/// The same bits in the opposite wire order
	pub fn reversed(&self) -> Self
	{
		Self(self.0.iter().rev().copied().collect())
	}
}

impl Deref for BitSequence
{
	type Target = [bool];

	fn deref(&self) -> &Self::Target
	{
		&self.0
	}
}

impl From<Vec<bool>> for BitSequence
{
	fn from(bits: Vec<bool>) -> Self
	{
		Self(bits)
	}
}

impl FromIterator<bool> for BitSequence
{
	fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self
	{
		Self(iter.into_iter().collect())
	}
}

impl Display for BitSequence
{
	/// Renders the sequence in wire order as a string of '0' and '1' characters
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result
	{
		for &bit in &self.0 {
			f.write_str(if bit { "1" } else { "0" })?;
		}
		Ok(())
	}
}

impl FromStr for BitSequence
{
	type Err = SwdError;

	fn from_str(value: &str) -> Result<Self, Self::Err>
	{
		value
			.chars()
			.map(|character| match character {
				'0' => Ok(false),
				'1' => Ok(true),
				other => Err(SwdError::InvalidBitCharacter(other)),
			})
			.collect()
	}
}

pub(crate) fn check_width<W: Word>(width: usize) -> Result<(), SwdError>
{
	if width > W::BITS {
		return Err(SwdError::InvalidWidth {
			width,
			capacity: W::BITS,
		});
	}
	Ok(())
}

// Callers must have already checked out.len() against the word's capacity
fn scatter(value: u32, order: ShiftOrder, out: &mut [bool])
{
	let width = out.len();
	for bit in 0..width {
		out[order.wire_index(bit, width)] = (value & (1 << bit)) != 0;
	}
}

/// Lay out the low `width` bits of `word` as a freshly allocated bit sequence.
///
/// Bits of `word` above `width` are ignored, the same way a peripheral shift register
/// truncates them. Asking for more bits than `W` holds fails with [`SwdError::InvalidWidth`].
pub fn pack<W: Word>(word: W, width: usize, order: ShiftOrder) -> Result<BitSequence, SwdError>
{
	check_width::<W>(width)?;
	let mut sequence = BitSequence::idle(width);
	scatter(word.to_u32(), order, &mut sequence.0);
	Ok(sequence)
}

/// Lay out `word` into a caller supplied buffer, using the whole buffer as the transfer width.
///
/// Returns the number of bits written.
pub fn pack_into<W: Word>(word: W, order: ShiftOrder, out: &mut [bool]) -> Result<usize, SwdError>
{
	check_width::<W>(out.len())?;
	scatter(word.to_u32(), order, out);
	Ok(out.len())
}

/// Reassemble a word from the first `width` bits of `sequence`.
///
/// Any entries past `width` are not looked at. A sequence shorter than `width` fails with
/// [`SwdError::ShortSequence`].
pub fn unpack<W: Word>(sequence: &[bool], width: usize, order: ShiftOrder) -> Result<W, SwdError>
{
	check_width::<W>(width)?;
	if sequence.len() < width {
		return Err(SwdError::ShortSequence {
			width,
			length: sequence.len(),
		});
	}

	let value = (0..width)
		.filter(|&bit| sequence[order.wire_index(bit, width)])
		.fold(0u32, |value, bit| value | (1 << bit));
	Ok(W::from_u32(value))
}

/// Lay out all 8 bits of a byte
pub fn pack_u8(word: u8, order: ShiftOrder) -> BitSequence
{
	let mut sequence = BitSequence::idle(u8::BITS as usize);
	scatter(word.into(), order, &mut sequence.0);
	sequence
}

/// Lay out all 32 bits of a word
pub fn pack_u32(word: u32, order: ShiftOrder) -> BitSequence
{
	let mut sequence = BitSequence::idle(u32::BITS as usize);
	scatter(word, order, &mut sequence.0);
	sequence
}

/// Reassemble a byte from the first 8 bits of `sequence`
pub fn unpack_u8(sequence: &[bool], order: ShiftOrder) -> Result<u8, SwdError>
{
	unpack(sequence, <u8 as Word>::BITS, order)
}

/// Reassemble a word from the first 32 bits of `sequence`
pub fn unpack_u32(sequence: &[bool], order: ShiftOrder) -> Result<u32, SwdError>
{
	unpack(sequence, <u32 as Word>::BITS, order)
}
