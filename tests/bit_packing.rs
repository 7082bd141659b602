// SPDX-License-Identifier: MIT OR Apache-2.0
// SPDX-FileCopyrightText: 2025 swdbridge contributors

#[cfg(test)]
mod tests
{
	use color_eyre::eyre::Result;
	use swdbridge::bits::{pack, pack_into, pack_u32, pack_u8, unpack, unpack_u32, unpack_u8};
	use swdbridge::{BitSequence, ShiftOrder, SwdError};
	use test_case::test_case;

	const ORDERS: [ShiftOrder; 2] = [ShiftOrder::LsbFirst, ShiftOrder::MsbFirst];

	fn bits(pattern: &str) -> BitSequence
	{
		pattern.parse().expect("test pattern should only hold 0 and 1")
	}

	#[test_case(ShiftOrder::LsbFirst, "11000000"; "lsb first")]
	#[test_case(ShiftOrder::MsbFirst, "00000011"; "msb first")]
	fn byte_three(order: ShiftOrder, expected: &str) -> Result<()>
	{
		assert_eq!(pack(0x03u8, 8, order)?, bits(expected));
		Ok(())
	}

	#[test]
	fn palindromic_byte() -> Result<()>
	{
		// 0xA5 is 10100101, which reads the same in either order
		let lsb = pack(0xA5u8, 8, ShiftOrder::LsbFirst)?;
		assert_eq!(lsb, bits("10100101"));
		assert_eq!(pack(0xA5u8, 8, ShiftOrder::MsbFirst)?, lsb);
		Ok(())
	}

	#[test]
	fn every_byte_round_trips() -> Result<()>
	{
		for order in ORDERS {
			for value in 0..=u8::MAX {
				let sequence = pack(value, 8, order)?;
				assert_eq!(sequence.len(), 8);
				assert_eq!(unpack::<u8>(&sequence, 8, order)?, value);
			}
		}
		Ok(())
	}

	#[test]
	fn sampled_words_round_trip() -> Result<()>
	{
		let mut samples = vec![0u32, 1, 0x8000_0000, 0xffff_ffff, 0xdead_beef, 0x2ba0_1477, 0x0bb1_1477];
		samples.extend((0..32).map(|shift| 1u32 << shift));
		// A cheap LCG walk to cover a spread of patterns
		let mut value = 0x1234_5678u32;
		for _ in 0..1000 {
			value = value.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
			samples.push(value);
		}

		for order in ORDERS {
			for &value in &samples {
				let sequence = pack(value, 32, order)?;
				assert_eq!(sequence.len(), 32);
				assert_eq!(unpack::<u32>(&sequence, 32, order)?, value);
			}
		}
		Ok(())
	}

	#[test]
	fn orders_are_mirror_images() -> Result<()>
	{
		for value in [0x03u32, 0x8000_0001, 0xdead_beef, 0x0000_ff00] {
			let lsb = pack(value, 32, ShiftOrder::LsbFirst)?;
			let msb = pack(value, 32, ShiftOrder::MsbFirst)?;
			assert_eq!(lsb.reversed(), msb);
		}
		for value in 0..=u8::MAX {
			assert_eq!(pack(value, 8, ShiftOrder::LsbFirst)?.reversed(), pack(value, 8, ShiftOrder::MsbFirst)?);
		}
		Ok(())
	}

	#[test]
	fn zero_is_all_low() -> Result<()>
	{
		let sequence = pack(0u8, 8, ShiftOrder::LsbFirst)?;
		assert_eq!(sequence.as_slice(), &[false; 8]);
		assert_eq!(unpack::<u8>(&[false; 8], 8, ShiftOrder::LsbFirst)?, 0);
		assert_eq!(unpack::<u32>(&[false; 32], 32, ShiftOrder::MsbFirst)?, 0);
		Ok(())
	}

	#[test]
	fn bits_above_width_are_discarded() -> Result<()>
	{
		// 0x1FF as a byte keeps only its low 8 bits
		let value = 0x1ffu32 as u8;
		assert_eq!(pack(value, 8, ShiftOrder::LsbFirst)?, bits("11111111"));
		// And a short transfer of a word drops everything above the width
		assert_eq!(pack(0x1ffu32, 8, ShiftOrder::LsbFirst)?, bits("11111111"));
		assert_eq!(unpack::<u32>(&pack(0x1ffu32, 8, ShiftOrder::LsbFirst)?, 8, ShiftOrder::LsbFirst)?, 0xff);
		Ok(())
	}

	#[test]
	fn zero_width_is_empty() -> Result<()>
	{
		for order in ORDERS {
			assert!(pack(0xffu8, 0, order)?.is_empty());
			assert_eq!(unpack::<u32>(&[], 0, order)?, 0);
		}
		Ok(())
	}

	#[test_case(9, 8; "byte")]
	#[test_case(33, 32; "word")]
	fn width_beyond_capacity_is_rejected(width: usize, capacity: usize)
	{
		let result = if capacity == 8 {
			pack(0u8, width, ShiftOrder::LsbFirst).map(|_| ())
		} else {
			pack(0u32, width, ShiftOrder::LsbFirst).map(|_| ())
		};
		match result {
			Err(SwdError::InvalidWidth { width: got_width, capacity: got_capacity }) => {
				assert_eq!(got_width, width);
				assert_eq!(got_capacity, capacity);
			},
			_ => panic!("expected an InvalidWidth error"),
		}

		let sequence = BitSequence::idle(width);
		let result = if capacity == 8 {
			unpack::<u8>(&sequence, width, ShiftOrder::LsbFirst).map(u32::from)
		} else {
			unpack::<u32>(&sequence, width, ShiftOrder::LsbFirst)
		};
		assert!(matches!(result, Err(SwdError::InvalidWidth { .. })));
	}

	#[test]
	fn short_sequence_is_rejected()
	{
		let result = unpack::<u32>(&[true; 7], 8, ShiftOrder::LsbFirst);
		assert!(matches!(result, Err(SwdError::ShortSequence { width: 8, length: 7 })));
	}

	#[test]
	fn trailing_bits_are_ignored() -> Result<()>
	{
		let mut sequence = pack(0x03u8, 8, ShiftOrder::MsbFirst)?.into_inner();
		sequence.extend([true, true, true]);
		assert_eq!(unpack::<u8>(&sequence, 8, ShiftOrder::MsbFirst)?, 0x03);
		Ok(())
	}

	#[test]
	fn caller_supplied_buffer() -> Result<()>
	{
		let mut buffer = [true; 8];
		assert_eq!(pack_into(0x03u8, ShiftOrder::MsbFirst, &mut buffer)?, 8);
		assert_eq!(buffer, [false, false, false, false, false, false, true, true]);

		let mut buffer = [false; 32];
		pack_into(0x8000_0000u32, ShiftOrder::LsbFirst, &mut buffer)?;
		assert!(buffer[31]);
		assert_eq!(buffer.iter().filter(|&&bit| bit).count(), 1);
		Ok(())
	}

	#[test]
	fn fixed_width_wrappers() -> Result<()>
	{
		assert_eq!(pack_u8(0x03, ShiftOrder::LsbFirst), pack(0x03u8, 8, ShiftOrder::LsbFirst)?);
		assert_eq!(pack_u32(0x2ba0_1477, ShiftOrder::MsbFirst), pack(0x2ba0_1477u32, 32, ShiftOrder::MsbFirst)?);
		assert_eq!(unpack_u8(&pack_u8(0x5a, ShiftOrder::MsbFirst), ShiftOrder::MsbFirst)?, 0x5a);
		assert_eq!(unpack_u32(&pack_u32(0x2ba0_1477, ShiftOrder::LsbFirst), ShiftOrder::LsbFirst)?, 0x2ba0_1477);
		Ok(())
	}
}
