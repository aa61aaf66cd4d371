//! Bit-field access within a register byte
//!
//! Bit 0 is the least significant bit. A field is `length` contiguous bits
//! starting at `start`:
//!
//! ```text
//!  bit   7   6   5   4   3   2   1   0
//!      ┌───┬───┬───┬───┬───┬───┬───┬───┐
//!      │   │   │   │ x │ x │   │   │   │   start = 3, length = 2
//!      └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```
//!
//! Reading shifts the field down to the low-order bits. Writing clears the
//! window and merges the new value in, leaving every other bit alone.

/// Bit field bounds outside the register byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidBitField {
    /// Requested start bit
    pub start: u8,
    /// Requested length
    pub length: u8,
}

/// Contiguous run of bits inside a register byte
///
/// Always satisfies `1 <= length` and `start + length <= 8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    start: u8,
    length: u8,
}

impl BitField {
    /// Create a field of `length` bits starting at bit `start`
    pub const fn new(start: u8, length: u8) -> Result<Self, InvalidBitField> {
        if length == 0 || start > 7 || length > 8 - start {
            return Err(InvalidBitField { start, length });
        }
        Ok(Self { start, length })
    }

    /// Single-bit field at `position`
    pub const fn bit(position: u8) -> Result<Self, InvalidBitField> {
        Self::new(position, 1)
    }

    /// Lowest bit of the field
    pub const fn start(&self) -> u8 {
        self.start
    }

    /// Number of bits in the field
    pub const fn length(&self) -> u8 {
        self.length
    }

    /// Mask of the field's value before shifting into place
    pub const fn value_mask(&self) -> u8 {
        // u16 so that length == 8 does not overflow the shift
        ((1u16 << self.length) - 1) as u8
    }

    /// Mask of the field in register position
    pub const fn mask(&self) -> u8 {
        self.value_mask() << self.start
    }

    /// Largest value the field can hold
    pub const fn max_value(&self) -> u8 {
        self.value_mask()
    }
}

/// Extract `field` from `register`, right-aligned
pub const fn read_bit_field(register: u8, field: BitField) -> u8 {
    (register >> field.start) & field.value_mask()
}

/// Merge `value` into `field` of `register`
///
/// Bits of `value` above the field length are ignored.
pub const fn write_bit_field(register: u8, field: BitField, value: u8) -> u8 {
    (register & !field.mask()) | ((value & field.value_mask()) << field.start)
}

/// Extract `length` bits starting at `start`
pub const fn read_bits(register: u8, start: u8, length: u8) -> Result<u8, InvalidBitField> {
    match BitField::new(start, length) {
        Ok(field) => Ok(read_bit_field(register, field)),
        Err(e) => Err(e),
    }
}

/// Merge `value` into the `length` bits starting at `start`
pub const fn write_bits(
    register: u8,
    start: u8,
    length: u8,
    value: u8,
) -> Result<u8, InvalidBitField> {
    match BitField::new(start, length) {
        Ok(field) => Ok(write_bit_field(register, field, value)),
        Err(e) => Err(e),
    }
}

/// Test bit `position` of `register`
pub const fn read_bit(register: u8, position: u8) -> Result<bool, InvalidBitField> {
    match BitField::bit(position) {
        Ok(field) => Ok(read_bit_field(register, field) != 0),
        Err(e) => Err(e),
    }
}

/// Set or clear bit `position` of `register`
pub const fn write_bit(register: u8, position: u8, value: bool) -> Result<u8, InvalidBitField> {
    match BitField::bit(position) {
        Ok(field) => Ok(write_bit_field(register, field, value as u8)),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field(start: u8, length: u8) -> BitField {
        BitField::new(start, length).unwrap()
    }

    #[test]
    fn test_read_bit_field() {
        assert_eq!(read_bit_field(0b1101_0110, field(1, 3)), 0b011);
        assert_eq!(read_bit_field(0b0000_0001, field(0, 1)), 1);
        assert_eq!(read_bit_field(0b1010_0101, field(0, 8)), 0b1010_0101);
        assert_eq!(read_bit_field(0b1000_0000, field(7, 1)), 1);
    }

    #[test]
    fn test_write_bit_field() {
        assert_eq!(write_bit_field(0b0000_0000, field(3, 2), 0b11), 0b0001_1000);
        assert_eq!(write_bit_field(0b1111_1111, field(0, 4), 0b0000), 0b1111_0000);
        assert_eq!(write_bit_field(0b0101_0101, field(0, 8), 0xAA), 0xAA);
    }

    #[test]
    fn test_write_ignores_excess_value_bits() {
        // 0b111 does not fit a 2-bit field; only the low two bits land
        assert_eq!(write_bit_field(0b0000_0000, field(3, 2), 0b111), 0b0001_1000);
        assert_eq!(write_bit_field(0b1000_0000, field(6, 1), 0b10), 0b1000_0000);
    }

    #[test]
    fn test_masks() {
        let f = field(3, 2);
        assert_eq!(f.value_mask(), 0b11);
        assert_eq!(f.mask(), 0b0001_1000);
        assert_eq!(field(0, 8).mask(), 0xFF);
        assert_eq!(field(7, 1).mask(), 0x80);
        assert_eq!(field(2, 4).max_value(), 15);
    }

    #[test]
    fn test_invalid_fields_rejected() {
        assert_eq!(
            BitField::new(0, 0),
            Err(InvalidBitField { start: 0, length: 0 })
        );
        assert!(BitField::new(8, 1).is_err());
        assert!(BitField::new(5, 4).is_err());
        assert!(BitField::new(1, 8).is_err());
        assert!(BitField::new(255, 255).is_err());
        assert!(BitField::new(4, 4).is_ok());
    }

    #[test]
    fn test_single_bit_helpers() {
        assert_eq!(read_bit(0b0000_0100, 2), Ok(true));
        assert_eq!(read_bit(0b0000_0100, 3), Ok(false));
        assert_eq!(write_bit(0b0000_0000, 7, true), Ok(0b1000_0000));
        assert_eq!(write_bit(0b1111_1111, 0, false), Ok(0b1111_1110));
        assert!(read_bit(0, 8).is_err());
        assert!(write_bit(0, 8, true).is_err());
    }

    #[test]
    fn test_raw_bounds_helpers() {
        assert_eq!(read_bits(0b1101_0110, 1, 3), Ok(3));
        assert_eq!(write_bits(0, 3, 2, 0b11), Ok(0b0001_1000));
        assert_eq!(
            write_bits(0, 6, 3, 0b111),
            Err(InvalidBitField { start: 6, length: 3 })
        );
    }

    fn any_field() -> impl Strategy<Value = BitField> {
        (0u8..8).prop_flat_map(|start| (Just(start), 1u8..=(8 - start)))
            .prop_map(|(start, length)| field(start, length))
    }

    proptest! {
        #[test]
        fn test_rewrite_read_value_is_identity(register in any::<u8>(), f in any_field()) {
            let value = read_bit_field(register, f);
            prop_assert_eq!(write_bit_field(register, f, value), register);
        }

        #[test]
        fn test_write_preserves_outside_bits(
            register in any::<u8>(),
            value in any::<u8>(),
            f in any_field(),
        ) {
            let updated = write_bit_field(register, f, value);
            prop_assert_eq!(updated & !f.mask(), register & !f.mask());
        }

        #[test]
        fn test_read_after_write_returns_masked_value(
            register in any::<u8>(),
            value in any::<u8>(),
            f in any_field(),
        ) {
            let updated = write_bit_field(register, f, value);
            prop_assert_eq!(read_bit_field(updated, f), value & f.value_mask());
            prop_assert!(read_bit_field(register, f) <= f.max_value());
        }
    }
}
