#[inline]
pub const fn bool_from_bit(value: u8) -> bool {
    (value & 0b1) == 0b1
}

#[inline]
pub const fn bool_to_bit(value: bool) -> u8 {
    match value {
        true => 0b1,
        false => 0b0,
    }
}

/// Bits 7..4 of `value`.
#[inline]
pub const fn high_nibble(value: u8) -> u8 {
    (value >> 4) & 0b1111
}

/// Bits 3..0 of `value`.
#[inline]
pub const fn low_nibble(value: u8) -> u8 {
    value & 0b1111
}

#[inline]
pub const fn bit_at(value: u8, shift: u8) -> bool {
    bool_from_bit(value >> shift)
}
