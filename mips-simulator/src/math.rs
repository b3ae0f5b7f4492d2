/// Add unsigned and signed 32-bit numbers. Overflows will wrap.
pub fn add_unsigned(a: u32, b: i32) -> u32 {
    a.wrapping_add(b as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_unsigned_wraps_both_ways() {
        assert_eq!(add_unsigned(10, -4), 6);
        assert_eq!(add_unsigned(0x0040_0008, -12), 0x003F_FFFC);
        assert_eq!(add_unsigned(0xFFFF_FFFF, 1), 0);
        assert_eq!(add_unsigned(0, -1), 0xFFFF_FFFF);
        assert_eq!(add_unsigned(0xFFFF_FFFF, i32::MIN), 0x7FFF_FFFF);
    }
}
