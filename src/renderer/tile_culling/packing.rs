//! Packed light-index encoding.
//!
//! One RGBA8 texel carries two light indices as raw little-endian u16
//! integers. Raw integer storage is exact for every valid index (counts
//! are at most 64) and the same convention is applied on the write and
//! read side; indices are never normalized by the light count.

/// Pack two light indices into one RGBA8 texel.
pub fn pack_index_pair(a: u16, b: u16) -> [u8; 4] {
    [a as u8, (a >> 8) as u8, b as u8, (b >> 8) as u8]
}

/// Recover the two light indices from a texel. Inverse of
/// [`pack_index_pair`] for every u16 pair.
pub fn unpack_index_pair(texel: [u8; 4]) -> (u16, u16) {
    (
        u16::from(texel[0]) | (u16::from(texel[1]) << 8),
        u16::from(texel[2]) | (u16::from(texel[3]) << 8),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LIGHT_INDEX_SENTINEL, MAX_LIGHTS};

    #[test]
    fn test_round_trip_over_valid_index_range() {
        // Valid indices are 0..=MAX_LIGHTS (the sentinel included).
        for a in 0..=MAX_LIGHTS as u16 {
            let b = MAX_LIGHTS as u16 - a;
            assert_eq!(unpack_index_pair(pack_index_pair(a, b)), (a, b));
        }
    }

    #[test]
    fn test_sentinel_survives_packing() {
        let texel = pack_index_pair(LIGHT_INDEX_SENTINEL, 3);
        assert_eq!(unpack_index_pair(texel), (LIGHT_INDEX_SENTINEL, 3));
    }

    #[test]
    fn test_low_byte_lands_in_first_channel() {
        // The shading pass reads channel 0 as the low byte; pin the layout.
        assert_eq!(pack_index_pair(0x0102, 0x0304), [0x02, 0x01, 0x04, 0x03]);
    }
}
