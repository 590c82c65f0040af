//! Integrity code appended to every LWNX packet.
//!
//! The device computes it with a table-free shift/xor fold over each byte
//! (the second shift is applied on top of the first, so `code` ends up moved
//! left by 12). Both ends must agree bit for bit.

/// Computes the 16-bit LWNX checksum over `data`
pub fn checksum(data: &[u8]) -> u16 {
    data.iter().fold(0u16, |crc, &byte| {
        let mut code = (crc >> 8) ^ byte as u16;
        code ^= code >> 4;
        (crc << 8) ^ code ^ (code << 5) ^ (code << 12)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input() {
        assert_eq!(checksum(&[]), 0);
    }

    #[test]
    fn known_packets() {
        // Product name request as sent by the vendor tooling
        assert_eq!(checksum(&[0xAA, 0x40, 0x00, 0x00]), 0x9F70);
        assert_eq!(checksum(&[0xAA, 0x40, 0x00, 0x02]), 0xBF32);
    }

    proptest! {
        #[test]
        fn deterministic(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(checksum(&data), checksum(&data));
        }

        #[test]
        fn single_bit_flip_changes_checksum(
            data in proptest::collection::vec(any::<u8>(), 1..64),
            idx in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let mut flipped = data.clone();
            let i = idx.index(flipped.len());
            flipped[i] ^= 1 << bit;
            prop_assert_ne!(checksum(&data), checksum(&flipped));
        }
    }
}
