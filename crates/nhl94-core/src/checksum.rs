//! Cartridge checksum.
//!
//! The header stores a 16-bit big-endian sum of every big-endian word from
//! the checksum start to the end of the image. It must be recomputed as the
//! last step of any save, after every other byte has been written.

use tracing::debug;

use crate::error::Result;
use crate::layout::RomLayout;
use crate::rom::{RomReader, RomWriter};

/// Sums the big-endian words from `start` to the end of `image`, wrapping at 16 bits.
///
/// A trailing odd byte is ignored. An image shorter than `start` sums to 0.
pub fn compute_checksum_from(image: &[u8], start: usize) -> u16 {
    image
        .get(start..)
        .unwrap_or_default()
        .chunks_exact(2)
        .fold(0u16, |sum, word| {
            sum.wrapping_add(u16::from_be_bytes([word[0], word[1]]))
        })
}

/// Computes the checksum using the default layout.
pub fn compute_checksum(image: &[u8]) -> u16 {
    compute_checksum_from(image, RomLayout::default().checksum_start)
}

/// Reads the checksum currently stored in the header.
pub fn stored_checksum(image: &[u8], layout: &RomLayout) -> Result<u16> {
    RomReader::new(image).read_u16_be_at(layout.checksum_offset)
}

/// Recomputes the checksum and writes it into the header. Returns the new value.
pub fn recompute_checksum_with(image: &mut [u8], layout: &RomLayout) -> Result<u16> {
    let checksum = compute_checksum_from(image, layout.checksum_start);
    RomWriter::new(image).write_u16_be(layout.checksum_offset, checksum)?;
    debug!(
        "Wrote checksum {:#06X} at {:#X}",
        checksum, layout.checksum_offset
    );
    Ok(checksum)
}

/// Recomputes the checksum at the default header offset.
pub fn recompute_checksum(image: &mut [u8]) -> Result<u16> {
    recompute_checksum_with(image, &RomLayout::default())
}

/// True when the stored checksum matches the image contents.
pub fn verify_checksum(image: &[u8], layout: &RomLayout) -> Result<bool> {
    Ok(stored_checksum(image, layout)? == compute_checksum_from(image, layout.checksum_start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with_tail(tail: &[u8]) -> Vec<u8> {
        let mut image = vec![0u8; 0x200];
        image.extend_from_slice(tail);
        image
    }

    #[test]
    fn test_checksum_sums_words_from_start() {
        let image = image_with_tail(&[0x12, 0x34, 0x00, 0x01]);
        assert_eq!(compute_checksum(&image), 0x1235);
    }

    #[test]
    fn test_checksum_ignores_bytes_before_start() {
        let mut image = image_with_tail(&[0x00, 0x05]);
        image[0x100] = 0xFF;
        image[0x1FF] = 0xFF;
        assert_eq!(compute_checksum(&image), 5);
    }

    #[test]
    fn test_checksum_wraps() {
        let image = image_with_tail(&[0xFF, 0xFF, 0x00, 0x02]);
        assert_eq!(compute_checksum(&image), 0x0001);
    }

    #[test]
    fn test_checksum_ignores_trailing_odd_byte() {
        let image = image_with_tail(&[0x00, 0x07, 0x99]);
        assert_eq!(compute_checksum(&image), 7);
    }

    #[test]
    fn test_checksum_of_short_image_is_zero() {
        assert_eq!(compute_checksum(&[0xFF; 0x100]), 0);
    }

    #[test]
    fn test_recompute_writes_header() {
        let layout = RomLayout::default();
        let mut image = image_with_tail(&[0xAB, 0xCD]);

        let checksum = recompute_checksum(&mut image).unwrap();

        assert_eq!(checksum, 0xABCD);
        assert_eq!(&image[0x18E..0x190], &[0xAB, 0xCD]);
        assert_eq!(stored_checksum(&image, &layout).unwrap(), 0xABCD);
        assert!(verify_checksum(&image, &layout).unwrap());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut image = image_with_tail(&[0x01, 0x02, 0x03, 0x04, 0x05]);

        let first = recompute_checksum(&mut image).unwrap();
        let second = recompute_checksum(&mut image).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_verify_detects_mismatch() {
        let layout = RomLayout::default();
        let mut image = image_with_tail(&[0x00, 0x10]);
        recompute_checksum(&mut image).unwrap();

        image[0x201] = 0x11;
        assert!(!verify_checksum(&image, &layout).unwrap());
    }

    #[test]
    fn test_recompute_on_tiny_image_fails() {
        let mut image = vec![0u8; 0x100];
        assert!(recompute_checksum(&mut image).is_err());
    }
}
