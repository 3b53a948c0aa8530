//! Bounds-checked big-endian access to a cartridge image.
//!
//! `RomReader` is the read path used by every parser: it wraps an immutable
//! byte slice, offers absolute (`*_at`) reads plus a position-tracking cursor
//! for sequential streams, and reports `Error::OutOfBounds` instead of
//! clamping. `RomWriter` is the matching write surface used only by the
//! lineup encoder, the save patch and the checksum.

use crate::error::{Error, Result};

/// Checks that `offset..offset + size` lies inside a buffer of `len` bytes.
fn check_range(offset: usize, size: usize, len: usize) -> Result<std::ops::Range<usize>> {
    let end = offset
        .checked_add(size)
        .ok_or(Error::OutOfBounds { offset, size, len })?;

    if end > len {
        return Err(Error::OutOfBounds { offset, size, len });
    }

    Ok(offset..end)
}

/// A position-tracking, bounds-checked big-endian reader.
///
/// # Example
///
/// ```
/// use nhl94_core::rom::RomReader;
///
/// let data = [0x12, 0x34, 0x56, 0x78];
/// let mut reader = RomReader::new(&data);
///
/// assert_eq!(reader.read_u16_be_at(2).unwrap(), 0x5678);
/// assert_eq!(reader.read_u32_be().unwrap(), 0x12345678);
/// assert_eq!(reader.position(), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RomReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RomReader<'a> {
    /// Creates a reader positioned at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a reader positioned at `offset`.
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        let mut reader = Self::new(data);
        reader.set_position(offset)?;
        Ok(reader)
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of bytes remaining from the current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Sets the current read position.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is beyond the buffer length.
    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::OutOfBounds {
                offset: pos,
                size: 0,
                len: self.data.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Skips the specified number of bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        let target = self.pos.checked_add(count).ok_or(Error::OutOfBounds {
            offset: self.pos,
            size: count,
            len: self.data.len(),
        })?;
        self.set_position(target)
    }

    /// Returns `len` bytes at `offset` without moving the cursor.
    pub fn read_bytes_at(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let range = check_range(offset, len, self.data.len())?;
        Ok(&self.data[range])
    }

    pub fn read_u8_at(&self, offset: usize) -> Result<u8> {
        let bytes = self.read_bytes_at(offset, 1)?;
        Ok(bytes[0])
    }

    pub fn read_u16_be_at(&self, offset: usize) -> Result<u16> {
        let bytes = self.read_bytes_at(offset, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_be_at(&self, offset: usize) -> Result<u32> {
        let bytes = self.read_bytes_at(offset, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads a fixed-size array at `offset` without moving the cursor.
    pub fn read_array_at<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let bytes = self.read_bytes_at(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads the specified number of bytes and advances the position.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.read_bytes_at(self.pos, count)?;
        self.pos += count;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let value = self.read_u8_at(self.pos)?;
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        let value = self.read_u16_be_at(self.pos)?;
        self.pos += 2;
        Ok(value)
    }

    pub fn read_u32_be(&mut self) -> Result<u32> {
        let value = self.read_u32_be_at(self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let value = self.read_array_at::<N>(self.pos)?;
        self.pos += N;
        Ok(value)
    }
}

/// Bounds-checked big-endian writer over a mutable image.
///
/// Every write validates its full range before touching any byte, so a
/// failed write leaves the image unchanged.
#[derive(Debug)]
pub struct RomWriter<'a> {
    data: &'a mut [u8],
}

impl<'a> RomWriter<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.write_bytes(offset, &[value])
    }

    pub fn write_u16_be(&mut self, offset: usize, value: u16) -> Result<()> {
        self.write_bytes(offset, &value.to_be_bytes())
    }

    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let range = check_range(offset, bytes.len(), self.data.len())?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }
}

/// Splits a byte into its (high, low) nibbles.
pub fn split_byte(byte: u8) -> (u8, u8) {
    (byte >> 4, byte & 0x0F)
}

/// Joins two nibbles into a byte. Only the low four bits of each are used.
pub fn join_nibbles(high: u8, low: u8) -> u8 {
    ((high & 0x0F) << 4) | (low & 0x0F)
}

/// Decodes a binary-coded-decimal byte: `0x93` is 93, not 147.
pub fn decode_bcd(byte: u8) -> u8 {
    let (tens, ones) = split_byte(byte);
    tens * 10 + ones
}

/// Encodes 0..=99 as binary-coded decimal. Values above 99 saturate.
pub fn encode_bcd(value: u8) -> u8 {
    let value = value.min(99);
    join_nibbles(value / 10, value % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_big_endian_at() {
        let data = [0x00, 0x12, 0x34, 0x56, 0x78];
        let reader = RomReader::new(&data);

        assert_eq!(reader.read_u8_at(1).unwrap(), 0x12);
        assert_eq!(reader.read_u16_be_at(1).unwrap(), 0x1234);
        assert_eq!(reader.read_u32_be_at(1).unwrap(), 0x12345678);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_sequential_reads() {
        let data = [
            0x00, 0x05, // u16: 5
            0xAB, // u8
            0x00, 0x0F, 0x79, 0x23, // u32
        ];
        let mut reader = RomReader::new(&data);

        assert_eq!(reader.read_u16_be().unwrap(), 5);
        assert_eq!(reader.read_u8().unwrap(), 0xAB);
        assert_eq!(reader.read_u32_be().unwrap(), 0x000F7923);
        assert_eq!(reader.position(), 7);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_read_past_end_is_out_of_bounds() {
        let data = [0x01, 0x02, 0x03];
        let reader = RomReader::new(&data);

        let err = reader.read_u32_be_at(0).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds {
                offset: 0,
                size: 4,
                len: 3
            }
        ));
        assert!(reader.read_u16_be_at(2).is_err());
        assert!(reader.read_u8_at(3).is_err());
        assert!(reader.read_bytes_at(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_failed_sequential_read_keeps_position() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = RomReader::new(&data);
        reader.skip(2).unwrap();

        assert!(reader.read_u16_be().is_err());
        assert_eq!(reader.position(), 2);
    }

    #[test]
    fn test_set_position_and_skip() {
        let data = [0u8; 4];
        let mut reader = RomReader::new(&data);

        reader.set_position(4).unwrap();
        assert_eq!(reader.remaining(), 0);
        assert!(reader.set_position(5).is_err());
        assert!(reader.skip(1).is_err());
        assert!(RomReader::at(&data, 8).is_err());
    }

    #[test]
    fn test_read_array() {
        let data = [1, 2, 3, 4, 5];
        let mut reader = RomReader::at(&data, 1).unwrap();

        let arr: [u8; 3] = reader.read_array().unwrap();
        assert_eq!(arr, [2, 3, 4]);
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_writer_bounds_checked_before_write() {
        let mut data = [0u8; 4];
        let mut writer = RomWriter::new(&mut data);

        writer.write_u16_be(1, 0xBEEF).unwrap();
        assert!(writer.write_bytes(3, &[0xAA, 0xBB]).is_err());
        assert!(writer.write_u8(4, 0xFF).is_err());
        assert_eq!(data, [0x00, 0xBE, 0xEF, 0x00]);
    }

    #[test]
    fn test_split_and_join_nibbles() {
        assert_eq!(split_byte(0xA7), (0x0A, 0x07));
        assert_eq!(join_nibbles(0x0A, 0x07), 0xA7);
        assert_eq!(join_nibbles(0xFA, 0xF7), 0xA7);
    }

    #[test]
    fn test_decode_bcd() {
        assert_eq!(decode_bcd(0x93), 93);
        assert_eq!(decode_bcd(0x00), 0);
        assert_eq!(decode_bcd(0x99), 99);
        assert_eq!(decode_bcd(0x07), 7);
    }

    #[test]
    fn test_encode_bcd() {
        assert_eq!(encode_bcd(93), 0x93);
        assert_eq!(encode_bcd(0), 0x00);
        assert_eq!(encode_bcd(150), 0x99);
    }
}
