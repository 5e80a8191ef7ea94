//! Bounds-checked little-endian field access.
//!
//! Every read names the absolute offset it wants; a read that would run past
//! the end of the buffer is a [`DibError::TruncatedBuffer`], never a panic.

use crate::error::DibError;

/// Borrow `len` bytes starting at `offset`.
pub(crate) fn region(data: &[u8], offset: usize, len: usize) -> Result<&[u8], DibError> {
    let end = offset.checked_add(len).ok_or(DibError::TruncatedBuffer {
        needed: usize::MAX,
        actual: data.len(),
    })?;
    data.get(offset..end).ok_or(DibError::TruncatedBuffer {
        needed: end,
        actual: data.len(),
    })
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], DibError> {
    let mut buf = [0u8; N];
    buf.copy_from_slice(region(data, offset, N)?);
    Ok(buf)
}

pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> Result<u16, DibError> {
    read_array::<2>(data, offset).map(u16::from_le_bytes)
}

pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, DibError> {
    read_array::<4>(data, offset).map(u32::from_le_bytes)
}

pub(crate) fn read_i32_le(data: &[u8], offset: usize) -> Result<i32, DibError> {
    read_array::<4>(data, offset).map(i32::from_le_bytes)
}

/// Bytes in one stored row, rounded up to the 4-byte boundary every DIB
/// row is padded to.
pub(crate) fn padded_row_bytes(width: usize, bits_per_pixel: u16) -> Option<usize> {
    width
        .checked_mul(usize::from(bits_per_pixel))?
        .checked_add(31)
        .map(|bits| bits / 32 * 4)
}
