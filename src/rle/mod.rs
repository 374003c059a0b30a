//! Byte-plane run-length coding
//!
//! A buffer of fixed-size records is split into planes, one per byte offset
//! within a record, and each plane is run-length coded on its own. Grouping
//! bytes this way lines up structurally similar bytes (the high bytes of
//! small integers, for instance) so they form long runs.
//!
//! Token format within a plane:
//!
//! - a single byte `b` is a run of one;
//! - `b b n` is a run of `n + 2` copies of `b`, for runs of 2 to 255.
//!
//! Planes carry no length prefix; the decoder is told the record count.

mod decoder;
mod encoder;

pub use decoder::{decode_plane, decode_planes};
pub use encoder::{encode_plane, encode_planes};

use crate::common::{check_records, try_alloc, CodecError, Result};
use std::io::Cursor;

/// Run-length encode a buffer of `record_size`-byte records
pub fn encode_bytes(data: &[u8], record_size: usize) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    encode_planes(&mut output, data, record_size)?;
    Ok(output)
}

/// Decode `record_count` records of `record_size` bytes
pub fn decode_bytes(data: &[u8], record_size: usize, record_count: usize) -> Result<Vec<u8>> {
    let len = record_size
        .checked_mul(record_count)
        .ok_or(CodecError::Allocation {
            requested: usize::MAX,
        })?;
    check_records(len, record_size)?;
    let mut output = try_alloc(len, 0u8)?;
    decode_planes(&mut Cursor::new(data), &mut output, record_size)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bytes_rejects_overflowing_layout() {
        for (record_size, record_count) in [(2, usize::MAX), (3, usize::MAX / 2), (usize::MAX, 2)] {
            assert!(matches!(
                decode_bytes(&[], record_size, record_count),
                Err(CodecError::Allocation {
                    requested: usize::MAX
                })
            ));
        }
    }

    #[test]
    fn test_decode_bytes_zero_records() {
        assert!(decode_bytes(&[], 4, 0).unwrap().is_empty());
    }
}
