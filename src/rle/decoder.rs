//! Byte-plane run-length decoding

use crate::common::{check_records, read_required, CodecError, Result};
use std::io::Read;

/// Decode one plane of `len` bytes into `out`
///
/// A byte repeated twice opens a run whose third byte adds to the two copies
/// already seen. A lookahead is only taken while at least two bytes of the
/// plane remain, so decoding never reads past the plane's last token.
pub fn decode_plane<'a, R, I>(reader: &mut R, len: usize, out: I) -> Result<()>
where
    R: Read,
    I: IntoIterator<Item = &'a mut u8>,
{
    let mut slots = out.into_iter().take(len);
    let mut count = 0usize;
    let mut held = None;

    while count < len {
        let byte = match held.take() {
            Some(byte) => byte,
            None => read_required(reader)?,
        };

        let remaining = len - count;
        let mut run = 1;
        if remaining >= 2 {
            let next = read_required(reader)?;
            if next == byte {
                run = 2 + read_required(reader)? as usize;
                if run > remaining {
                    return Err(CodecError::RunOverflow { run, remaining });
                }
            } else {
                held = Some(next);
            }
        }

        for slot in slots.by_ref().take(run) {
            *slot = byte;
        }
        count += run;
    }
    Ok(())
}

/// Decode `record_size` byte planes into `out`
///
/// `out.len()` fixes the record count and so the length of every plane.
pub fn decode_planes<R: Read>(reader: &mut R, out: &mut [u8], record_size: usize) -> Result<()> {
    check_records(out.len(), record_size)?;
    if out.is_empty() {
        return Ok(());
    }

    let plane_len = out.len() / record_size;
    for offset in 0..record_size {
        let plane = out[offset..].iter_mut().step_by(record_size);
        decode_plane(reader, plane_len, plane)?;
        log::trace!("RLE plane {} decoded ({} bytes)", offset, plane_len);
    }
    Ok(())
}
