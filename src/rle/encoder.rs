//! Byte-plane run-length encoding

use crate::common::{check_records, Result, MAX_RUN_LENGTH};
use std::io::Write;

/// Split a run into token lengths of at most `MAX_RUN_LENGTH`
///
/// A chunk that would leave exactly one byte behind is shortened by one, so a
/// single-byte token never follows a run of the same byte.
fn next_chunk(remaining: usize) -> usize {
    if remaining <= MAX_RUN_LENGTH {
        remaining
    } else if remaining - MAX_RUN_LENGTH == 1 {
        MAX_RUN_LENGTH - 1
    } else {
        MAX_RUN_LENGTH
    }
}

/// Encode one plane, appending its tokens to `out`
pub fn encode_plane<I>(plane: I, out: &mut Vec<u8>)
where
    I: IntoIterator<Item = u8>,
{
    let mut bytes = plane.into_iter().peekable();
    while let Some(byte) = bytes.next() {
        let mut run = 1usize;
        while bytes.next_if_eq(&byte).is_some() {
            run += 1;
        }

        while run > 0 {
            let chunk = next_chunk(run);
            if chunk == 1 {
                out.push(byte);
            } else {
                out.extend_from_slice(&[byte, byte, (chunk - 2) as u8]);
            }
            run -= chunk;
        }
    }
}

/// Encode `data` as `record_size` byte planes, returning the bytes written
///
/// Plane `i` holds byte `i` of every record; planes are written in order with
/// no separators, so the decoder needs the record count.
pub fn encode_planes<W: Write>(writer: &mut W, data: &[u8], record_size: usize) -> Result<usize> {
    check_records(data.len(), record_size)?;

    let mut out = Vec::with_capacity(data.len());
    for offset in 0..record_size {
        let start = out.len();
        let plane = data.iter().skip(offset).step_by(record_size).copied();
        encode_plane(plane, &mut out);
        log::trace!(
            "RLE plane {}: {} bytes -> {} bytes",
            offset,
            data.len() / record_size,
            out.len() - start
        );
    }

    writer.write_all(&out)?;
    Ok(out.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        encode_plane(bytes.iter().copied(), &mut out);
        out
    }

    #[test]
    fn test_literals_and_runs() {
        assert_eq!(encode(b"AAAAAAAA"), [b'A', b'A', 6]);
        assert_eq!(encode(b"ABC"), *b"ABC");
        assert_eq!(encode(b"AAB"), [b'A', b'A', 0, b'B']);
        assert!(encode(b"").is_empty());
    }

    #[test]
    fn test_chunking() {
        assert_eq!(next_chunk(255), 255);
        assert_eq!(next_chunk(256), 254);
        assert_eq!(next_chunk(257), 255);
        assert_eq!(encode(&[7u8; 255]), [7, 7, 253]);
        assert_eq!(encode(&[7u8; 256]), [7, 7, 252, 7, 7, 0]);
        assert_eq!(encode(&[7u8; 510]), [7, 7, 253, 7, 7, 253]);
    }

    #[test]
    fn test_planes_are_contiguous() {
        // Two 2-byte records: planes [1, 1] and [0, 0]
        let mut out = Vec::new();
        let written = encode_planes(&mut out, &[1, 0, 1, 0], 2).unwrap();
        assert_eq!(written, 6);
        assert_eq!(out, [1, 1, 0, 0, 0, 0]);
    }
}
