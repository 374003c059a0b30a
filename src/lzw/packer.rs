//! 12-bit code packing
//!
//! Two codes share three bytes. With `c1` and `c2` written in that order the
//! layout is:
//!
//! ```text
//! byte 0: c1 bits 0-7
//! byte 1: c2 bits 8-11 (high nibble) | c1 bits 8-11 (low nibble)
//! byte 2: c2 bits 0-7
//! ```
//!
//! After an odd number of codes one nibble is left pending; [`BitPacker::flush`]
//! writes it out as a final byte.

use crate::common::{read_byte, read_required, Code, CodecError, Result};
use std::io::{Read, Write};

/// Packs and unpacks 12-bit codes, carrying one nibble between calls
#[derive(Debug, Default, Clone)]
pub struct BitPacker {
    pending: Option<u8>,
}

impl BitPacker {
    /// Create a packer with no pending nibble
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether half of a byte is waiting to be written or combined
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Write one code, returning the number of bytes emitted
    pub fn put<W: Write>(&mut self, writer: &mut W, code: Code) -> Result<usize> {
        match self.pending.take() {
            None => {
                writer.write_all(&[(code & 0xFF) as u8])?;
                self.pending = Some(((code >> 8) & 0x0F) as u8);
                Ok(1)
            }
            Some(nibble) => {
                let shared = (((code >> 4) & 0xF0) as u8) | nibble;
                writer.write_all(&[shared, (code & 0xFF) as u8])?;
                Ok(2)
            }
        }
    }

    /// Write out a pending nibble, returning the number of bytes emitted
    pub fn flush<W: Write>(&mut self, writer: &mut W) -> Result<usize> {
        match self.pending.take() {
            Some(nibble) => {
                writer.write_all(&[nibble])?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    /// Read one code
    ///
    /// Returns `Ok(None)` when the stream ends on a code boundary, or right
    /// after the padding byte written by [`flush`](Self::flush).
    pub fn get<R: Read>(&mut self, reader: &mut R) -> Result<Option<Code>> {
        match self.pending.take() {
            None => {
                let Some(low) = read_byte(reader)? else {
                    return Ok(None);
                };
                let shared = read_required(reader)?;
                self.pending = Some(shared >> 4);
                Ok(Some(low as Code | ((shared & 0x0F) as Code) << 8))
            }
            Some(nibble) => match read_byte(reader)? {
                Some(low) => Ok(Some(low as Code | (nibble as Code) << 8)),
                // Flush padding leaves a zero nibble behind
                None if nibble == 0 => Ok(None),
                None => Err(CodecError::UnexpectedEof),
            },
        }
    }
}
