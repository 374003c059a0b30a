//! Common types and constants for the LZW and run-length codecs
//!
//! This module defines the wire constants, the error type, and the statistics
//! structure shared by the dictionary coder (LZW) and the byte-plane run-length
//! coder.

use std::io::{self, Read};
use thiserror::Error;

/// A 12-bit dictionary code, stored in the low bits of a `u16`
pub type Code = u16;

/// Width of every code on the wire
pub const CODE_BITS: u32 = 12;

/// Number of slots in the dictionary table (prime, greater than the code space)
pub const TABLE_SIZE: usize = 5021;

/// First code assigned to a learned sequence; 0-255 are literal bytes
pub const FIRST_CODE: Code = 256;

/// Code reserved as the "table full" marker; never assigned or emitted
pub const SATURATION_CODE: Code = (1 << CODE_BITS) - 1; // 4095

/// Highest code the dictionary will ever assign
pub const MAX_ASSIGNABLE_CODE: Code = SATURATION_CODE - 1; // 4094

/// Maximum number of learned entries before the dictionary freezes
pub const MAX_DICTIONARY_ENTRIES: usize = (SATURATION_CODE - FIRST_CODE) as usize;

/// Longest run a single run-length token can describe
pub const MAX_RUN_LENGTH: usize = 255;

/// Compression method, as selected by callers that frame their own streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// 12-bit LZW dictionary coding
    Lzw = 0,
    /// Byte-plane run-length coding
    RunLength = 1,
}

impl Method {
    /// Create a Method from a raw value
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Method::Lzw),
            1 => Ok(Method::RunLength),
            _ => Err(CodecError::InvalidMethod(value)),
        }
    }
}

/// Error type for codec operations
#[derive(Debug, Error)]
pub enum CodecError {
    /// Invalid method value
    #[error("Invalid compression method: {0}")]
    InvalidMethod(u8),

    /// A code that is neither a literal nor present in the dictionary
    #[error("Invalid code {code} (next assignable code is {next_code})")]
    InvalidCode {
        /// Code read from the stream
        code: Code,
        /// Dictionary's next code when the invalid code was read
        next_code: Code,
    },

    /// The first code of a session must be a literal byte
    #[error("Invalid first code {0}: a session must start with a literal byte")]
    InvalidFirstCode(Code),

    /// A prefix chain longer than the expansion buffer
    #[error("Prefix chain for code {0} exceeds the table capacity")]
    ChainOverflow(Code),

    /// Encode called after the session was flushed
    #[error("Encoder session already flushed")]
    SessionFinished,

    /// A write failed part way through, leaving the session's output incomplete
    #[error("Encoder session failed after an earlier write error")]
    SessionFailed,

    /// Record size of zero
    #[error("Invalid record size: {0}")]
    InvalidRecordSize(usize),

    /// Buffer length is not a whole number of records
    #[error("Buffer of {len} bytes is not a multiple of the record size {record_size}")]
    MisalignedBuffer {
        /// Buffer length in bytes
        len: usize,
        /// Record size in bytes
        record_size: usize,
    },

    /// A run-length token that runs past the end of its plane
    #[error("Run of {run} bytes exceeds the {remaining} bytes left in the plane")]
    RunOverflow {
        /// Decoded run length
        run: usize,
        /// Bytes remaining in the plane
        remaining: usize,
    },

    /// Unexpected end of input
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Buffer or table allocation failure
    #[error("Failed to allocate {requested} bytes")]
    Allocation {
        /// Requested size in bytes
        requested: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Statistics for an encode or decode session
#[derive(Debug, Default, Clone)]
pub struct CodecStats {
    /// Uncompressed bytes consumed (encode) or produced (decode)
    pub input_bytes: u64,
    /// Compressed bytes written (encode) or read (decode)
    pub output_bytes: u64,
    /// Number of 12-bit codes written or read
    pub codes: u64,
    /// Entries learned by the dictionary
    pub dictionary_entries: usize,
    /// Whether the dictionary stopped learning
    pub saturated: bool,
}

impl CodecStats {
    /// Compressed size as a fraction of the uncompressed size
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Allocate a zeroed buffer, reporting failure instead of aborting
pub(crate) fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| CodecError::Allocation {
            requested: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Read one byte, returning `None` on a clean end of stream
pub(crate) fn read_byte<R: Read>(reader: &mut R) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    match reader.read_exact(&mut byte) {
        Ok(()) => Ok(Some(byte[0])),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read one byte that the format requires to be present
pub(crate) fn read_required<R: Read>(reader: &mut R) -> Result<u8> {
    read_byte(reader)?.ok_or(CodecError::UnexpectedEof)
}

/// Check that `len` bytes split into whole records of `record_size`
pub(crate) fn check_records(len: usize, record_size: usize) -> Result<()> {
    if record_size == 0 {
        return Err(CodecError::InvalidRecordSize(record_size));
    }
    if len % record_size != 0 {
        return Err(CodecError::MisalignedBuffer { len, record_size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_method() {
        assert_eq!(Method::from_u8(0).unwrap(), Method::Lzw);
        assert_eq!(Method::from_u8(1).unwrap(), Method::RunLength);
        assert!(matches!(
            Method::from_u8(2),
            Err(CodecError::InvalidMethod(2))
        ));
    }

    #[test]
    fn test_constants() {
        assert_eq!(SATURATION_CODE, 4095);
        assert_eq!(MAX_ASSIGNABLE_CODE, 4094);
        assert_eq!(MAX_DICTIONARY_ENTRIES, 3839);
        assert!(TABLE_SIZE > 1 << CODE_BITS);
    }

    #[test]
    fn test_read_byte() {
        let mut cursor = Cursor::new(vec![7u8]);
        assert_eq!(read_byte(&mut cursor).unwrap(), Some(7));
        assert_eq!(read_byte(&mut cursor).unwrap(), None);
        assert!(matches!(
            read_required(&mut cursor),
            Err(CodecError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_check_records() {
        assert!(check_records(12, 4).is_ok());
        assert!(check_records(0, 4).is_ok());
        assert!(matches!(
            check_records(4, 0),
            Err(CodecError::InvalidRecordSize(0))
        ));
        assert!(matches!(
            check_records(10, 4),
            Err(CodecError::MisalignedBuffer {
                len: 10,
                record_size: 4
            })
        ));
    }

    #[test]
    fn test_compression_ratio() {
        let mut stats = CodecStats::default();
        assert_eq!(stats.compression_ratio(), 0.0);
        stats.input_bytes = 200;
        stats.output_bytes = 50;
        assert!((stats.compression_ratio() - 0.25).abs() < f64::EPSILON);
    }
}
