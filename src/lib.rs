//! lzw12 - 12-bit LZW and byte-plane run-length codecs
//!
//! This crate provides two lossless codecs for arrays of fixed-width records:
//!
//! - **LZW** - a dictionary coder with 12-bit codes packed two to three bytes.
//!   The dictionary is a fixed open-addressing table that learns up to 3839
//!   sequences and then freezes. Encoder and decoder sessions keep their state
//!   across calls, so one stream can be written and read in several pieces.
//! - **Run-length** - each byte offset of the record is coded as its own plane,
//!   so similar bytes from neighbouring records form runs.
//!
//! Neither stream carries a header or a length; the caller frames them.
//!
//! # Example - LZW
//!
//! ```
//! use lzw12::{compress_bytes, decompress_bytes};
//!
//! let data = b"ABABABABABABABAB";
//! let compressed = compress_bytes(data)?;
//! let restored = decompress_bytes(&compressed, data.len())?;
//! assert_eq!(&restored[..], &data[..]);
//! # Ok::<(), lzw12::CodecError>(())
//! ```
//!
//! # Example - Session across several buffers
//!
//! ```
//! use lzw12::{LzwDecoder, LzwEncoder};
//! use std::io::Cursor;
//!
//! let mut stream = Vec::new();
//! let mut encoder = LzwEncoder::new()?;
//! encoder.encode(&mut stream, b"first record block")?;
//! encoder.encode(&mut stream, b"second record block")?;
//! encoder.flush(&mut stream)?;
//!
//! let mut decoder = LzwDecoder::new()?;
//! let mut reader = Cursor::new(stream);
//! let mut first = [0u8; 18];
//! let mut second = [0u8; 19];
//! decoder.decode(&mut reader, &mut first)?;
//! decoder.decode(&mut reader, &mut second)?;
//! assert_eq!(&first, b"first record block");
//! assert_eq!(&second, b"second record block");
//! # Ok::<(), lzw12::CodecError>(())
//! ```
//!
//! # Example - Run-length
//!
//! ```
//! use lzw12::{rle_decode_bytes, rle_encode_bytes};
//!
//! // Four little-endian u16 records
//! let records = [1u8, 0, 2, 0, 3, 0, 4, 0];
//! let encoded = rle_encode_bytes(&records, 2)?;
//! assert_eq!(encoded, [1, 2, 3, 4, 0, 0, 2]);
//! assert_eq!(rle_decode_bytes(&encoded, 2, 4)?, records);
//! # Ok::<(), lzw12::CodecError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod error;
pub mod lzw;
pub mod rle;

// Re-export commonly used types
pub use common::{
    Code, CodecError, CodecStats, Method, Result, CODE_BITS, FIRST_CODE, MAX_ASSIGNABLE_CODE,
    MAX_DICTIONARY_ENTRIES, MAX_RUN_LENGTH, SATURATION_CODE, TABLE_SIZE,
};
pub use lzw::{BitPacker, DictionaryTable, LzwDecoder, LzwEncoder, LzwReader, LzwWriter};

// Convenience functions

/// Compress data with 12-bit LZW as a single flushed session
///
/// # Arguments
/// * `data` - The data to compress
///
/// # Returns
/// A vector containing the packed code stream
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    lzw::compress_bytes(data)
}

/// Decompress a single LZW session
///
/// # Arguments
/// * `data` - The packed code stream
/// * `len` - Number of bytes the stream decodes to
///
/// # Returns
/// A vector of exactly `len` decoded bytes
pub fn decompress_bytes(data: &[u8], len: usize) -> Result<Vec<u8>> {
    lzw::decompress_bytes(data, len)
}

/// Run-length encode an array of `record_size`-byte records plane by plane
pub fn rle_encode_bytes(data: &[u8], record_size: usize) -> Result<Vec<u8>> {
    rle::encode_bytes(data, record_size)
}

/// Decode `record_count` run-length coded records of `record_size` bytes
pub fn rle_decode_bytes(data: &[u8], record_size: usize, record_count: usize) -> Result<Vec<u8>> {
    rle::decode_bytes(data, record_size, record_count)
}
