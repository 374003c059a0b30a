//! 12-bit LZW dictionary coding
//!
//! Codes are 12 bits wide and packed two to three bytes. Codes 0-255 stand
//! for literal bytes; learned sequences take codes 256-4094 in the order they
//! are first seen, after which the dictionary freezes. There is no header and
//! no end marker: the caller frames the stream and knows how many bytes it
//! decodes to.

mod decoder;
mod dictionary;
mod encoder;
mod packer;
mod reader;
mod writer;

pub use decoder::LzwDecoder;
pub use dictionary::{DictionaryEntry, DictionaryTable, Lookup};
pub use encoder::{LzwEncoder, SessionState};
pub use packer::BitPacker;
pub use reader::LzwReader;
pub use writer::LzwWriter;

use crate::common::{try_alloc, Result};
use std::io::Cursor;

/// Compress `data` as a single flushed session
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(data.len() / 2 + 2);
    let mut encoder = LzwEncoder::new()?;
    encoder.encode(&mut output, data)?;
    encoder.flush(&mut output)?;
    Ok(output)
}

/// Decompress a single session that decodes to exactly `len` bytes
pub fn decompress_bytes(data: &[u8], len: usize) -> Result<Vec<u8>> {
    let mut output = try_alloc(len, 0u8)?;
    let mut decoder = LzwDecoder::new()?;
    decoder.decode(&mut Cursor::new(data), &mut output)?;
    Ok(output)
}
