//! LzwReader - Streaming decompression reader
//!
//! Wraps an [`LzwDecoder`] session behind the `Read` trait. The stream is
//! read until it ends cleanly, so it must contain exactly one flushed
//! session.

use super::decoder::LzwDecoder;
use crate::common::{CodecStats, Result};
use std::io::{self, Read};

/// Streaming decompression reader implementing Read trait
#[derive(Debug)]
pub struct LzwReader<R: Read> {
    reader: R,
    decoder: LzwDecoder,
}

impl<R: Read> LzwReader<R> {
    /// Create a new LzwReader
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            reader,
            decoder: LzwDecoder::new()?,
        })
    }

    /// Statistics for the session so far
    pub fn stats(&self) -> &CodecStats {
        self.decoder.stats()
    }

    /// Return the inner reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Read for LzwReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decoder
            .decode_some(&mut self.reader, buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
