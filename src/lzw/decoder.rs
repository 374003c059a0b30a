//! LZW decoder session
//!
//! The decoder rebuilds the encoder's dictionary one code behind it. Each
//! code read (after the first) completes the entry the encoder learned when
//! it wrote the previous code: the previous code as prefix, the first byte of
//! the current expansion as literal.

use super::dictionary::DictionaryTable;
use super::packer::BitPacker;
use crate::common::{
    try_alloc, Code, CodecError, CodecStats, Result, FIRST_CODE, MAX_ASSIGNABLE_CODE, TABLE_SIZE,
};
use std::io::Read;

/// Stateful 12-bit LZW decoder
#[derive(Debug)]
pub struct LzwDecoder {
    table: DictionaryTable,
    packer: BitPacker,
    prefix: Option<Code>,
    /// Expansion of the most recent code
    current: Vec<u8>,
    /// Bytes of `current` already handed out
    consumed: usize,
    scratch: Box<[u8]>,
    finished: bool,
    stats: CodecStats,
}

impl LzwDecoder {
    /// Create a new decoder session
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: DictionaryTable::new()?,
            packer: BitPacker::new(),
            prefix: None,
            current: Vec::new(),
            consumed: 0,
            scratch: try_alloc(TABLE_SIZE, 0u8)?.into_boxed_slice(),
            finished: false,
            stats: CodecStats::default(),
        })
    }

    /// Number of sequences the dictionary has learned
    pub fn dictionary_len(&self) -> usize {
        self.table.len()
    }

    /// Statistics for this session so far
    pub fn stats(&self) -> &CodecStats {
        &self.stats
    }

    /// Read the next code and expand it into `self.current`
    ///
    /// Returns `false` once the stream has ended cleanly.
    fn next_string<R: Read>(&mut self, reader: &mut R) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }

        let Some(code) = self.packer.get(reader)? else {
            self.finished = true;
            log::debug!(
                "LZW stream ended: {} codes, {} bytes decoded, {} dictionary entries",
                self.stats.codes,
                self.stats.input_bytes,
                self.table.len()
            );
            return Ok(false);
        };
        self.stats.codes += 1;
        // Three bytes carry two codes
        self.stats.output_bytes = (self.stats.codes * 3).div_ceil(2);

        match self.prefix {
            None => {
                if code >= FIRST_CODE {
                    return Err(CodecError::InvalidFirstCode(code));
                }
                self.current.clear();
                self.current.push(code as u8);
            }
            Some(prefix) => {
                let next_code = self.table.next_code();
                if code < next_code {
                    let expanded = self.table.expand(code, &mut self.scratch)?;
                    let first = expanded[0];
                    self.current.clear();
                    self.current.extend_from_slice(expanded);
                    self.learn(prefix, first);
                } else if code == next_code && code <= MAX_ASSIGNABLE_CODE {
                    // The code being defined by this very step: previous
                    // expansion followed by its own first byte
                    let first = self.current[0];
                    self.current.push(first);
                    self.learn(prefix, first);
                } else {
                    return Err(CodecError::InvalidCode { code, next_code });
                }
            }
        }

        self.prefix = Some(code);
        self.consumed = 0;
        self.stats.input_bytes += self.current.len() as u64;
        Ok(true)
    }

    fn learn(&mut self, prefix: Code, literal: u8) {
        if self.table.insert_at_code(prefix, literal).is_none() && !self.stats.saturated {
            self.stats.saturated = true;
            log::debug!(
                "LZW dictionary saturated after {} output bytes",
                self.stats.input_bytes
            );
        }
        self.stats.dictionary_entries = self.table.len();
    }

    /// Copy already expanded but not yet returned bytes into `out`
    fn drain_into(&mut self, out: &mut [u8]) -> usize {
        let available = &self.current[self.consumed..];
        let n = available.len().min(out.len());
        out[..n].copy_from_slice(&available[..n]);
        self.consumed += n;
        n
    }

    /// Fill `out` with exactly `out.len()` decoded bytes
    ///
    /// A code whose expansion runs past the end of `out` is kept, and its
    /// remaining bytes start the next call.
    pub fn decode<R: Read>(&mut self, reader: &mut R, out: &mut [u8]) -> Result<()> {
        let mut filled = self.drain_into(out);
        while filled < out.len() {
            if !self.next_string(reader)? {
                return Err(CodecError::UnexpectedEof);
            }
            filled += self.drain_into(&mut out[filled..]);
        }
        Ok(())
    }

    /// Decode up to `out.len()` bytes, stopping early at the end of the stream
    pub fn decode_some<R: Read>(&mut self, reader: &mut R, out: &mut [u8]) -> Result<usize> {
        let mut filled = self.drain_into(out);
        while filled < out.len() && self.next_string(reader)? {
            filled += self.drain_into(&mut out[filled..]);
        }
        Ok(filled)
    }

    /// Decode everything left in a flushed stream, appending it to `out`
    pub fn decode_to_end<R: Read>(&mut self, reader: &mut R, out: &mut Vec<u8>) -> Result<usize> {
        let start = out.len();
        out.extend_from_slice(&self.current[self.consumed..]);
        self.consumed = self.current.len();
        while self.next_string(reader)? {
            out.extend_from_slice(&self.current);
            self.consumed = self.current.len();
        }
        Ok(out.len() - start)
    }
}
