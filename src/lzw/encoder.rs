//! LZW encoder session
//!
//! An encoder session may span many `encode` calls; the dictionary, the open
//! prefix, and the packer's pending nibble all carry over, so a match can
//! continue across buffer boundaries. Nothing is forced out until `flush`.

use super::dictionary::{DictionaryTable, Lookup};
use super::packer::BitPacker;
use crate::common::{Code, CodecError, CodecStats, Result};
use std::io::Write;

/// Lifecycle of a codec session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No bytes seen yet
    Idle,
    /// At least one byte seen and the session is still open
    Streaming,
    /// The session has been flushed and accepts no more input
    Flushed,
    /// A write failed; the stream is incomplete and the session is unusable
    Failed,
}

/// Stateful 12-bit LZW encoder
#[derive(Debug)]
pub struct LzwEncoder {
    table: DictionaryTable,
    packer: BitPacker,
    prefix: Option<Code>,
    flushed: bool,
    failed: bool,
    out_buff: Vec<u8>,
    stats: CodecStats,
}

impl LzwEncoder {
    /// Create a new encoder session
    pub fn new() -> Result<Self> {
        Ok(Self {
            table: DictionaryTable::new()?,
            packer: BitPacker::new(),
            prefix: None,
            flushed: false,
            failed: false,
            out_buff: Vec::new(),
            stats: CodecStats::default(),
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        if self.failed {
            SessionState::Failed
        } else if self.flushed {
            SessionState::Flushed
        } else if self.prefix.is_some() {
            SessionState::Streaming
        } else {
            SessionState::Idle
        }
    }

    /// Number of sequences the dictionary has learned
    pub fn dictionary_len(&self) -> usize {
        self.table.len()
    }

    /// Statistics for this session so far
    pub fn stats(&self) -> &CodecStats {
        &self.stats
    }

    /// Encode `data`, writing every code completed by it
    ///
    /// The sequence still being matched at the end of `data` stays open for
    /// the next call.
    ///
    /// Once a write fails the session is marked failed and every later
    /// `encode` or `flush` returns [`CodecError::SessionFailed`].
    pub fn encode<W: Write>(&mut self, writer: &mut W, data: &[u8]) -> Result<()> {
        if self.failed {
            return Err(CodecError::SessionFailed);
        }
        if self.flushed {
            return Err(CodecError::SessionFinished);
        }

        let mut bytes = data.iter().copied();
        let mut prefix = match self.prefix {
            Some(prefix) => prefix,
            None => match bytes.next() {
                Some(first) => first as Code,
                None => return Ok(()),
            },
        };

        self.out_buff.clear();
        for byte in bytes {
            match self.table.find_or_insert(prefix, byte) {
                Lookup::Found(code) => prefix = code,
                lookup => {
                    self.packer.put(&mut self.out_buff, prefix)?;
                    self.stats.codes += 1;
                    if lookup == Lookup::Saturated && !self.stats.saturated {
                        self.stats.saturated = true;
                        log::debug!(
                            "LZW dictionary saturated after {} input bytes",
                            self.stats.input_bytes
                        );
                    }
                    prefix = byte as Code;
                }
            }
        }
        self.prefix = Some(prefix);

        if let Err(e) = writer.write_all(&self.out_buff) {
            self.failed = true;
            return Err(e.into());
        }
        self.stats.input_bytes += data.len() as u64;
        self.stats.output_bytes += self.out_buff.len() as u64;
        self.stats.dictionary_entries = self.table.len();
        Ok(())
    }

    /// Write the open sequence and any pending nibble, ending the session
    ///
    /// Flushing an already flushed session does nothing.
    pub fn flush<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        if self.failed {
            return Err(CodecError::SessionFailed);
        }
        if self.flushed {
            return Ok(());
        }

        self.out_buff.clear();
        if let Some(prefix) = self.prefix {
            self.packer.put(&mut self.out_buff, prefix)?;
            self.stats.codes += 1;
        }
        self.packer.flush(&mut self.out_buff)?;
        if let Err(e) = writer.write_all(&self.out_buff) {
            self.failed = true;
            return Err(e.into());
        }
        self.stats.output_bytes += self.out_buff.len() as u64;
        self.flushed = true;

        log::debug!(
            "LZW session flushed: {} bytes in, {} bytes out, {} codes, {} dictionary entries",
            self.stats.input_bytes,
            self.stats.output_bytes,
            self.stats.codes,
            self.stats.dictionary_entries
        );
        Ok(())
    }
}
