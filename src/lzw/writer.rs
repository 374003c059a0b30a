//! LzwWriter - Streaming compression writer
//!
//! Wraps an [`LzwEncoder`] session behind the `Write` trait. Every `write`
//! feeds the same session; `finish` flushes it and hands back the inner
//! writer.

use super::encoder::LzwEncoder;
use crate::common::{CodecStats, Result};
use std::io::{self, Write};

/// Streaming compression writer implementing Write trait
#[derive(Debug)]
pub struct LzwWriter<W: Write> {
    writer: Option<W>,
    encoder: LzwEncoder,
}

impl<W: Write> LzwWriter<W> {
    /// Create a new LzwWriter
    pub fn new(writer: W) -> Result<Self> {
        Ok(Self {
            writer: Some(writer),
            encoder: LzwEncoder::new()?,
        })
    }

    /// Statistics for the session so far
    pub fn stats(&self) -> &CodecStats {
        self.encoder.stats()
    }

    /// Flush the session and return the inner writer
    pub fn finish(mut self) -> Result<W> {
        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| io::Error::other("writer already finished"))?;
        self.encoder.flush(&mut writer)?;
        writer.flush()?;
        Ok(writer)
    }
}

impl<W: Write> Write for LzwWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::other("writer already finished"))?;
        self.encoder
            .encode(writer, buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(buf.len())
    }

    /// Flushes the inner writer only; the session stays open
    fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for LzwWriter<W> {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            // Try to finish the session, but ignore errors in drop
            let _ = self.encoder.flush(&mut writer);
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunked_writes_match_single_session() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let data = b"the quick brown fox jumps over the lazy dog, the quick brown fox";

        let mut writer = LzwWriter::new(Vec::new())?;
        for chunk in data.chunks(5) {
            writer.write_all(chunk)?;
        }
        let chunked = writer.finish()?;

        assert_eq!(chunked, crate::compress_bytes(data)?);
        Ok(())
    }

    #[test]
    fn test_drop_finishes_session() {
        let mut output = Vec::new();
        {
            let mut writer = LzwWriter::new(&mut output).unwrap();
            writer.write_all(b"A").unwrap();
        }
        assert_eq!(output, [b'A', 0x00]);
    }
}
