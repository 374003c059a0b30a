//! Open-addressing dictionary table for LZW coding
//!
//! The encoder locates `(prefix, literal)` pairs by hashing into a fixed table
//! of `TABLE_SIZE` slots. The decoder never hashes: it receives codes in the
//! order the encoder assigned them and stores each entry at the slot whose
//! index equals its code.

use crate::common::{
    try_alloc, Code, CodecError, Result, CODE_BITS, FIRST_CODE, MAX_ASSIGNABLE_CODE,
    SATURATION_CODE, TABLE_SIZE,
};

/// One learned sequence: the sequence for `prefix` followed by `literal`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryEntry {
    /// Code assigned to this sequence
    pub code: Code,
    /// Code of the sequence without its last byte
    pub prefix: Code,
    /// Last byte of the sequence
    pub literal: u8,
}

/// Outcome of [`DictionaryTable::find_or_insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The pair was already known under this code
    Found(Code),
    /// The pair was missing and has been assigned this code
    Learned(Code),
    /// The pair was missing and the table no longer learns
    Saturated,
}

/// Fixed-capacity LZW dictionary
#[derive(Debug)]
pub struct DictionaryTable {
    slots: Box<[Option<DictionaryEntry>]>,
    next_code: Code,
}

impl DictionaryTable {
    /// Create an empty table
    pub fn new() -> Result<Self> {
        let slots = try_alloc(TABLE_SIZE, None)?.into_boxed_slice();
        Ok(Self {
            slots,
            next_code: FIRST_CODE,
        })
    }

    /// Code the next learned entry will receive
    pub fn next_code(&self) -> Code {
        self.next_code
    }

    /// Number of learned entries
    pub fn len(&self) -> usize {
        (self.next_code - FIRST_CODE) as usize
    }

    /// Whether no entries have been learned yet
    pub fn is_empty(&self) -> bool {
        self.next_code == FIRST_CODE
    }

    /// Whether the table has stopped learning
    pub fn is_saturated(&self) -> bool {
        self.next_code > MAX_ASSIGNABLE_CODE
    }

    /// Probe for `(prefix, literal)`, returning the slot holding it or the
    /// empty slot where it belongs
    fn probe(&self, prefix: Code, literal: u8) -> (usize, Option<Code>) {
        let mut slot = ((literal as usize) << (CODE_BITS - 8)) ^ prefix as usize;
        let step = if slot == 0 { 1 } else { TABLE_SIZE - slot };

        // The table never holds more than MAX_DICTIONARY_ENTRIES < TABLE_SIZE
        // entries and the step is coprime with the prime table size, so an
        // empty slot is always reached.
        loop {
            match self.slots[slot] {
                None => return (slot, None),
                Some(entry) if entry.prefix == prefix && entry.literal == literal => {
                    return (slot, Some(entry.code));
                }
                Some(_) => {
                    slot = if step > slot {
                        slot + TABLE_SIZE - step
                    } else {
                        slot - step
                    };
                }
            }
        }
    }

    /// Look up the code for `(prefix, literal)` without learning it
    pub fn search(&self, prefix: Code, literal: u8) -> Option<Code> {
        self.probe(prefix, literal).1
    }

    /// Look up `(prefix, literal)` and learn it under the next code when absent
    pub fn find_or_insert(&mut self, prefix: Code, literal: u8) -> Lookup {
        let (slot, found) = self.probe(prefix, literal);
        if let Some(code) = found {
            return Lookup::Found(code);
        }
        if self.is_saturated() {
            return Lookup::Saturated;
        }

        let code = self.next_code;
        self.slots[slot] = Some(DictionaryEntry {
            code,
            prefix,
            literal,
        });
        self.next_code += 1;
        Lookup::Learned(code)
    }

    /// Store `(prefix, literal)` at the slot indexed by the next code
    ///
    /// Used by the decoder, which learns entries in exactly the order the
    /// encoder assigned them. Returns `None` once the table is saturated.
    pub fn insert_at_code(&mut self, prefix: Code, literal: u8) -> Option<Code> {
        if self.is_saturated() {
            return None;
        }

        let code = self.next_code;
        self.slots[code as usize] = Some(DictionaryEntry {
            code,
            prefix,
            literal,
        });
        self.next_code += 1;
        Some(code)
    }

    /// Expand `code` into the bytes it stands for
    ///
    /// The prefix chain is walked from the last byte to the first, filling
    /// `scratch` from its end towards its start, so the returned suffix of
    /// `scratch` is in forward order. Only valid for tables filled through
    /// [`insert_at_code`](Self::insert_at_code).
    pub fn expand<'s>(&self, code: Code, scratch: &'s mut [u8]) -> Result<&'s [u8]> {
        let mut start = scratch.len();
        let mut current = code;

        while current >= FIRST_CODE {
            let entry = self
                .slots
                .get(current as usize)
                .copied()
                .flatten()
                .filter(|entry| current < SATURATION_CODE && entry.code == current)
                .ok_or(CodecError::InvalidCode {
                    code: current,
                    next_code: self.next_code,
                })?;
            if start <= 1 {
                return Err(CodecError::ChainOverflow(code));
            }
            start -= 1;
            scratch[start] = entry.literal;
            current = entry.prefix;
        }

        if start == 0 {
            return Err(CodecError::ChainOverflow(code));
        }
        start -= 1;
        scratch[start] = current as u8;
        Ok(&scratch[start..])
    }
}
