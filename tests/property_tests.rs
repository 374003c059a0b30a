//! Property-based tests for the lzw12 codecs
//!
//! These tests use randomized inputs to verify correctness across a wide range
//! of data patterns and edge cases.

use lzw12::{
    compress_bytes, decompress_bytes, rle_decode_bytes, rle_encode_bytes, LzwDecoder, LzwEncoder,
    MAX_DICTIONARY_ENTRIES,
};
use proptest::prelude::*;
use std::io::Cursor;

proptest! {
    #[test]
    fn test_decompression_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..1000),
        len in 0..4000usize
    ) {
        // Random data is rarely a valid stream, but it must only ever
        // produce errors, never panics
        let _ = decompress_bytes(&data, len);
    }
}

proptest! {
    #[test]
    fn test_rle_decoding_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..300),
        record_size in 1..8usize,
        record_count in 0..100usize
    ) {
        let _ = rle_decode_bytes(&data, record_size, record_count);
    }
}

proptest! {
    #[test]
    fn test_lzw_round_trip(data in prop::collection::vec(any::<u8>(), 1..4000)) {
        let compressed = compress_bytes(&data)?;
        let decompressed = decompress_bytes(&compressed, data.len())?;
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}

proptest! {
    #[test]
    fn test_lzw_repetitive_patterns(
        pattern in prop::collection::vec(any::<u8>(), 1..20),
        repeat_count in 2..200usize
    ) {
        let mut data = Vec::new();
        for _ in 0..repeat_count {
            data.extend_from_slice(&pattern);
        }

        let compressed = compress_bytes(&data)?;
        let decompressed = decompress_bytes(&compressed, data.len())?;
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}

proptest! {
    #[test]
    fn test_lzw_small_alphabet(data in prop::collection::vec(0u8..3, 1..5000)) {
        // Few distinct bytes produce long chains and frequent
        // self-referential codes
        let compressed = compress_bytes(&data)?;
        let decompressed = decompress_bytes(&compressed, data.len())?;
        prop_assert_eq!(&data[..], &decompressed[..]);
    }
}

proptest! {
    #[test]
    fn test_lzw_split_sessions(
        data in prop::collection::vec(0u8..8, 1..3000),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6)
    ) {
        // Encode and decode in independently chosen pieces
        let mut bounds: Vec<usize> = cuts.iter().map(|c| c.index(data.len() + 1)).collect();
        bounds.push(0);
        bounds.push(data.len());
        bounds.sort_unstable();

        let mut stream = Vec::new();
        let mut encoder = LzwEncoder::new()?;
        for window in bounds.windows(2) {
            encoder.encode(&mut stream, &data[window[0]..window[1]])?;
        }
        encoder.flush(&mut stream)?;
        prop_assert!(encoder.dictionary_len() <= MAX_DICTIONARY_ENTRIES);
        prop_assert_eq!(&stream, &compress_bytes(&data)?);

        let mut decoder = LzwDecoder::new()?;
        let mut reader = Cursor::new(stream);
        let mut decoded = Vec::new();
        // Piece sizes in reverse, so read boundaries differ from write boundaries
        for window in bounds.windows(2).rev() {
            let mut piece = vec![0u8; window[1] - window[0]];
            decoder.decode(&mut reader, &mut piece)?;
            decoded.extend_from_slice(&piece);
        }
        prop_assert_eq!(&data[..], &decoded[..]);
    }
}

proptest! {
    #[test]
    fn test_compression_deterministic(data in prop::collection::vec(any::<u8>(), 10..100)) {
        // Same input should always produce same output
        prop_assert_eq!(compress_bytes(&data)?, compress_bytes(&data)?);
    }
}

proptest! {
    #[test]
    fn test_rle_round_trip(
        data in prop::collection::vec(prop_oneof![Just(0u8), Just(1u8), any::<u8>()], 0..2000),
        record_size in 1..6usize
    ) {
        let whole = data.len() - data.len() % record_size;
        let records = &data[..whole];

        let encoded = rle_encode_bytes(records, record_size)?;
        let decoded = rle_decode_bytes(&encoded, record_size, whole / record_size)?;
        prop_assert_eq!(records, &decoded[..]);
    }
}

proptest! {
    #[test]
    fn test_rle_single_byte_runs(byte_value in any::<u8>(), size in 1..2000usize) {
        let data = vec![byte_value; size];
        let encoded = rle_encode_bytes(&data, 1)?;

        // At most one three-byte token per 255 bytes, plus one for a split
        prop_assert!(encoded.len() <= 3 * (size / 255 + 1));
        prop_assert_eq!(rle_decode_bytes(&encoded, 1, size)?, data);
    }
}
