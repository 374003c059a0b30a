use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use lzw12::{compress_bytes, rle_encode_bytes, LzwEncoder};
use std::hint::black_box;
use std::time::Duration;

fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            // Generate Lorem ipsum style text data
            let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(base);
            }
            data.truncate(size);
            data
        }
        "binary" => {
            // Generate binary data with some patterns
            (0..size).map(|i| ((i * 17 + 11) % 256) as u8).collect()
        }
        "repetitive" => {
            // Highly repetitive data that compresses well
            let pattern = b"ABCDEFGHIJ";
            let mut data = Vec::with_capacity(size);
            while data.len() < size {
                data.extend_from_slice(pattern);
            }
            data.truncate(size);
            data
        }
        "random" => {
            // Pseudo-random data that compresses poorly and saturates the dictionary beyond a few KB
            let mut state = 0x2545_f491u32;
            (0..size)
                .map(|_| {
                    state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                    (state >> 24) as u8
                })
                .collect()
        }
        _ => panic!("Unknown pattern: {}", pattern),
    }
}

fn compression_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_throughput");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(100);

    for size in [1024, 10240, 102400, 1048576].iter() {
        let size_label = match *size {
            1024 => "1KB",
            10240 => "10KB",
            102400 => "100KB",
            1048576 => "1MB",
            _ => "unknown",
        };

        for pattern in ["text", "binary", "repetitive", "random"].iter() {
            let data = generate_test_data(*size, pattern);

            group.throughput(Throughput::Bytes(*size as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("lzw/{}/{}", size_label, pattern)),
                &data,
                |b, data| {
                    b.iter(|| compress_bytes(black_box(data)).expect("Compression failed"));
                },
            );
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("rle/{}/{}", size_label, pattern)),
                &data,
                |b, data| {
                    b.iter(|| rle_encode_bytes(black_box(data), 1).expect("Encoding failed"));
                },
            );
        }
    }

    group.finish();
}

fn compression_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_ratio");
    group.measurement_time(Duration::from_secs(5));

    for size in [10240, 102400] {
        for pattern in ["text", "binary", "repetitive", "random"].iter() {
            let data = generate_test_data(size, pattern);

            let benchmark_id = BenchmarkId::from_parameter(format!("{}/{}", size, pattern));
            group.bench_with_input(benchmark_id, &data, |b, data| {
                b.iter_batched(
                    || data.clone(),
                    |data| {
                        let compressed =
                            compress_bytes(black_box(&data)).expect("Compression failed");
                        let ratio = compressed.len() as f64 / data.len() as f64;
                        black_box(ratio)
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

fn chunked_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunked_session");
    group.measurement_time(Duration::from_secs(10));

    // One session fed in record-sized chunks, as a container writing arrays would
    let data = generate_test_data(1048576, "text");
    for chunk_size in [64usize, 4096, 65536] {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut output = Vec::new();
                    let mut encoder = LzwEncoder::new().expect("Encoder allocation failed");
                    for chunk in data.chunks(chunk_size) {
                        encoder
                            .encode(&mut output, black_box(chunk))
                            .expect("Compression failed");
                    }
                    encoder.flush(&mut output).expect("Flush failed");
                    output
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    compression_throughput,
    compression_ratio,
    chunked_session
);
criterion_main!(benches);
