//! lzw12-cli - Command-line interface for the lzw12 codecs
//!
//! A command-line tool for compressing and decompressing record files with
//! 12-bit LZW or byte-plane run-length coding. The codec streams carry no
//! framing, so the tool prefixes its files with a small header recording the
//! method and the record layout.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use lzw12::{
    compress_bytes, decompress_bytes, rle_decode_bytes, rle_encode_bytes, Method,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File signature written before every header
const MAGIC: &[u8; 4] = b"LZ12";

/// Header size: magic, method, record size (u16 LE), record count (u64 LE)
const HEADER_LEN: usize = 4 + 1 + 2 + 8;

#[derive(Parser)]
#[command(name = "lzw12-cli")]
#[command(about = "A CLI tool for 12-bit LZW and byte-plane run-length compression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file of fixed-size records
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Compression method
        #[arg(short, long, value_enum, default_value_t = CliMethod::Lzw)]
        method: CliMethod,

        /// Record size in bytes; the input length must be a multiple of it
        #[arg(short, long, default_value_t = 1)]
        record_size: u16,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a file written by `compress`
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliMethod {
    /// 12-bit LZW dictionary coding (default)
    Lzw,
    /// Byte-plane run-length coding
    Rle,
}

impl From<CliMethod> for Method {
    fn from(method: CliMethod) -> Self {
        match method {
            CliMethod::Lzw => Method::Lzw,
            CliMethod::Rle => Method::RunLength,
        }
    }
}

/// Framing written in front of the codec stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileHeader {
    method: Method,
    record_size: u16,
    record_count: u64,
}

impl FileHeader {
    fn to_bytes(self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[..4].copy_from_slice(MAGIC);
        bytes[4] = self.method as u8;
        bytes[5..7].copy_from_slice(&self.record_size.to_le_bytes());
        bytes[7..].copy_from_slice(&self.record_count.to_le_bytes());
        bytes
    }

    fn parse(data: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        if data.len() < HEADER_LEN || &data[..4] != MAGIC {
            return Err("Not an lzw12 file (missing LZ12 header)".into());
        }
        let method = Method::from_u8(data[4])?;
        let record_size = u16::from_le_bytes([data[5], data[6]]);
        let mut count = [0u8; 8];
        count.copy_from_slice(&data[7..HEADER_LEN]);
        Ok(Self {
            method,
            record_size,
            record_count: u64::from_le_bytes(count),
        })
    }

    fn decoded_len(&self) -> Result<usize, Box<dyn std::error::Error>> {
        usize::try_from(self.record_count)?
            .checked_mul(self.record_size as usize)
            .ok_or_else(|| "Record count overflows the address space".into())
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            method,
            record_size,
            force,
        } => compress_file(
            &input,
            &output,
            method.into(),
            record_size,
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check_paths(input: &Path, output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }
    Ok(())
}

/// Progress bar for inputs large enough to be worth watching
fn progress_bar(
    input_size: usize,
    quiet: bool,
    message: &'static str,
) -> Result<Option<ProgressBar>, Box<dyn std::error::Error>> {
    if quiet || input_size <= 1024 * 1024 {
        return Ok(None);
    }
    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb.inc(1);
    Ok(Some(pb))
}

fn compress_file(
    input: &Path,
    output: &Path,
    method: Method,
    record_size: u16,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!("Method: {:?}, Record size: {} bytes", method, record_size);
    }

    let start_time = Instant::now();

    let input_data = fs::read(input)?;
    let input_size = input_data.len();
    if record_size == 0 || input_size % record_size as usize != 0 {
        return Err(format!(
            "Input size {} is not a multiple of the record size {}",
            input_size, record_size
        )
        .into());
    }

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet, "Compressing...")?;

    let payload = match method {
        Method::Lzw => compress_bytes(&input_data),
        Method::RunLength => rle_encode_bytes(&input_data, record_size as usize),
    }
    .map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    let header = FileHeader {
        method,
        record_size,
        record_count: (input_size / record_size as usize) as u64,
    };
    let mut compressed_data = Vec::with_capacity(HEADER_LEN + payload.len());
    compressed_data.extend_from_slice(&header.to_bytes());
    compressed_data.extend_from_slice(&payload);
    fs::write(output, &compressed_data)?;

    let compression_time = start_time.elapsed();
    let output_size = compressed_data.len();
    let compression_ratio = (output_size as f64 / input_size.max(1) as f64) * 100.0;

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", compression_ratio);
        println!("  Time:   {:.2?}", compression_time);

        if compression_ratio > 100.0 {
            println!("  Note: File expanded during compression (common for small/random data)");
        }
    }

    Ok(())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();
    let header = FileHeader::parse(&compressed_data)?;
    let payload = &compressed_data[HEADER_LEN..];

    if verbose {
        println!("Compressed size: {} bytes", input_size);
        println!(
            "Method: {:?}, Records: {} x {} bytes",
            header.method, header.record_count, header.record_size
        );
    }

    let progress = progress_bar(input_size, quiet, "Decompressing...")?;

    let decompressed_data = match header.method {
        Method::Lzw => decompress_bytes(payload, header.decoded_len()?),
        Method::RunLength => rle_decode_bytes(
            payload,
            header.record_size as usize,
            usize::try_from(header.record_count)?,
        ),
    }
    .map_err(|e| format!("Decompression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    fs::write(output, &decompressed_data)?;

    let decompression_time = start_time.elapsed();
    let output_size = decompressed_data.len();
    let compression_ratio = (input_size as f64 / output_size.max(1) as f64) * 100.0;

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", compression_ratio);
        println!("  Time:   {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let file_size = data.len();
    let header = FileHeader::parse(&data)?;

    let method_str = match header.method {
        Method::Lzw => "12-bit LZW",
        Method::RunLength => "Byte-plane run-length",
    };

    println!("lzw12 File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);
    println!("  Method: {} ({})", method_str, header.method as u8);
    println!("  Record Size: {} bytes", header.record_size);
    println!("  Record Count: {}", header.record_count);

    if verbose {
        println!("  Header bytes: {:02x?}", &data[..HEADER_LEN]);
    }

    let payload = &data[HEADER_LEN..];
    let decoded = header.decoded_len().and_then(|len| {
        let result = match header.method {
            Method::Lzw => decompress_bytes(payload, len),
            Method::RunLength => rle_decode_bytes(
                payload,
                header.record_size as usize,
                len / (header.record_size.max(1) as usize),
            ),
        };
        result.map_err(Into::into)
    });

    match decoded {
        Ok(decompressed) => {
            let decompressed_size = decompressed.len();
            let compression_ratio = (file_size as f64 / decompressed_size.max(1) as f64) * 100.0;
            println!("  Decompressed Size: {} bytes", decompressed_size);
            println!("  Compression Ratio: {:.1}%", compression_ratio);
            println!("  Status: ✓ Valid lzw12 file");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted lzw12 file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}
