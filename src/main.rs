//! `sfcat`: concatenate files or standard input through buffered stdio handles
//!
//! Usage:
//!   sfcat [OPTIONS] [FILE]...
//!
//! Inputs are drained in fixed-size chunks (or line by line with `--lines`)
//! until end-of-stream and written to standard output, or to `--output`.

use anyhow::{Context, Result};
use clap::Parser;
use std::ops::DerefMut;
use stdio_file::cli::{Args, STDIN_MARKER};
use stdio_file::{open, stdin, stdout, File};
use tracing::{debug, info};

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    stdio_file::standard::init();

    let total = match args.output_path() {
        Some(path) => {
            let mut out = open(path, args.output_mode(), args.io.buffering)
                .with_context(|| format!("Failed to open output {}", path.display()))?;
            let total = copy_inputs(&args, &mut out)?;
            out.close()
                .with_context(|| format!("Failed to close output {}", path.display()))?;
            total
        }
        None => {
            let mut out = stdout().lock();
            let total = copy_inputs(&args, out.deref_mut())?;
            out.flush().context("Failed to flush <stdout>")?;
            total
        }
    };

    info!("Copied {} bytes from {} input(s)", total, args.inputs().len());
    Ok(())
}

/// Copy every input to `out` in order, returning the number of bytes written
fn copy_inputs(args: &Args, out: &mut File) -> Result<u64> {
    let mut total = 0;
    for input in args.inputs() {
        total += if input == STDIN_MARKER {
            let mut handle = stdin().lock();
            copy_stream(args, handle.deref_mut(), out)?
        } else {
            let mut handle =
                open(input, "r", None).with_context(|| format!("Failed to open {input}"))?;
            let copied = copy_stream(args, &mut handle, out)?;
            handle
                .close()
                .with_context(|| format!("Failed to close {input}"))?;
            copied
        };
    }
    Ok(total)
}

/// Drain `input` into `out` until end-of-stream
fn copy_stream(args: &Args, input: &mut File, out: &mut File) -> Result<u64> {
    let bound = args.read_bound();
    let mut copied = 0u64;
    loop {
        let chunk = if args.io.lines {
            input.readline(bound)
        } else {
            input.read(bound)
        }
        .with_context(|| format!("Failed to read {}", input.path()))?;

        if chunk.is_empty() {
            break;
        }

        let mut written = 0;
        while written < chunk.len() {
            let n = out
                .write(&chunk[written..])
                .with_context(|| format!("Failed to write {}", out.path()))?;
            if n == 0 {
                anyhow::bail!("{} accepted no bytes", out.path());
            }
            written += n;
        }
        copied += chunk.len() as u64;
    }
    debug!("Drained {} ({} bytes)", input.path(), copied);
    Ok(copied)
}
