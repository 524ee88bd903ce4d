//! Command-line interface definitions for `sfcat`
//!
//! This module organizes CLI arguments by **functional usage** - each group
//! contains the options needed by one stage of the copy loop.

use crate::buffering::Buffering;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Path that stands for the `<stdin>` handle
pub const STDIN_MARKER: &str = "-";

/// Concatenate files (or standard input) through buffered stdio handles
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input and output selection
    #[command(flatten)]
    pub paths: PathConfig,

    /// Read and buffering configuration
    #[command(flatten)]
    pub io: IoConfig,

    /// Output and logging configuration
    #[command(flatten)]
    pub output: OutputConfig,
}

// ============================================================================
// FUNCTIONAL GROUPS: Organized by what stage consumes them
// ============================================================================

/// Inputs and output
///
/// Used by: `main()` when opening handles
#[derive(clap::Args, Debug, Clone)]
pub struct PathConfig {
    /// Files to read in order; `-` reads standard input
    #[arg(value_name = "FILE", default_value = STDIN_MARKER)]
    pub inputs: Vec<String>,

    /// Write to this file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Append to the output file instead of truncating it
    #[arg(long, requires = "output")]
    pub append: bool,
}

/// Read and buffering configuration
///
/// Used by: the copy loop and the output `open()` call
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "I/O Options")]
pub struct IoConfig {
    /// Buffering for the output file: -1 default, 0 unbuffered, 1 line-buffered
    #[arg(long, allow_hyphen_values = true, requires = "output")]
    pub buffering: Option<i32>,

    /// Bytes per read (0 = default of 4096)
    #[arg(long, default_value = "0")]
    pub chunk_size: u32,

    /// Read line by line instead of in fixed-size chunks
    #[arg(long)]
    pub lines: bool,
}

/// Output and logging configuration
///
/// Used by: `main()`, logging initialization
#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "Output Options")]
pub struct OutputConfig {
    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except errors)
    #[arg(short, long)]
    pub quiet: bool,
}

// ============================================================================
// IMPLEMENTATION: Convenience methods and validation
// ============================================================================

impl Args {
    /// Validate command-line arguments
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - No inputs were given
    /// - `--buffering` is not one of -1, 0 or 1
    /// - `--buffering` or `--append` is used without `--output`
    /// - Both --quiet and --verbose options are used
    pub fn validate(&self) -> Result<()> {
        if self.paths.inputs.is_empty() {
            anyhow::bail!("At least one input is required");
        }

        // clap's `requires = "output"` only runs at parse time; these checks
        // also cover an `Args` assembled in code.
        if let Some(raw) = self.io.buffering {
            Buffering::try_from(raw)?;
            if self.paths.output.is_none() {
                anyhow::bail!("--buffering only applies together with --output");
            }
        }

        if self.paths.append && self.paths.output.is_none() {
            anyhow::bail!("--append only applies together with --output");
        }

        // Validate conflicting options
        if self.output.quiet && self.output.verbose > 0 {
            anyhow::bail!("Cannot use both --quiet and --verbose options");
        }

        Ok(())
    }

    /// Mode string for opening the output file
    #[must_use]
    pub const fn output_mode(&self) -> &'static str {
        if self.paths.append {
            "a"
        } else {
            "w"
        }
    }

    /// Read bound to pass to `read`/`readline`, `None` for the default
    #[must_use]
    pub const fn read_bound(&self) -> Option<u32> {
        if self.io.chunk_size == 0 {
            None
        } else {
            Some(self.io.chunk_size)
        }
    }

    /// Log level implied by `--verbose` / `--quiet`
    #[must_use]
    pub const fn log_level(&self) -> tracing::Level {
        if self.output.quiet {
            return tracing::Level::ERROR;
        }
        match self.output.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    // ========== Convenience accessors for commonly used fields ==========

    /// Input paths, `-` meaning standard input
    #[must_use]
    pub fn inputs(&self) -> &[String] {
        &self.paths.inputs
    }

    /// Output path, if not writing to standard output
    #[must_use]
    pub const fn output_path(&self) -> Option<&PathBuf> {
        self.paths.output.as_ref()
    }

    /// Check if verbose mode is enabled
    #[must_use]
    pub const fn verbose(&self) -> u8 {
        self.output.verbose
    }

    /// Check if quiet mode is enabled
    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.output.quiet
    }
}
