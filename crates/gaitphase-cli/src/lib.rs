//! Gaitphase CLI
//!
//! Command-line interface for the gaitphase motion tracking system.
//!
//! # Usage
//!
//! ```bash
//! # Replay a recorded frame stream and write the track log
//! gaitphase replay --input session.jsonl --log track.log
//!
//! # Display version information
//! gaitphase version
//! ```

use clap::{Parser, Subcommand};

pub mod replay;

/// Gaitphase Command Line Interface
#[derive(Parser, Debug)]
#[command(name = "gaitphase")]
#[command(author, version, about = "Gait-cycle phase detection from recorded skeleton frames")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded frame stream through the phase tracker
    Replay(replay::ReplayArgs),

    /// Display version information
    Version,
}
