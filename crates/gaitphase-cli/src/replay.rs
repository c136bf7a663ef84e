//! Replay of recorded frame streams.
//!
//! Recordings are JSON lines, one object per frame:
//!
//! ```json
//! {"timestamp_ms": 1709884800000, "joints": {"knee_left": {"x": 0.5, "y": -0.4, "z": 2.0, "quality": "tracked"}}}
//! ```
//!
//! Joint names follow [`JointKind::name`]; `quality` is optional and
//! defaults to `tracked`. Frames must appear in capture order.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use chrono::DateTime;
use clap::Args;
use serde::Deserialize;

use gaitphase_core::{
    CoreError, CoreResult, FrameSource, JointKind, JointSample, JointState, Position,
    TrackingQuality,
};
use gaitphase_tracker::{PhaseTracker, TrackLogWriter, TrackingSession};

/// Arguments for the `replay` command
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Recorded frame stream (JSON lines)
    #[arg(long, short)]
    pub input: PathBuf,

    /// Track log written during the run
    #[arg(long, default_value = "track.log")]
    pub log: PathBuf,
}

/// Wire representation of one recorded frame.
#[derive(Debug, Deserialize)]
struct FrameRecord {
    /// Capture time, milliseconds since the Unix epoch
    timestamp_ms: i64,
    /// Joint states keyed by joint name
    joints: BTreeMap<String, JointRecord>,
}

/// Wire representation of one joint state.
#[derive(Debug, Deserialize)]
struct JointRecord {
    x: f64,
    y: f64,
    z: f64,
    #[serde(default)]
    quality: TrackingQuality,
}

impl FrameRecord {
    /// Converts the wire record into a domain sample.
    fn into_sample(self) -> CoreResult<JointSample> {
        let timestamp = DateTime::from_timestamp_millis(self.timestamp_ms).ok_or_else(|| {
            CoreError::validation(format!("timestamp out of range: {}", self.timestamp_ms))
        })?;
        let mut sample = JointSample::new(timestamp);
        for (name, joint) in self.joints {
            let kind = JointKind::from_name(&name)
                .ok_or_else(|| CoreError::validation(format!("unknown joint name: {name}")))?;
            sample.set_joint(
                kind,
                JointState::new(Position::from_f64(joint.x, joint.y, joint.z), joint.quality),
            );
        }
        Ok(sample)
    }
}

/// Frame source backed by a JSON-lines recording.
pub struct ReplaySource {
    lines: Lines<BufReader<File>>,
    line_number: usize,
}

impl ReplaySource {
    /// Opens a recording for replay.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let file = File::open(path)
            .map_err(|e| CoreError::source(format!("cannot open {}: {e}", path.display())))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_number: 0,
        })
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> CoreResult<Option<JointSample>> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = line.map_err(|e| {
                CoreError::source(format!("read failed at line {}: {e}", self.line_number))
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let record: FrameRecord = serde_json::from_str(&line).map_err(|e| {
                CoreError::source(format!("malformed frame at line {}: {e}", self.line_number))
            })?;
            return record.into_sample().map(Some);
        }
        Ok(None)
    }
}

/// Executes the `replay` command.
///
/// # Errors
///
/// Returns an error if the recording cannot be read or the track log cannot
/// be written.
pub fn execute(args: ReplayArgs) -> anyhow::Result<()> {
    let mut source = ReplaySource::open(&args.input)?;
    let session = TrackingSession::new(
        PhaseTracker::with_defaults(),
        TrackLogWriter::new(&args.log),
    );

    session.reset()?;
    tracing::info!(input = %args.input.display(), log = %args.log.display(), "replay started");

    let mut frames = 0usize;
    let mut transitions = 0usize;
    while let Some(sample) = source.next_frame()? {
        frames += 1;
        if let Some(event) = session.process_frame(&sample)? {
            transitions += 1;
            tracing::info!(phase = event.label(), frame = frames, "phase transition");
        }
    }

    println!("Frames processed:  {frames}");
    println!("Transitions:       {transitions}");
    println!("Final phase:       {}", session.phase());
    println!("Track log:         {}", args.log.display());

    Ok(())
}
