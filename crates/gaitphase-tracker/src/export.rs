//! Track-log record format and the append-only file sink.
//!
//! Each transition is persisted as one text line:
//!
//! ```text
//! 2024-03-08 14:21:05:312#x,y,z#x,y,z#…
//! ```
//!
//! The timestamp is followed by fifteen `x,y,z` coordinate triples, one per
//! export joint in the fixed order of [`EXPORT_JOINTS`], all joined by `#`.
//! The log is truncated to empty when a new tracking run starts.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};

use gaitphase_core::{JointKind, Position};

use crate::error::TrackerResult;
use crate::events::{TransitionEvent, TransitionSink};

/// Joints included in every track-log record, in record order.
pub const EXPORT_JOINTS: [JointKind; 15] = [
    JointKind::Head,
    JointKind::Neck,
    JointKind::ShoulderLeft,
    JointKind::ShoulderRight,
    JointKind::ElbowLeft,
    JointKind::ElbowRight,
    JointKind::WristLeft,
    JointKind::WristRight,
    JointKind::SpineBase,
    JointKind::HipLeft,
    JointKind::HipRight,
    JointKind::KneeLeft,
    JointKind::KneeRight,
    JointKind::FootLeft,
    JointKind::FootRight,
];

/// Renders one transition event as a track-log line (without the trailing
/// newline).
///
/// Joints absent from the snapshot are written as `0,0,0` so the record
/// always has fifteen slots.
#[must_use]
pub fn format_record(event: &TransitionEvent) -> String {
    let mut line = format!(
        "{}:{}",
        event.timestamp.format("%Y-%m-%d %H:%M:%S"),
        event.timestamp.timestamp_subsec_millis()
    );
    for kind in EXPORT_JOINTS {
        let position = event.snapshot.position(kind).unwrap_or_default();
        let _ = write!(line, "#{},{},{}", position.x, position.y, position.z);
    }
    line
}

/// Append-only file sink for transition events.
///
/// The file is opened per append, mirroring a sink that must survive
/// process restarts mid-run; `clear` truncates it in place.
#[derive(Debug, Clone)]
pub struct TrackLogWriter {
    path: PathBuf,
}

impl TrackLogWriter {
    /// Creates a writer targeting the given log path. The file is created
    /// on first append or clear.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the log path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransitionSink for TrackLogWriter {
    fn record(&self, event: &TransitionEvent) -> TrackerResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", format_record(event))?;
        Ok(())
    }

    fn clear(&self) -> TrackerResult<()> {
        File::create(&self.path)?;
        Ok(())
    }
}
