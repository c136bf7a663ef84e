//! # Gaitphase Tracker
//!
//! Phase detection for a repeated gait/exercise cycle, driven by tracked
//! skeleton joint positions.
//!
//! The tracker consumes one [`JointSample`](gaitphase_core::JointSample)
//! per frame and classifies the subject's motion into the ordered phases
//! `start`, `f0`…`f4`. Detection works from threshold tests on specific
//! joint coordinates: a calibration [`Baseline`] captured when tracking
//! starts, [`RunningExtrema`] that follow a coordinate to its turning
//! point, and fixed per-phase guards.
//!
//! ## Architecture
//!
//! ```text
//!  FrameSource ──samples──▶ PhaseTracker ──TransitionEvent──▶ TransitionSink
//!                             │                                 (memory / file)
//!                             └─ Baseline + RunningExtrema
//! ```
//!
//! [`PhaseTracker`] is pure in-memory state; [`TrackingSession`] adds the
//! mutex that serializes resets against frame delivery and fans emitted
//! events out to a sink. [`TrackLogWriter`] persists each transition as one
//! `#`-separated record line and truncates the log when a run restarts.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use gaitphase_core::{JointSample, JointState, Position};
//! use gaitphase_tracker::{
//!     InMemorySink, Phase, PhaseTracker, TrackingSession, CALIBRATION_JOINTS,
//! };
//!
//! let session = TrackingSession::new(PhaseTracker::with_defaults(), InMemorySink::new());
//! session.reset()?;
//!
//! let mut frame = JointSample::new(Utc::now());
//! for kind in CALIBRATION_JOINTS {
//!     frame.set_joint(kind, JointState::tracked(Position::from_f64(0.3, -0.5, 2.0)));
//! }
//!
//! let event = session.process_frame(&frame)?;
//! assert_eq!(event.map(|e| e.label()), Some("start"));
//! assert_eq!(session.phase(), Phase::StartEnd);
//! # Ok::<(), gaitphase_tracker::TrackerError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod baseline;
pub mod error;
pub mod events;
pub mod export;
pub mod phase;
pub mod session;
pub mod tracker;

// Re-export main types
pub use baseline::{Baseline, RunningExtrema, CALIBRATION_JOINTS};
pub use error::{TrackerError, TrackerResult};
pub use events::{InMemorySink, TransitionEvent, TransitionSink};
pub use export::{format_record, TrackLogWriter, EXPORT_JOINTS};
pub use phase::Phase;
pub use session::TrackingSession;
pub use tracker::{PhaseTracker, TrackerConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
