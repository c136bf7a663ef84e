//! Session wrapper serializing resets against frame processing.
//!
//! Frame delivery is single-threaded, but a reset can arrive from another
//! context (a start button, a control socket). The session puts both
//! operations behind one mutex so a reset happens-before the next processed
//! frame and no partially rebuilt baseline is ever observed.

use parking_lot::Mutex;

use gaitphase_core::JointSample;

use crate::error::TrackerResult;
use crate::events::{TransitionEvent, TransitionSink};
use crate::phase::Phase;
use crate::tracker::PhaseTracker;

/// A phase tracker paired with the sink that records its transitions.
pub struct TrackingSession<S> {
    tracker: Mutex<PhaseTracker>,
    sink: S,
}

impl<S: TransitionSink> TrackingSession<S> {
    /// Creates a session around a tracker and a sink.
    pub fn new(tracker: PhaseTracker, sink: S) -> Self {
        Self {
            tracker: Mutex::new(tracker),
            sink,
        }
    }

    /// Starts a new tracking run: re-arms the tracker and discards the
    /// sink's recorded history.
    ///
    /// The tracker is re-armed even when clearing the sink fails, so a
    /// persistence fault can never leave the machine in a stale run.
    ///
    /// # Errors
    ///
    /// Returns the sink's error when clearing fails.
    pub fn reset(&self) -> TrackerResult<()> {
        let mut tracker = self.tracker.lock();
        tracker.reset();
        self.sink.clear()
    }

    /// Processes one frame, forwarding any transition to the sink.
    ///
    /// In-memory phase state advances before the sink append; an append
    /// failure is reported but does not roll the machine back.
    ///
    /// # Errors
    ///
    /// Returns the sink's error when recording fails.
    pub fn process_frame(&self, sample: &JointSample) -> TrackerResult<Option<TransitionEvent>> {
        let event = self.tracker.lock().process_frame(sample);
        if let Some(ref event) = event {
            if let Err(error) = self.sink.record(event) {
                tracing::warn!(phase = event.label(), %error, "failed to persist transition");
                return Err(error);
            }
        }
        Ok(event)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.tracker.lock().phase()
    }

    /// Borrows the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::CALIBRATION_JOINTS;
    use crate::events::InMemorySink;
    use chrono::Utc;
    use gaitphase_core::{JointState, Position};

    fn calibration_frame() -> JointSample {
        let mut sample = JointSample::new(Utc::now());
        for kind in CALIBRATION_JOINTS {
            sample.set_joint(kind, JointState::tracked(Position::from_f64(0.3, -0.5, 2.0)));
        }
        sample
    }

    #[test]
    fn test_reset_arms_and_clears() {
        let session = TrackingSession::new(PhaseTracker::with_defaults(), InMemorySink::new());
        assert_eq!(session.phase(), Phase::Idle);

        session.reset().unwrap();
        assert_eq!(session.phase(), Phase::Start);

        session.process_frame(&calibration_frame()).unwrap();
        assert_eq!(session.sink().labels(), vec!["start"]);

        session.reset().unwrap();
        assert_eq!(session.phase(), Phase::Start);
        assert!(session.sink().is_empty());
    }

    #[test]
    fn test_transitions_reach_the_sink() {
        let session = TrackingSession::new(PhaseTracker::with_defaults(), InMemorySink::new());
        session.reset().unwrap();

        let event = session.process_frame(&calibration_frame()).unwrap().unwrap();
        assert_eq!(event.label(), "start");
        assert_eq!(session.sink().len(), 1);
        assert_eq!(session.phase(), Phase::StartEnd);

        // A stalling frame records nothing
        let stall = session.process_frame(&calibration_frame()).unwrap();
        assert!(stall.is_none());
        assert_eq!(session.sink().len(), 1);
    }
}
