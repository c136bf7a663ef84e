//! Transition events and the sinks that consume them.
//!
//! The tracker performs no I/O of its own; every phase advance is announced
//! as a [`TransitionEvent`] and handed to a [`TransitionSink`]. The sink
//! owns persistence (and its failures), keeping the state machine pure.

use chrono::{DateTime, Utc};

use gaitphase_core::JointSample;

use crate::error::TrackerResult;
use crate::phase::Phase;

/// Record of a single phase advance.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionEvent {
    /// The phase that was entered
    pub phase: Phase,
    /// Capture time of the triggering frame
    pub timestamp: DateTime<Utc>,
    /// The full joint sample that triggered the advance
    pub snapshot: JointSample,
}

impl TransitionEvent {
    /// Creates an event for an entered phase, stamped with the triggering
    /// frame's capture time.
    #[must_use]
    pub fn new(phase: Phase, snapshot: JointSample) -> Self {
        Self {
            phase,
            timestamp: snapshot.timestamp,
            snapshot,
        }
    }

    /// Returns the announced phase label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.phase.label().unwrap_or_else(|| self.phase.as_str())
    }
}

/// Consumer of transition events.
///
/// `record` is called exactly once per phase advance; `clear` discards all
/// previously recorded history and is invoked when a new tracking run
/// starts.
pub trait TransitionSink: Send + Sync {
    /// Records one transition event.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the event fails. The tracker's
    /// in-memory state is already advanced when this is called.
    fn record(&self, event: &TransitionEvent) -> TrackerResult<()>;

    /// Discards all recorded events.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be cleared.
    fn clear(&self) -> TrackerResult<()>;
}

/// In-memory sink, primarily for tests and headless use.
#[derive(Debug, Default)]
pub struct InMemorySink {
    events: parking_lot::RwLock<Vec<TransitionEvent>>,
}

impl InMemorySink {
    /// Creates a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<TransitionEvent> {
        self.events.read().clone()
    }

    /// Returns the recorded phase labels in emission order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.events.read().iter().map(TransitionEvent::label).collect()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl TransitionSink for InMemorySink {
    fn record(&self, event: &TransitionEvent) -> TrackerResult<()> {
        self.events.write().push(event.clone());
        Ok(())
    }

    fn clear(&self) -> TrackerResult<()> {
        self.events.write().clear();
        Ok(())
    }
}
