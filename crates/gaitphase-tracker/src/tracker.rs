//! The phase-detection state machine.
//!
//! One tracked body, one frame per call. Each call inspects the current
//! [`Phase`], applies that phase's guard to the sample, and advances at most
//! one step. Entry states (`start`, `f0`…`f4`) are pass-throughs that
//! announce themselves with the frame that reaches them and immediately
//! re-arm the next guard; armed states (`*-end`) advance silently when
//! their threshold trips, so the announcement always carries the following
//! frame's snapshot.

use gaitphase_core::{Coord, JointKind, JointSample, Resettable};

use crate::baseline::{Baseline, RunningExtrema};
use crate::events::TransitionEvent;
use crate::phase::Phase;

/// Threshold configuration for the phase guards.
///
/// The defaults are the calibrated constants of the reference deployment.
/// The state order and guard wiring are fixed; only the numeric thresholds
/// are tunable.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Jitter tolerance added to each sample while an extremum is still
    /// legitimately increasing (default: 0.0155)
    pub forward_tolerance: Coord,
    /// Minimum right-foot height change that counts as a raise
    /// (default: 0.1)
    pub raise_threshold: Coord,
    /// Maximum distance from the foot baseline that counts as ground
    /// contact (default: 1.75)
    pub contact_window: Coord,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            forward_tolerance: Coord::from_ten_thousandths(155),
            raise_threshold: Coord::from_ten_thousandths(1_000),
            contact_window: Coord::from_ten_thousandths(17_500),
        }
    }
}

/// Calibration state, defined from the calibration frame until the next
/// reset.
#[derive(Debug, Clone, Copy)]
struct CalibrationState {
    baseline: Baseline,
    extrema: RunningExtrema,
}

/// Phase-detection state machine for a single tracked body.
///
/// `process_frame` never fails and never panics: frames that do not satisfy
/// the armed guard (or that lack the guard's joint) leave the machine
/// unchanged.
///
/// # Example
///
/// ```rust
/// use gaitphase_tracker::{Phase, PhaseTracker};
///
/// let mut tracker = PhaseTracker::with_defaults();
/// tracker.reset();
/// assert_eq!(tracker.phase(), Phase::Start);
/// ```
#[derive(Debug)]
pub struct PhaseTracker {
    config: TrackerConfig,
    phase: Phase,
    calibration: Option<CalibrationState>,
}

impl PhaseTracker {
    /// Creates a tracker in the idle state.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            calibration: None,
        }
    }

    /// Creates a tracker with the default thresholds.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(TrackerConfig::default())
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the threshold configuration.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Returns the calibration baseline, if a calibration frame has been
    /// seen since the last reset.
    #[must_use]
    pub fn baseline(&self) -> Option<&Baseline> {
        self.calibration.as_ref().map(|cal| &cal.baseline)
    }

    /// Returns the running extrema, if calibrated.
    #[must_use]
    pub fn extrema(&self) -> Option<&RunningExtrema> {
        self.calibration.as_ref().map(|cal| &cal.extrema)
    }

    /// Starts a new tracking run: drops any calibration state and arms the
    /// calibration guard.
    pub fn reset(&mut self) {
        self.calibration = None;
        self.phase = Phase::Start;
        tracing::debug!("tracking re-armed");
    }

    /// Processes one frame, returning the transition event if this frame
    /// entered a new announced phase.
    pub fn process_frame(&mut self, sample: &JointSample) -> Option<TransitionEvent> {
        match self.phase {
            Phase::Idle | Phase::Done => None,

            Phase::Start => self.calibrate(sample),

            Phase::StartEnd => {
                // Left knee at maximum position
                let v = sample.position(JointKind::KneeLeft)?.x.abs();
                let cal = self.calibration.as_mut()?;
                if cal.extrema.track_left_knee(v, self.config.forward_tolerance) {
                    self.advance_silently(Phase::F0);
                }
                None
            }

            Phase::F0 => self.announce(Phase::F0, Phase::F0End, sample),

            Phase::F0End => {
                // Right foot raised
                let v = sample.position(JointKind::FootRight)?.y.abs();
                let cal = self.calibration.as_ref()?;
                if v.abs_diff(cal.baseline.right_ankle_y) > self.config.raise_threshold {
                    self.advance_silently(Phase::F1);
                }
                None
            }

            Phase::F1 => self.announce(Phase::F1, Phase::F1End, sample),

            Phase::F1End => {
                // Right foot hits ground
                let v = sample.position(JointKind::FootRight)?.y.abs();
                let cal = self.calibration.as_ref()?;
                if v.abs_diff(cal.baseline.right_foot_y) <= self.config.contact_window {
                    self.advance_silently(Phase::F2);
                }
                None
            }

            Phase::F2 => self.announce(Phase::F2, Phase::F2End, sample),

            Phase::F2End => {
                // Left foot hits ground; the reference here is the baseline
                // captured from the left foot's x axis
                let v = sample.position(JointKind::FootLeft)?.y.abs();
                let cal = self.calibration.as_ref()?;
                if v.abs_diff(cal.baseline.left_foot_x) <= self.config.contact_window {
                    self.advance_silently(Phase::F3);
                }
                None
            }

            Phase::F3 => self.announce(Phase::F3, Phase::F3End, sample),

            Phase::F3End => {
                // Return swing at maximum; the right-wrist tracker is fed
                // from KneeLeft.x
                let v = sample.position(JointKind::KneeLeft)?.x.abs();
                let cal = self.calibration.as_mut()?;
                if cal.extrema.track_right_wrist(v, self.config.forward_tolerance) {
                    self.advance_silently(Phase::F4);
                }
                None
            }

            Phase::F4 => self.announce(Phase::F4, Phase::F4End, sample),

            Phase::F4End => {
                self.advance_silently(Phase::Done);
                None
            }
        }
    }

    /// Captures the baseline from the calibration frame. Stalls in `start`
    /// until a frame carrying all five calibration joints arrives.
    fn calibrate(&mut self, sample: &JointSample) -> Option<TransitionEvent> {
        let baseline = Baseline::capture(sample)?;
        let extrema = RunningExtrema::from_baseline(&baseline);
        self.calibration = Some(CalibrationState { baseline, extrema });
        self.announce(Phase::Start, Phase::StartEnd, sample)
    }

    /// Enters an announced phase and immediately re-arms the next guard.
    fn announce(
        &mut self,
        entered: Phase,
        next: Phase,
        sample: &JointSample,
    ) -> Option<TransitionEvent> {
        self.phase = next;
        tracing::debug!(phase = entered.as_str(), "phase transition");
        Some(TransitionEvent::new(entered, sample.clone()))
    }

    /// Advances without an announcement; the pass-through entry state emits
    /// the event on the next tick.
    fn advance_silently(&mut self, next: Phase) {
        self.phase = next;
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Resettable for PhaseTracker {
    fn reset(&mut self) {
        PhaseTracker::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gaitphase_core::{JointState, Position};

    /// A frame carrying the five calibration joints, with the left knee at
    /// the given x.
    fn frame(knee_x: f64) -> JointSample {
        let mut sample = JointSample::new(Utc::now());
        sample.set_joint(
            JointKind::WristRight,
            JointState::tracked(Position::from_f64(0.2, 0.1, 1.8)),
        );
        sample.set_joint(
            JointKind::KneeLeft,
            JointState::tracked(Position::from_f64(knee_x, -0.4, 2.0)),
        );
        sample.set_joint(
            JointKind::FootLeft,
            JointState::tracked(Position::from_f64(0.1, -0.8, 2.1)),
        );
        sample.set_joint(
            JointKind::FootRight,
            JointState::tracked(Position::from_f64(0.15, -0.3, 2.1)),
        );
        sample.set_joint(
            JointKind::AnkleRight,
            JointState::tracked(Position::from_f64(0.14, -0.8, 2.1)),
        );
        sample
    }

    fn frame_with(kind: JointKind, x: f64, y: f64) -> JointSample {
        JointSample::new(Utc::now())
            .with_joint(kind, JointState::tracked(Position::from_f64(x, y, 2.0)))
    }

    fn calibrated_tracker() -> PhaseTracker {
        let mut tracker = PhaseTracker::with_defaults();
        tracker.reset();
        let event = tracker.process_frame(&frame(0.5));
        assert_eq!(event.map(|e| e.phase), Some(Phase::Start));
        tracker
    }

    #[test]
    fn test_idle_ignores_frames() {
        let mut tracker = PhaseTracker::with_defaults();
        assert_eq!(tracker.phase(), Phase::Idle);
        assert!(tracker.process_frame(&frame(0.5)).is_none());
        assert_eq!(tracker.phase(), Phase::Idle);
    }

    #[test]
    fn test_calibration_captures_baseline_once() {
        let tracker = calibrated_tracker();
        let baseline = tracker.baseline().unwrap();
        assert_eq!(baseline.left_knee_x, Coord::from_f64(0.5));
        assert_eq!(baseline.right_wrist_x, Coord::from_f64(0.2));
        assert_eq!(baseline.right_ankle_y, Coord::from_f64(0.8));
        let extrema = tracker.extrema().unwrap();
        assert_eq!(extrema.left_knee, Coord::from_f64(0.5));
        assert_eq!(extrema.right_wrist, Coord::from_f64(0.2));
        assert_eq!(tracker.phase(), Phase::StartEnd);
    }

    #[test]
    fn test_calibration_stalls_on_incomplete_frame() {
        let mut tracker = PhaseTracker::with_defaults();
        tracker.reset();
        let partial = frame_with(JointKind::KneeLeft, 0.5, -0.4);
        assert!(tracker.process_frame(&partial).is_none());
        assert_eq!(tracker.phase(), Phase::Start);
        assert!(tracker.baseline().is_none());
    }

    #[test]
    fn test_knee_within_tolerance_keeps_arming() {
        let mut tracker = calibrated_tracker();

        // 0.49 + 0.0155 >= 0.5: tracker follows, no transition
        assert!(tracker.process_frame(&frame(0.49)).is_none());
        assert_eq!(tracker.phase(), Phase::StartEnd);
        assert_eq!(tracker.extrema().unwrap().left_knee, Coord::from_f64(0.49));

        // 0.6 + 0.0155 >= 0.49: extremum climbs
        assert!(tracker.process_frame(&frame(0.6)).is_none());
        assert_eq!(tracker.extrema().unwrap().left_knee, Coord::from_f64(0.6));
        assert_eq!(tracker.phase(), Phase::StartEnd);
    }

    #[test]
    fn test_knee_retraction_announces_f0_next_tick() {
        let mut tracker = calibrated_tracker();
        assert!(tracker.process_frame(&frame(0.6)).is_none());

        // 0.3 + 0.0155 < 0.6: the guard trips silently
        assert!(tracker.process_frame(&frame(0.3)).is_none());
        assert_eq!(tracker.phase(), Phase::F0);

        // The next frame carries the announcement and re-arms
        let event = tracker.process_frame(&frame(0.3)).unwrap();
        assert_eq!(event.phase, Phase::F0);
        assert_eq!(event.label(), "f0");
        assert_eq!(tracker.phase(), Phase::F0End);
    }

    #[test]
    fn test_foot_raise_threshold() {
        let mut tracker = calibrated_tracker();
        tracker.process_frame(&frame(0.6));
        tracker.process_frame(&frame(0.3));
        tracker.process_frame(&frame(0.3));
        assert_eq!(tracker.phase(), Phase::F0End);

        // |0.85| vs ankle baseline 0.8: diff 0.05, not a raise
        let low = frame_with(JointKind::FootRight, 0.15, -0.85);
        assert!(tracker.process_frame(&low).is_none());
        assert_eq!(tracker.phase(), Phase::F0End);

        // |0.95| vs 0.8: diff 0.15 > 0.1
        let raised = frame_with(JointKind::FootRight, 0.15, 0.95);
        assert!(tracker.process_frame(&raised).is_none());
        assert_eq!(tracker.phase(), Phase::F1);
    }

    #[test]
    fn test_stall_is_idempotent() {
        let mut tracker = calibrated_tracker();
        // Frames that always satisfy the tolerance never advance the phase
        for _ in 0..50 {
            assert!(tracker.process_frame(&frame(0.5)).is_none());
        }
        assert_eq!(tracker.phase(), Phase::StartEnd);
    }

    #[test]
    fn test_missing_guard_joint_stalls() {
        let mut tracker = calibrated_tracker();
        let no_knee = frame_with(JointKind::Head, 0.0, 0.6);
        assert!(tracker.process_frame(&no_knee).is_none());
        assert_eq!(tracker.phase(), Phase::StartEnd);
        assert_eq!(tracker.extrema().unwrap().left_knee, Coord::from_f64(0.5));
    }

    #[test]
    fn test_baseline_unchanged_until_reset() {
        let mut tracker = calibrated_tracker();
        tracker.process_frame(&frame(0.62));
        tracker.process_frame(&frame(0.58));
        assert_eq!(tracker.baseline().unwrap().left_knee_x, Coord::from_f64(0.5));

        tracker.reset();
        assert_eq!(tracker.phase(), Phase::Start);
        assert!(tracker.baseline().is_none());
        assert!(tracker.extrema().is_none());
    }

    #[test]
    fn test_full_cycle_emits_labels_in_order() {
        let mut tracker = PhaseTracker::with_defaults();
        tracker.reset();
        let mut labels = Vec::new();
        let mut push = |event: Option<TransitionEvent>| {
            if let Some(event) = event {
                labels.push(event.label());
            }
        };

        push(tracker.process_frame(&frame(0.5))); // start
        push(tracker.process_frame(&frame(0.62)));
        push(tracker.process_frame(&frame(0.58))); // knee turning point
        push(tracker.process_frame(&frame(0.58))); // f0 announced
        push(tracker.process_frame(&frame_with(JointKind::FootRight, 0.15, -0.5))); // raise
        push(tracker.process_frame(&frame(0.58))); // f1 announced
        push(tracker.process_frame(&frame_with(JointKind::FootRight, 0.15, -0.32))); // contact
        push(tracker.process_frame(&frame(0.58))); // f2 announced
        push(tracker.process_frame(&frame_with(JointKind::FootLeft, 0.1, -0.31))); // contact
        push(tracker.process_frame(&frame(0.58))); // f3 announced
        push(tracker.process_frame(&frame(0.7)));
        push(tracker.process_frame(&frame(0.4))); // return turning point
        push(tracker.process_frame(&frame(0.4))); // f4 announced
        assert_eq!(tracker.phase(), Phase::F4End);

        push(tracker.process_frame(&frame(0.4)));
        assert_eq!(tracker.phase(), Phase::Done);
        push(tracker.process_frame(&frame(0.4)));
        assert_eq!(tracker.phase(), Phase::Done);

        assert_eq!(labels, vec!["start", "f0", "f1", "f2", "f3", "f4"]);
    }

    #[test]
    fn test_foot_contact_outside_window_stalls() {
        let mut tracker = calibrated_tracker();
        tracker.process_frame(&frame(0.6));
        tracker.process_frame(&frame(0.3));
        tracker.process_frame(&frame(0.3));
        tracker.process_frame(&frame_with(JointKind::FootRight, 0.15, -0.5));
        tracker.process_frame(&frame(0.3));
        assert_eq!(tracker.phase(), Phase::F1End);

        // Baseline right_foot_y is -0.3 (signed); |2.2| differs by 2.5
        let far = frame_with(JointKind::FootRight, 0.15, 2.2);
        assert!(tracker.process_frame(&far).is_none());
        assert_eq!(tracker.phase(), Phase::F1End);

        // |0.32| differs from -0.3 by 0.62, inside the 1.75 window
        let near = frame_with(JointKind::FootRight, 0.15, -0.32);
        assert!(tracker.process_frame(&near).is_none());
        assert_eq!(tracker.phase(), Phase::F2);
    }
}
