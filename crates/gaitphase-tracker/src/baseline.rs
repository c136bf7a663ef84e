//! Calibration baseline and running-extremum state.
//!
//! Both records are captured when tracking starts and are owned exclusively
//! by the tracker; they are dropped on reset and rebuilt at the next
//! calibration frame.

use gaitphase_core::{Coord, JointKind, JointSample};

/// Joints that must be present in the calibration frame.
pub const CALIBRATION_JOINTS: [JointKind; 5] = [
    JointKind::WristRight,
    JointKind::KneeLeft,
    JointKind::FootLeft,
    JointKind::FootRight,
    JointKind::AnkleRight,
];

/// Reference coordinates captured once at the calibration frame.
///
/// The wrist, knee, and ankle references are magnitudes; `left_foot_x` and
/// `right_foot_y` are captured signed, matching the sensor pipeline this
/// detector was calibrated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    /// |WristRight.x| at calibration
    pub right_wrist_x: Coord,
    /// |KneeLeft.x| at calibration
    pub left_knee_x: Coord,
    /// FootLeft.x at calibration, signed
    pub left_foot_x: Coord,
    /// FootRight.y at calibration, signed
    pub right_foot_y: Coord,
    /// |AnkleRight.y| at calibration
    pub right_ankle_y: Coord,
}

impl Baseline {
    /// Captures a baseline from a calibration frame.
    ///
    /// Returns `None` when any required joint is absent from the frame,
    /// leaving the caller stalled until a complete frame arrives.
    #[must_use]
    pub fn capture(sample: &JointSample) -> Option<Self> {
        Some(Self {
            right_wrist_x: sample.position(JointKind::WristRight)?.x.abs(),
            left_knee_x: sample.position(JointKind::KneeLeft)?.x.abs(),
            left_foot_x: sample.position(JointKind::FootLeft)?.x,
            right_foot_y: sample.position(JointKind::FootRight)?.y,
            right_ankle_y: sample.position(JointKind::AnkleRight)?.y.abs(),
        })
    }
}

/// Turning-point trackers for the two extremum-guarded phases.
///
/// Each value follows the per-frame sample magnitude for as long as the
/// sample plus the forward tolerance stays at or above the tracked value;
/// the first sample that falls short marks the turning point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningExtrema {
    /// Tracked |KneeLeft.x| while the start-end guard is armed
    pub left_knee: Coord,
    /// Tracked return-swing magnitude while the f3-end guard is armed
    pub right_wrist: Coord,
}

impl RunningExtrema {
    /// Seeds both trackers from the calibration baseline.
    #[must_use]
    pub fn from_baseline(baseline: &Baseline) -> Self {
        Self {
            left_knee: baseline.left_knee_x,
            right_wrist: baseline.right_wrist_x,
        }
    }

    /// Feeds the left-knee tracker one sample.
    ///
    /// Returns `true` when the value has retreated past the tolerance,
    /// marking the turning point; otherwise updates the tracked value.
    pub fn track_left_knee(&mut self, value: Coord, tolerance: Coord) -> bool {
        track(&mut self.left_knee, value, tolerance)
    }

    /// Feeds the right-wrist tracker one sample. Same contract as
    /// [`track_left_knee`](Self::track_left_knee).
    pub fn track_right_wrist(&mut self, value: Coord, tolerance: Coord) -> bool {
        track(&mut self.right_wrist, value, tolerance)
    }
}

fn track(current: &mut Coord, value: Coord, tolerance: Coord) -> bool {
    if value + tolerance >= *current {
        *current = value;
        false
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gaitphase_core::{JointState, Position};

    fn calibration_frame() -> JointSample {
        let mut sample = JointSample::new(Utc::now());
        sample.set_joint(
            JointKind::WristRight,
            JointState::tracked(Position::from_f64(-0.2, 0.1, 1.8)),
        );
        sample.set_joint(
            JointKind::KneeLeft,
            JointState::tracked(Position::from_f64(0.5, -0.4, 2.0)),
        );
        sample.set_joint(
            JointKind::FootLeft,
            JointState::tracked(Position::from_f64(-0.1, -0.8, 2.1)),
        );
        sample.set_joint(
            JointKind::FootRight,
            JointState::tracked(Position::from_f64(0.15, -0.82, 2.1)),
        );
        sample.set_joint(
            JointKind::AnkleRight,
            JointState::tracked(Position::from_f64(0.14, -0.75, 2.1)),
        );
        sample
    }

    #[test]
    fn test_capture_applies_magnitude_rules() {
        let baseline = Baseline::capture(&calibration_frame()).unwrap();
        assert_eq!(baseline.right_wrist_x, Coord::from_f64(0.2));
        assert_eq!(baseline.left_knee_x, Coord::from_f64(0.5));
        // Foot references keep their sign
        assert_eq!(baseline.left_foot_x, Coord::from_f64(-0.1));
        assert_eq!(baseline.right_foot_y, Coord::from_f64(-0.82));
        assert_eq!(baseline.right_ankle_y, Coord::from_f64(0.75));
    }

    #[test]
    fn test_capture_requires_all_five_joints() {
        let empty = JointSample::new(Utc::now());
        assert!(Baseline::capture(&empty).is_none());

        // A single calibration joint is not enough
        let partial = JointSample::new(Utc::now()).with_joint(
            JointKind::KneeLeft,
            JointState::tracked(Position::from_f64(0.5, -0.4, 2.0)),
        );
        assert!(Baseline::capture(&partial).is_none());
    }

    #[test]
    fn test_tracker_follows_within_tolerance() {
        let baseline = Baseline::capture(&calibration_frame()).unwrap();
        let mut extrema = RunningExtrema::from_baseline(&baseline);
        let tolerance = Coord::from_ten_thousandths(155);

        // 0.49 + 0.0155 >= 0.5: still arming, tracker follows downward
        assert!(!extrema.track_left_knee(Coord::from_f64(0.49), tolerance));
        assert_eq!(extrema.left_knee, Coord::from_f64(0.49));

        // 0.6 + 0.0155 >= 0.49: the extremum keeps climbing
        assert!(!extrema.track_left_knee(Coord::from_f64(0.6), tolerance));
        assert_eq!(extrema.left_knee, Coord::from_f64(0.6));

        // 0.3 + 0.0155 < 0.6: turning point
        assert!(extrema.track_left_knee(Coord::from_f64(0.3), tolerance));
        assert_eq!(extrema.left_knee, Coord::from_f64(0.6));
    }

    #[test]
    fn test_trackers_are_independent() {
        let baseline = Baseline::capture(&calibration_frame()).unwrap();
        let mut extrema = RunningExtrema::from_baseline(&baseline);
        let tolerance = Coord::from_ten_thousandths(155);

        assert!(!extrema.track_right_wrist(Coord::from_f64(0.7), tolerance));
        assert_eq!(extrema.right_wrist, Coord::from_f64(0.7));
        assert_eq!(extrema.left_knee, Coord::from_f64(0.5));
    }
}
