//! Core data types for the gaitphase system.
//!
//! This module defines the fundamental data structures used throughout the
//! gaitphase crates for representing skeleton frames and joint coordinates.
//!
//! # Type Categories
//!
//! - **Coordinate Types**: [`Coord`], [`Position`]
//! - **Joint Types**: [`JointKind`], [`JointState`], [`TrackingQuality`]
//! - **Frame Types**: [`JointSample`]

use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::JOINT_COUNT;

// =============================================================================
// Coordinate Types
// =============================================================================

/// Number of ten-thousandth units per whole coordinate unit.
const COORD_SCALE: i64 = 10_000;

/// A signed fixed-precision coordinate with 4 decimal digits of resolution.
///
/// Stored as an integer count of ten-thousandths, so absolute values,
/// differences, and threshold comparisons are exact on every platform.
/// Conversion from sensor floating-point values rounds half-to-even at the
/// fourth decimal place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(i64);

impl Coord {
    /// The zero coordinate.
    pub const ZERO: Self = Self(0);

    /// Creates a coordinate from a raw count of ten-thousandths.
    #[must_use]
    pub const fn from_ten_thousandths(units: i64) -> Self {
        Self(units)
    }

    /// Creates a coordinate from a floating-point sensor value, rounding
    /// half-to-even at the fourth decimal place.
    ///
    /// Non-finite inputs clamp (NaN becomes zero).
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self((value * COORD_SCALE as f64).round_ties_even() as i64)
    }

    /// Returns the raw count of ten-thousandths.
    #[must_use]
    pub const fn ten_thousandths(self) -> i64 {
        self.0
    }

    /// Returns the coordinate as a floating-point value.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / COORD_SCALE as f64
    }

    /// Returns the magnitude of the coordinate.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the absolute difference from another coordinate.
    #[must_use]
    pub const fn abs_diff(self, other: Self) -> Self {
        Self((self.0 - other.0).abs())
    }
}

impl std::ops::Add for Coord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Coord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Coord {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::fmt::Display for Coord {
    /// Formats without trailing fractional zeros: `0.5`, `-1.23`, `0.0155`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / COORD_SCALE as u64;
        let frac = magnitude % COORD_SCALE as u64;
        if frac == 0 {
            write!(f, "{sign}{whole}")
        } else {
            let digits = format!("{frac:04}");
            write!(f, "{sign}{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

/// A 3-D joint position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Horizontal coordinate
    pub x: Coord,
    /// Vertical coordinate
    pub y: Coord,
    /// Depth coordinate
    pub z: Coord,
}

impl Position {
    /// Creates a position from fixed-point coordinates.
    #[must_use]
    pub const fn new(x: Coord, y: Coord, z: Coord) -> Self {
        Self { x, y, z }
    }

    /// Creates a position from floating-point sensor values.
    #[must_use]
    pub fn from_f64(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Coord::from_f64(x),
            y: Coord::from_f64(y),
            z: Coord::from_f64(z),
        }
    }
}

// =============================================================================
// Joint Types
// =============================================================================

/// Skeleton joints delivered by the sensor, in sensor index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum JointKind {
    /// Base of the spine
    SpineBase = 0,
    /// Middle of the spine
    SpineMid = 1,
    /// Neck
    Neck = 2,
    /// Head
    Head = 3,
    /// Left shoulder
    ShoulderLeft = 4,
    /// Left elbow
    ElbowLeft = 5,
    /// Left wrist
    WristLeft = 6,
    /// Left hand
    HandLeft = 7,
    /// Right shoulder
    ShoulderRight = 8,
    /// Right elbow
    ElbowRight = 9,
    /// Right wrist
    WristRight = 10,
    /// Right hand
    HandRight = 11,
    /// Left hip
    HipLeft = 12,
    /// Left knee
    KneeLeft = 13,
    /// Left ankle
    AnkleLeft = 14,
    /// Left foot
    FootLeft = 15,
    /// Right hip
    HipRight = 16,
    /// Right knee
    KneeRight = 17,
    /// Right ankle
    AnkleRight = 18,
    /// Right foot
    FootRight = 19,
    /// Shoulder line of the spine
    SpineShoulder = 20,
    /// Tip of the left hand
    HandTipLeft = 21,
    /// Left thumb
    ThumbLeft = 22,
    /// Tip of the right hand
    HandTipRight = 23,
    /// Right thumb
    ThumbRight = 24,
}

impl JointKind {
    /// Returns all joint kinds in sensor index order.
    #[must_use]
    pub fn all() -> &'static [Self; JOINT_COUNT] {
        &[
            Self::SpineBase,
            Self::SpineMid,
            Self::Neck,
            Self::Head,
            Self::ShoulderLeft,
            Self::ElbowLeft,
            Self::WristLeft,
            Self::HandLeft,
            Self::ShoulderRight,
            Self::ElbowRight,
            Self::WristRight,
            Self::HandRight,
            Self::HipLeft,
            Self::KneeLeft,
            Self::AnkleLeft,
            Self::FootLeft,
            Self::HipRight,
            Self::KneeRight,
            Self::AnkleRight,
            Self::FootRight,
            Self::SpineShoulder,
            Self::HandTipLeft,
            Self::ThumbLeft,
            Self::HandTipRight,
            Self::ThumbRight,
        ]
    }

    /// Returns the joint name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SpineBase => "spine_base",
            Self::SpineMid => "spine_mid",
            Self::Neck => "neck",
            Self::Head => "head",
            Self::ShoulderLeft => "shoulder_left",
            Self::ElbowLeft => "elbow_left",
            Self::WristLeft => "wrist_left",
            Self::HandLeft => "hand_left",
            Self::ShoulderRight => "shoulder_right",
            Self::ElbowRight => "elbow_right",
            Self::WristRight => "wrist_right",
            Self::HandRight => "hand_right",
            Self::HipLeft => "hip_left",
            Self::KneeLeft => "knee_left",
            Self::AnkleLeft => "ankle_left",
            Self::FootLeft => "foot_left",
            Self::HipRight => "hip_right",
            Self::KneeRight => "knee_right",
            Self::AnkleRight => "ankle_right",
            Self::FootRight => "foot_right",
            Self::SpineShoulder => "spine_shoulder",
            Self::HandTipLeft => "hand_tip_left",
            Self::ThumbLeft => "thumb_left",
            Self::HandTipRight => "hand_tip_right",
            Self::ThumbRight => "thumb_right",
        }
    }

    /// Looks up a joint kind by its string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.name() == name)
    }

    /// Returns `true` if this is an arm or hand joint.
    #[must_use]
    pub fn is_upper_limb(&self) -> bool {
        matches!(
            self,
            Self::ShoulderLeft
                | Self::ElbowLeft
                | Self::WristLeft
                | Self::HandLeft
                | Self::HandTipLeft
                | Self::ThumbLeft
                | Self::ShoulderRight
                | Self::ElbowRight
                | Self::WristRight
                | Self::HandRight
                | Self::HandTipRight
                | Self::ThumbRight
        )
    }

    /// Returns `true` if this is a leg or foot joint.
    #[must_use]
    pub fn is_lower_limb(&self) -> bool {
        matches!(
            self,
            Self::HipLeft
                | Self::KneeLeft
                | Self::AnkleLeft
                | Self::FootLeft
                | Self::HipRight
                | Self::KneeRight
                | Self::AnkleRight
                | Self::FootRight
        )
    }
}

impl TryFrom<u8> for JointKind {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        JointKind::all()
            .get(value as usize)
            .copied()
            .ok_or_else(|| CoreError::validation(format!("Invalid joint index: {value}")))
    }
}

impl std::fmt::Display for JointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-joint tracking confidence reported by the sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrackingQuality {
    /// Joint position observed directly
    #[default]
    Tracked,
    /// Joint position estimated from neighboring joints
    Inferred,
    /// Joint not seen this frame; position carries the last known value
    NotTracked,
}

/// One joint's capture for a single frame: position plus tracking quality.
///
/// Positions are populated even when the joint is not confidently tracked,
/// so consumers may use the value regardless of quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointState {
    /// 3-D position, rounded to 4 decimal places
    pub position: Position,
    /// Tracking confidence for this frame
    pub quality: TrackingQuality,
}

impl JointState {
    /// Creates a joint state.
    #[must_use]
    pub const fn new(position: Position, quality: TrackingQuality) -> Self {
        Self { position, quality }
    }

    /// Creates a fully tracked joint state.
    #[must_use]
    pub const fn tracked(position: Position) -> Self {
        Self::new(position, TrackingQuality::Tracked)
    }
}

// =============================================================================
// Frame Types
// =============================================================================

/// One frame's capture for a single tracked body.
///
/// Joints are stored in a fixed array indexed by sensor joint order;
/// a slot is `None` when the sensor delivered nothing for that joint.
#[derive(Debug, Clone, PartialEq)]
pub struct JointSample {
    /// Capture time of the frame
    pub timestamp: DateTime<Utc>,
    /// Per-joint states, indexed by [`JointKind`]
    joints: [Option<JointState>; JOINT_COUNT],
}

impl JointSample {
    /// Creates an empty sample with the given capture time.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            joints: [None; JOINT_COUNT],
        }
    }

    /// Sets a joint state.
    pub fn set_joint(&mut self, kind: JointKind, state: JointState) {
        self.joints[kind as usize] = Some(state);
    }

    /// Builder-style variant of [`set_joint`](Self::set_joint).
    #[must_use]
    pub fn with_joint(mut self, kind: JointKind, state: JointState) -> Self {
        self.set_joint(kind, state);
        self
    }

    /// Gets a joint state by kind.
    #[must_use]
    pub fn joint(&self, kind: JointKind) -> Option<&JointState> {
        self.joints[kind as usize].as_ref()
    }

    /// Gets a joint position by kind, regardless of tracking quality.
    #[must_use]
    pub fn position(&self, kind: JointKind) -> Option<Position> {
        self.joints[kind as usize].map(|state| state.position)
    }

    /// Returns the number of joints present in this frame.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if every listed joint is present in this frame.
    #[must_use]
    pub fn has_joints(&self, kinds: &[JointKind]) -> bool {
        kinds.iter().all(|kind| self.joints[*kind as usize].is_some())
    }
}
