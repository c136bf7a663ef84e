//! # Gaitphase Core
//!
//! Core types and traits for the gaitphase motion tracking system.
//!
//! This crate provides the foundational building blocks used throughout the
//! gaitphase workspace, including:
//!
//! - **Coordinate Types**: [`Coord`] and [`Position`] for exact
//!   fixed-precision joint coordinates with 4 decimal digits of resolution.
//!
//! - **Joint Types**: [`JointKind`], [`JointState`], and [`TrackingQuality`]
//!   for the 25-joint skeleton delivered by the sensor.
//!
//! - **Frame Types**: [`JointSample`], one body's joint capture for a
//!   single frame.
//!
//! - **Traits**: [`FrameSource`] and [`Resettable`], the contracts between
//!   the tracker and its collaborators.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization of joint and quality
//!   enumerations via serde
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use gaitphase_core::{JointKind, JointSample, JointState, Position};
//!
//! let sample = JointSample::new(Utc::now()).with_joint(
//!     JointKind::KneeLeft,
//!     JointState::tracked(Position::from_f64(0.5, -0.4, 2.1)),
//! );
//!
//! assert!(sample.position(JointKind::KneeLeft).is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::{CoreError, CoreResult};
pub use traits::{FrameSource, Resettable};
pub use types::{Coord, JointKind, JointSample, JointState, Position, TrackingQuality};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of joints delivered by the sensor per body
pub const JOINT_COUNT: usize = 25;

/// Prelude module for convenient imports.
///
/// ```rust
/// use gaitphase_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::traits::{FrameSource, Resettable};
    pub use crate::types::{Coord, JointKind, JointSample, JointState, Position, TrackingQuality};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_valid() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_joint_count_matches_enumeration() {
        assert_eq!(JointKind::all().len(), JOINT_COUNT);
    }
}
