//! Core trait definitions for the gaitphase system.
//!
//! # Traits
//!
//! - [`FrameSource`]: Supply skeleton frames in temporal order
//! - [`Resettable`]: Reset a component to its initial state

use crate::error::CoreResult;
use crate::types::JointSample;

/// A source of skeleton frames.
///
/// Implementations deliver one [`JointSample`] per frame per tracked body,
/// in strict temporal order. A live sensor adapter and a recorded-file
/// replay reader are both frame sources.
///
/// # Example
///
/// ```ignore
/// use gaitphase_core::FrameSource;
///
/// fn drain(source: &mut impl FrameSource) -> gaitphase_core::CoreResult<usize> {
///     let mut frames = 0;
///     while let Some(_sample) = source.next_frame()? {
///         frames += 1;
///     }
///     Ok(frames)
/// }
/// ```
pub trait FrameSource {
    /// Returns the next frame, or `None` when the stream is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source fails or delivers a
    /// malformed frame.
    fn next_frame(&mut self) -> CoreResult<Option<JointSample>>;
}

/// Trait for types that can be reset to a default state.
pub trait Resettable {
    /// Resets the instance to its initial state.
    fn reset(&mut self);
}
