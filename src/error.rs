//! Error types for the deformation engine.

use core::fmt;

/// Errors surfaced to the host compositor.
///
/// All of these are non-fatal by contract: the host reacts by rendering
/// the window rigidly (undeformed) instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The window is too small for a visible deformation (1x1 or smaller).
    WindowTooSmall,
    /// The window lies entirely outside the screen.
    WindowOffScreen,
    /// The window covers the whole screen; deforming it would expose the
    /// background for no visual gain.
    WindowCoversScreen,
    /// No model exists for the given window id.
    UnknownWindow,
    /// Growing a tessellation buffer failed; the caller should fall back
    /// to rigid rendering for this frame.
    BufferAllocation,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::WindowTooSmall => write!(f, "window too small to deform"),
            EngineError::WindowOffScreen => write!(f, "window entirely off screen"),
            EngineError::WindowCoversScreen => write!(f, "window covers the whole screen"),
            EngineError::UnknownWindow => write!(f, "no model for window id"),
            EngineError::BufferAllocation => write!(f, "tessellation buffer allocation failed"),
        }
    }
}

impl EngineError {
    /// Whether this error is an eligibility verdict rather than a failure;
    /// such windows simply render rigidly.
    pub fn is_ineligible(&self) -> bool {
        matches!(
            self,
            EngineError::WindowTooSmall
                | EngineError::WindowOffScreen
                | EngineError::WindowCoversScreen
        )
    }
}
