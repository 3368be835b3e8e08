// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! - [`InvalidNode`] is a per-node, per-frame skip signal. It never ends a
//!   session.
//! - [`SurfaceError`] is a failure reported by the host's drawing API.
//! - [`HighlightError`] is what [`highlight`](crate::highlight()) returns
//!   when mounting or the first frame fails. Failures on later frames are
//!   delivered to the session's [`TraceSink`](crate::trace::TraceSink).

use alloc::string::String;
use core::fmt;

/// A node whose bounding rectangle could not be queried this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InvalidNode;

impl fmt::Display for InvalidNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("node bounding rectangle is unavailable")
    }
}

impl core::error::Error for InvalidNode {}

/// Which surface operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceOp {
    /// Clearing the whole surface.
    Clear,
    /// Setting the global opacity.
    SetOpacity,
    /// Stroking a rectangle.
    StrokeRect,
}

impl SurfaceOp {
    /// Returns a short label for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::SetOpacity => "set_opacity",
            Self::StrokeRect => "stroke_rect",
        }
    }
}

/// A failure reported by a [`Surface`](crate::host::Surface).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceError {
    /// The operation that failed.
    pub op: SurfaceOp,
    /// Host-provided description.
    pub message: String,
}

impl SurfaceError {
    /// Creates a new surface error.
    #[must_use]
    pub fn new(op: SurfaceOp, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface {} failed: {}", self.op.as_str(), self.message)
    }
}

impl core::error::Error for SurfaceError {}

/// Errors from starting or running a highlight session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HighlightError {
    /// The host could not create or insert the overlay surface.
    Mount(String),
    /// A drawing call failed. The surface has already been removed.
    Surface(SurfaceError),
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mount(msg) => write!(f, "overlay mount failed: {msg}"),
            Self::Surface(e) => write!(f, "overlay draw failed: {e}"),
        }
    }
}

impl core::error::Error for HighlightError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Mount(_) => None,
            Self::Surface(e) => Some(e),
        }
    }
}

impl From<SurfaceError> for HighlightError {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use core::error::Error as _;

    #[test]
    fn display_messages() {
        let e = HighlightError::Mount("no document".into());
        assert_eq!(e.to_string(), "overlay mount failed: no document");

        let e: HighlightError = SurfaceError::new(SurfaceOp::StrokeRect, "context lost").into();
        assert_eq!(
            e.to_string(),
            "overlay draw failed: surface stroke_rect failed: context lost"
        );
        assert!(e.source().is_some(), "surface errors expose their source");
    }
}
