// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! A backend provides three pieces:
//!
//! - **Nodes**: Anything highlighted implements [`Measure`], a live query
//!   for the node's current bounding rectangle in viewport pixels. It is
//!   called once per node per frame, so highlights follow layout changes.
//!
//! - **Surface**: A transparent, full-viewport, non-interactive 2D surface
//!   implementing [`Surface`]. Every drawing call carries its full style;
//!   surfaces keep no pen state between calls.
//!
//! - **Host**: Implements [`Host`] to create surfaces and to run deferred,
//!   fire-once callbacks (e.g. `setTimeout`).
//!
//! # Crate boundaries
//!
//! `limelight_core` owns the session state machine, geometry, and timing.
//! Backend crates depend on `limelight_core` and provide platform glue.

use alloc::boxed::Box;

use kurbo::{Rect, Size};

use crate::error::{HighlightError, InvalidNode, SurfaceError};
use crate::geometry::StrokeStyle;

/// Stacking order for overlay surfaces.
///
/// One below the topmost layer, which is left for other system overlays.
pub const OVERLAY_Z_INDEX: i32 = i32::MAX - 2;

/// A visual-tree node whose bounding rectangle can be queried.
pub trait Measure {
    /// Returns the node's current bounding rectangle in viewport pixels.
    ///
    /// Nodes that are no longer attached to the tree should report a
    /// zero-sized rectangle rather than an error. [`InvalidNode`] skips the
    /// node for the current frame only.
    fn measure(&self) -> Result<Rect, InvalidNode>;
}

/// A fixed rectangle measures as itself.
impl Measure for Rect {
    fn measure(&self) -> Result<Rect, InvalidNode> {
        Ok(*self)
    }
}

impl<T: Measure + ?Sized> Measure for &T {
    fn measure(&self) -> Result<Rect, InvalidNode> {
        (**self).measure()
    }
}

impl<T: Measure + ?Sized> Measure for Box<T> {
    fn measure(&self) -> Result<Rect, InvalidNode> {
        (**self).measure()
    }
}

/// A 2D immediate-mode overlay surface owned by one session.
pub trait Surface {
    /// Returns the surface size in pixels.
    fn size(&self) -> Size;

    /// Clears the entire surface to transparent.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Sets the global opacity (0.0–1.0) for subsequent strokes.
    fn set_opacity(&mut self, alpha: f64) -> Result<(), SurfaceError>;

    /// Strokes the outline of `rect` with `style`.
    ///
    /// `rect` is not normalized: negative widths or heights are passed
    /// through as-is.
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> Result<(), SurfaceError>;

    /// Detaches the surface from the visual tree.
    ///
    /// Calling this on an already removed surface is a no-op.
    fn remove(&mut self);

    /// Returns `true` until [`remove`](Self::remove) has been called.
    fn is_mounted(&self) -> bool;
}

/// Creates overlay surfaces and schedules deferred work.
pub trait Host {
    /// The surface type this host mounts.
    type Surface: Surface;

    /// Creates a new overlay surface sized to the available screen area and
    /// inserts it as the first child of the document root, above all other
    /// content (see [`OVERLAY_Z_INDEX`]).
    fn mount(&self) -> Result<Self::Surface, HighlightError>;

    /// Runs `task` once, no earlier than `delay_ms` milliseconds from now,
    /// passing it the host so it can schedule follow-up work.
    ///
    /// Must not run `task` before returning. Tasks never hold the host
    /// themselves, so a host that drops its pending tasks also drops the
    /// sessions they own.
    fn defer(&self, delay_ms: f64, task: Box<dyn FnOnce(&Self)>);
}
