// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording surface.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::{Rect, Size};
use limelight_core::error::{SurfaceError, SurfaceOp};
use limelight_core::geometry::StrokeStyle;
use limelight_core::host::Surface;
use limelight_core::palette::Color;

/// One recorded surface call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Surface::clear`].
    Clear,
    /// [`Surface::set_opacity`].
    SetOpacity(f64),
    /// [`Surface::stroke_rect`].
    StrokeRect(Rect, StrokeStyle),
}

/// Makes the `call`-th (zero-based) invocation of `op` fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FailAt {
    /// Operation to fail.
    pub op: SurfaceOp,
    /// Zero-based index among calls of `op`.
    pub call: usize,
}

/// Everything that happened to one surface.
#[derive(Clone, Debug, Default)]
pub struct SurfaceLog {
    /// Size the surface was created with.
    pub size: Size,
    /// Virtual time of the mount.
    pub mounted_at_ms: f64,
    /// Recorded drawing calls, in order. Failed calls are not recorded.
    pub commands: Vec<DrawCommand>,
    /// How many times the surface was actually detached.
    pub removals: u32,
    /// Whether the surface is still in the tree.
    pub mounted: bool,
    calls: [usize; 3],
}

/// The calls between two clears.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Opacity set during the frame, if any.
    pub opacity: Option<f64>,
    /// Stroked rectangles in order.
    pub strokes: Vec<(Rect, StrokeStyle)>,
}

impl Frame {
    /// Returns the colour of every main border pass (every third stroke).
    #[must_use]
    pub fn main_colors(&self) -> Vec<Color> {
        self.strokes
            .iter()
            .skip(2)
            .step_by(3)
            .map(|(_, style)| style.color)
            .collect()
    }
}

/// Shared read access to a [`RecordingSurface`]'s log.
#[derive(Clone)]
pub struct SurfaceProbe(Rc<RefCell<SurfaceLog>>);

impl fmt::Debug for SurfaceProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let log = self.0.borrow();
        f.debug_struct("SurfaceProbe")
            .field("mounted", &log.mounted)
            .field("commands", &log.commands.len())
            .finish_non_exhaustive()
    }
}

impl SurfaceProbe {
    /// Returns `true` while the surface is in the tree.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.0.borrow().mounted
    }

    /// Returns the number of actual removals (0 or 1 for a correct session).
    #[must_use]
    pub fn removals(&self) -> u32 {
        self.0.borrow().removals
    }

    /// Returns the surface size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.0.borrow().size
    }

    /// Returns the virtual time the surface was mounted at.
    #[must_use]
    pub fn mounted_at_ms(&self) -> f64 {
        self.0.borrow().mounted_at_ms
    }

    /// Returns a copy of the raw command list.
    #[must_use]
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.0.borrow().commands.clone()
    }

    /// Returns the recorded frames. Each [`DrawCommand::Clear`] starts one.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        let log = self.0.borrow();
        let mut frames: Vec<Frame> = Vec::new();
        for cmd in &log.commands {
            match *cmd {
                DrawCommand::Clear => frames.push(Frame::default()),
                DrawCommand::SetOpacity(alpha) => {
                    if let Some(frame) = frames.last_mut() {
                        frame.opacity = Some(alpha);
                    }
                }
                DrawCommand::StrokeRect(rect, style) => {
                    if let Some(frame) = frames.last_mut() {
                        frame.strokes.push((rect, style));
                    }
                }
            }
        }
        frames
    }
}

/// A [`Surface`] that records its calls.
pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
    fail: Option<FailAt>,
}

impl fmt::Debug for RecordingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSurface")
            .field("mounted", &self.log.borrow().mounted)
            .field("fail", &self.fail)
            .finish_non_exhaustive()
    }
}

impl RecordingSurface {
    /// Creates a mounted surface.
    #[must_use]
    pub fn new(size: Size, mounted_at_ms: f64) -> Self {
        Self {
            log: Rc::new(RefCell::new(SurfaceLog {
                size,
                mounted_at_ms,
                mounted: true,
                ..SurfaceLog::default()
            })),
            fail: None,
        }
    }

    /// Injects a failure.
    pub fn fail_at(&mut self, fail: FailAt) {
        self.fail = Some(fail);
    }

    /// Returns a probe sharing this surface's log.
    #[must_use]
    pub fn probe(&self) -> SurfaceProbe {
        SurfaceProbe(Rc::clone(&self.log))
    }

    fn record(&mut self, op: SurfaceOp, cmd: DrawCommand) -> Result<(), SurfaceError> {
        let mut log = self.log.borrow_mut();
        let slot = match op {
            SurfaceOp::Clear => 0,
            SurfaceOp::SetOpacity => 1,
            SurfaceOp::StrokeRect => 2,
        };
        let call = log.calls[slot];
        log.calls[slot] += 1;
        if self.fail == Some(FailAt { op, call }) {
            return Err(SurfaceError::new(op, "injected failure"));
        }
        log.commands.push(cmd);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.log.borrow().size
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Clear, DrawCommand::Clear)
    }

    fn set_opacity(&mut self, alpha: f64) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::SetOpacity, DrawCommand::SetOpacity(alpha))
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::StrokeRect, DrawCommand::StrokeRect(rect, *style))
    }

    fn remove(&mut self) {
        let mut log = self.log.borrow_mut();
        if log.mounted {
            log.mounted = false;
            log.removals += 1;
        }
    }

    fn is_mounted(&self) -> bool {
        self.log.borrow().mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limelight_core::palette::PALETTE;

    #[test]
    fn remove_twice_is_a_no_op() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0), 0.0);
        let probe = surface.probe();
        surface.remove();
        surface.remove();
        assert!(!surface.is_mounted());
        assert_eq!(probe.removals(), 1);
    }

    #[test]
    fn frames_split_on_clear() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0), 0.0);
        let style = StrokeStyle::solid(4.0, PALETTE[3]);
        surface.clear().unwrap();
        surface.set_opacity(1.0).unwrap();
        surface.stroke_rect(Rect::ZERO, &StrokeStyle::HAIRLINE).unwrap();
        surface.stroke_rect(Rect::ZERO, &StrokeStyle::HAIRLINE).unwrap();
        surface.stroke_rect(Rect::ZERO, &style).unwrap();
        surface.clear().unwrap();

        let frames = surface.probe().frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].opacity, Some(1.0));
        assert_eq!(frames[0].main_colors(), [PALETTE[3]]);
        assert_eq!(frames[1], Frame::default());
    }

    #[test]
    fn injected_failure_hits_only_the_chosen_call() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0), 0.0);
        surface.fail_at(FailAt {
            op: SurfaceOp::SetOpacity,
            call: 1,
        });
        assert!(surface.set_opacity(1.0).is_ok());
        let err = surface.set_opacity(0.5).unwrap_err();
        assert_eq!(err.op, SurfaceOp::SetOpacity);
        assert!(surface.set_opacity(0.25).is_ok());
        assert_eq!(surface.probe().commands().len(), 2);
    }
}
