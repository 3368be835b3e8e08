// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The highlight session state machine.
//!
//! A [`HighlightSession`] owns a mounted [`Surface`], the target nodes, and
//! the frame counter. Each call to [`step`](HighlightSession::step) draws one
//! frame:
//!
//! 1. clear the surface,
//! 2. set the global opacity from the linear fade,
//! 3. stroke the three border passes around each node's current rectangle,
//! 4. remove the surface if this was the final frame, otherwise advance the
//!    frame counter and ask for another step after [`TICK_MS`].
//!
//! ```text
//!   Host::mount ──► Mounted(frame 0) ──► Mounted(frame 1) ──► … ──► Finished
//! ```
//!
//! The surface is removed exactly once on every path out of `Mounted`: the
//! final frame, a drawing failure, or dropping the session.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::HighlightError;
use crate::geometry::draw_border;
use crate::host::{Measure, Surface};
use crate::options::HighlightOptions;
use crate::palette::palette_color;
use crate::timing::{TICK_MS, elapsed_ms, is_final_frame, opacity};
use crate::trace::{
    FrameEvent, NodeSkippedEvent, NoopSink, SessionEndEvent, SessionId, SessionOutcome,
    SessionStartEvent, TraceSink, Tracer,
};

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// The surface is in the visual tree and frames are being drawn.
    Mounted,
    /// The surface has been removed. No further frames are drawn.
    Finished,
}

/// Result of a successful [`HighlightSession::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Call `step` again after `delay_ms` milliseconds.
    Continue {
        /// Delay before the next frame.
        delay_ms: f64,
    },
    /// The session is over and the surface has been removed.
    Finished,
}

/// One highlight, from mount to teardown.
pub struct HighlightSession<S: Surface, N: Measure> {
    id: SessionId,
    surface: S,
    nodes: Vec<N>,
    options: HighlightOptions,
    frame: u64,
    state: SessionState,
    sink: Box<dyn TraceSink>,
}

impl<S: Surface, N: Measure> fmt::Debug for HighlightSession<S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighlightSession")
            .field("id", &self.id)
            .field("nodes", &self.nodes.len())
            .field("options", &self.options)
            .field("frame", &self.frame)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, N: Measure> HighlightSession<S, N> {
    /// Creates a session over an already mounted surface.
    #[must_use]
    pub fn new(surface: S, nodes: Vec<N>, options: HighlightOptions) -> Self {
        Self::with_sink(surface, nodes, options, Box::new(NoopSink))
    }

    /// Creates a session that reports to `sink`.
    #[must_use]
    pub fn with_sink(
        surface: S,
        nodes: Vec<N>,
        options: HighlightOptions,
        mut sink: Box<dyn TraceSink>,
    ) -> Self {
        let id = SessionId::next();
        Tracer::new(&mut *sink).session_start(&SessionStartEvent {
            session: id,
            node_count: nodes.len(),
            options,
            surface_size: surface.size(),
        });
        Self {
            id,
            surface,
            nodes,
            options,
            frame: 0,
            state: SessionState::Mounted,
            sink,
        }
    }

    /// Returns this session's id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the index of the next frame to draw.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Returns the elapsed time of the next frame in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        elapsed_ms(self.frame)
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the options in effect.
    #[must_use]
    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// Returns the target nodes.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Returns the surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Draws the next frame.
    ///
    /// After the final frame the surface is removed and [`Step::Finished`]
    /// is returned; further calls do nothing and return `Finished` again.
    ///
    /// On a drawing failure the surface is removed before the error is
    /// returned, and the session is `Finished`.
    pub fn step(&mut self) -> Result<Step, HighlightError> {
        if self.state == SessionState::Finished {
            return Ok(Step::Finished);
        }

        if let Err(e) = self.draw_frame() {
            Tracer::new(&mut *self.sink).error(self.id, &e);
            self.finish(SessionOutcome::Failed);
            return Err(e);
        }

        if is_final_frame(self.frame, self.options.duration_ms) {
            self.finish(SessionOutcome::Completed);
            return Ok(Step::Finished);
        }

        self.frame += 1;
        Ok(Step::Continue { delay_ms: TICK_MS })
    }

    fn draw_frame(&mut self) -> Result<(), HighlightError> {
        let elapsed = elapsed_ms(self.frame);
        let alpha = opacity(elapsed, self.options.duration_ms);
        let mut tracer = Tracer::new(&mut *self.sink);

        self.surface.clear()?;
        self.surface.set_opacity(alpha)?;

        let mut drawn = 0_u32;
        let mut skipped = 0_u32;
        for (index, node) in self.nodes.iter().enumerate() {
            match node.measure() {
                Ok(rect) => {
                    draw_border(
                        &mut self.surface,
                        rect,
                        self.options.border_width,
                        palette_color(index),
                    )?;
                    drawn += 1;
                }
                Err(_) => {
                    skipped += 1;
                    tracer.node_skipped(&NodeSkippedEvent {
                        session: self.id,
                        frame_index: self.frame,
                        node_index: index,
                    });
                }
            }
        }

        tracer.frame(&FrameEvent {
            session: self.id,
            frame_index: self.frame,
            elapsed_ms: elapsed,
            opacity: alpha,
            drawn,
            skipped,
        });
        Ok(())
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        if self.state == SessionState::Finished {
            return;
        }
        self.state = SessionState::Finished;
        self.surface.remove();
        // A dropped session has already advanced past its last drawn frame.
        let frames = match outcome {
            SessionOutcome::Dropped => self.frame,
            SessionOutcome::Completed | SessionOutcome::Failed => self.frame + 1,
        };
        Tracer::new(&mut *self.sink).session_end(&SessionEndEvent {
            session: self.id,
            frames,
            elapsed_ms: elapsed_ms(frames.saturating_sub(1)),
            outcome,
        });
    }
}

impl<S: Surface, N: Measure> Drop for HighlightSession<S, N> {
    fn drop(&mut self) {
        self.finish(SessionOutcome::Dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvalidNode, SurfaceError, SurfaceOp};
    use crate::geometry::StrokeStyle;
    use crate::palette::PALETTE;
    use crate::timing::scheduled_frames;
    use alloc::rc::Rc;
    use core::cell::RefCell;
    use kurbo::{Rect, Size};

    #[derive(Default)]
    struct Log {
        clears: u32,
        alphas: Vec<f64>,
        strokes: Vec<(Rect, StrokeStyle)>,
        removals: u32,
    }

    struct TestSurface {
        log: Rc<RefCell<Log>>,
        mounted: bool,
        fail_stroke_after: Option<usize>,
    }

    impl TestSurface {
        fn new() -> (Self, Rc<RefCell<Log>>) {
            let log = Rc::new(RefCell::new(Log::default()));
            (
                Self {
                    log: Rc::clone(&log),
                    mounted: true,
                    fail_stroke_after: None,
                },
                log,
            )
        }
    }

    impl Surface for TestSurface {
        fn size(&self) -> Size {
            Size::new(800.0, 600.0)
        }

        fn clear(&mut self) -> Result<(), SurfaceError> {
            self.log.borrow_mut().clears += 1;
            Ok(())
        }

        fn set_opacity(&mut self, alpha: f64) -> Result<(), SurfaceError> {
            self.log.borrow_mut().alphas.push(alpha);
            Ok(())
        }

        fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> Result<(), SurfaceError> {
            let mut log = self.log.borrow_mut();
            if self.fail_stroke_after == Some(log.strokes.len()) {
                return Err(SurfaceError::new(SurfaceOp::StrokeRect, "context lost"));
            }
            log.strokes.push((rect, *style));
            Ok(())
        }

        fn remove(&mut self) {
            if self.mounted {
                self.mounted = false;
                self.log.borrow_mut().removals += 1;
            }
        }

        fn is_mounted(&self) -> bool {
            self.mounted
        }
    }

    struct Flaky(bool);

    impl Measure for Flaky {
        fn measure(&self) -> Result<Rect, InvalidNode> {
            if self.0 {
                Ok(Rect::new(0.0, 0.0, 10.0, 10.0))
            } else {
                Err(InvalidNode)
            }
        }
    }

    fn run_to_end<S: Surface, N: Measure>(session: &mut HighlightSession<S, N>) -> u64 {
        let mut continues = 0;
        while let Step::Continue { delay_ms } = session.step().unwrap() {
            assert_eq!(delay_ms, TICK_MS);
            continues += 1;
        }
        continues
    }

    #[test]
    fn first_frame_colors_nodes_in_order() {
        let (surface, log) = TestSurface::new();
        let nodes = alloc::vec![Rect::new(0.0, 0.0, 50.0, 50.0), Rect::new(60.0, 0.0, 90.0, 30.0)];
        let mut session = HighlightSession::new(surface, nodes, HighlightOptions::new());

        assert_eq!(session.step().unwrap(), Step::Continue { delay_ms: TICK_MS });

        let log = log.borrow();
        assert_eq!(log.clears, 1);
        assert_eq!(log.alphas, [1.0]);
        assert_eq!(log.strokes.len(), 6, "three passes per node");
        assert_eq!(log.strokes[2].1.color, PALETTE[0]);
        assert_eq!(log.strokes[5].1.color, PALETTE[1]);
        assert_eq!(log.strokes[2].1.width, 4.0);
    }

    #[test]
    fn default_session_runs_ninety_deferred_frames() {
        let (surface, log) = TestSurface::new();
        let mut session =
            HighlightSession::new(surface, alloc::vec![Rect::ZERO], HighlightOptions::new());

        let continues = run_to_end(&mut session);
        assert_eq!(continues, scheduled_frames(1500));
        assert_eq!(continues, 90);
        assert_eq!(session.state(), SessionState::Finished);
        assert!(!session.surface().is_mounted(), "surface removed after last frame");

        let log = log.borrow();
        assert_eq!(log.clears, 91, "frame 0 plus 90 deferred frames");
        assert_eq!(log.removals, 1);
        assert_eq!(log.alphas.last().copied(), Some(0.0));
        assert!(
            log.alphas.windows(2).all(|w| w[1] <= w[0]),
            "opacity must never rise"
        );
    }

    #[test]
    fn zero_duration_draws_once_then_tears_down() {
        let (surface, log) = TestSurface::new();
        let opts = HighlightOptions::new().with_duration_ms(0);
        let mut session = HighlightSession::new(surface, alloc::vec![Rect::ZERO], opts);

        assert_eq!(session.step().unwrap(), Step::Finished);
        let log = log.borrow();
        assert_eq!(log.alphas, [0.0]);
        assert_eq!(log.strokes.len(), 3);
        assert_eq!(log.removals, 1);
    }

    #[test]
    fn empty_node_set_still_runs_full_duration() {
        let (surface, log) = TestSurface::new();
        let opts = HighlightOptions::new()
            .with_duration_ms(100)
            .with_border_width(2);
        let mut session = HighlightSession::<_, Rect>::new(surface, Vec::new(), opts);

        assert_eq!(run_to_end(&mut session), 6);
        let log = log.borrow();
        assert_eq!(log.clears, 7);
        assert!(log.strokes.is_empty(), "nothing to draw");
        assert_eq!(log.removals, 1);
    }

    #[test]
    fn step_after_finish_is_a_no_op() {
        let (surface, log) = TestSurface::new();
        let opts = HighlightOptions::new().with_duration_ms(0);
        let mut session = HighlightSession::<_, Rect>::new(surface, Vec::new(), opts);

        assert_eq!(session.step().unwrap(), Step::Finished);
        assert_eq!(session.step().unwrap(), Step::Finished);
        drop(session);
        let log = log.borrow();
        assert_eq!(log.clears, 1);
        assert_eq!(log.removals, 1, "removal happens exactly once");
    }

    #[test]
    fn invalid_nodes_are_skipped_but_keep_their_color_slot() {
        let (surface, log) = TestSurface::new();
        let nodes = alloc::vec![Flaky(false), Flaky(true)];
        let mut session = HighlightSession::new(surface, nodes, HighlightOptions::new());

        assert!(matches!(session.step(), Ok(Step::Continue { .. })));
        let log = log.borrow();
        assert_eq!(log.strokes.len(), 3, "only the valid node is drawn");
        assert_eq!(log.strokes[2].1.color, PALETTE[1]);
    }

    #[test]
    fn draw_failure_removes_surface_and_reports_error() {
        let (mut surface, log) = TestSurface::new();
        surface.fail_stroke_after = Some(4);
        let nodes = alloc::vec![Rect::ZERO, Rect::ZERO];
        let mut session = HighlightSession::new(surface, nodes, HighlightOptions::new());

        let err = session.step().unwrap_err();
        assert!(matches!(
            err,
            HighlightError::Surface(SurfaceError {
                op: SurfaceOp::StrokeRect,
                ..
            })
        ));
        assert_eq!(session.state(), SessionState::Finished);
        assert_eq!(log.borrow().removals, 1);
        assert_eq!(session.step().unwrap(), Step::Finished);
    }

    #[test]
    fn dropping_a_mounted_session_removes_the_surface() {
        let (surface, log) = TestSurface::new();
        let mut session =
            HighlightSession::new(surface, alloc::vec![Rect::ZERO], HighlightOptions::new());
        session.step().unwrap();
        assert_eq!(log.borrow().removals, 0);
        drop(session);
        assert_eq!(log.borrow().removals, 1);
    }

    #[test]
    fn nodes_are_measured_every_frame() {
        struct Moving(Rc<RefCell<f64>>);
        impl Measure for Moving {
            fn measure(&self) -> Result<Rect, InvalidNode> {
                let x = *self.0.borrow();
                Ok(Rect::new(x, 0.0, x + 10.0, 10.0))
            }
        }

        let x = Rc::new(RefCell::new(0.0));
        let (surface, log) = TestSurface::new();
        let mut session = HighlightSession::new(
            surface,
            alloc::vec![Moving(Rc::clone(&x))],
            HighlightOptions::new(),
        );
        session.step().unwrap();
        *x.borrow_mut() = 100.0;
        session.step().unwrap();

        let log = log.borrow();
        assert_eq!(log.strokes[0].0.x0, -1.0);
        assert_eq!(log.strokes[3].0.x0, 99.0);
    }
}
