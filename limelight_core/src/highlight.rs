// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `highlight` entry point.
//!
//! [`highlight`] mounts a surface, draws frame 0 synchronously and returns.
//! Every later frame runs from a callback registered with
//! [`Host::defer`]; the callback owns the session, draws one frame, and
//! registers the next callback through the host it is handed. Frames
//! therefore run one at a time, in order, and never nest on the call stack.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::HighlightError;
use crate::host::{Host, Measure};
use crate::options::HighlightOptions;
use crate::session::{HighlightSession, Step};
use crate::trace::{NoopSink, TraceSink};

/// Highlights `nodes` on a new overlay surface from `host`.
///
/// Returns once the first frame is drawn. The surface is removed by the
/// host's deferred callbacks after `options.duration_ms`.
///
/// Each call is an independent session. Calling this again while an earlier
/// session is still running mounts a second surface next to the first;
/// sessions cannot be cancelled.
///
/// # Errors
///
/// Returns an error if the host cannot mount a surface or if drawing the
/// first frame fails (the surface is removed in that case). Failures on
/// later frames stop the session and are reported to its trace sink only;
/// see [`highlight_traced`].
pub fn highlight<H, N>(
    host: &H,
    nodes: Vec<N>,
    options: HighlightOptions,
) -> Result<(), HighlightError>
where
    H: Host + 'static,
    H::Surface: 'static,
    N: Measure + 'static,
{
    highlight_traced(host, nodes, options, Box::new(NoopSink))
}

/// Like [`highlight`], reporting session events to `sink`.
///
/// # Errors
///
/// See [`highlight`].
pub fn highlight_traced<H, N>(
    host: &H,
    nodes: Vec<N>,
    options: HighlightOptions,
    sink: Box<dyn TraceSink>,
) -> Result<(), HighlightError>
where
    H: Host + 'static,
    H::Surface: 'static,
    N: Measure + 'static,
{
    let surface = host.mount()?;
    let mut session = HighlightSession::with_sink(surface, nodes, options, sink);
    if let Step::Continue { delay_ms } = session.step()? {
        defer_step(host, session, delay_ms);
    }
    Ok(())
}

fn defer_step<H, N>(host: &H, mut session: HighlightSession<H::Surface, N>, delay_ms: f64)
where
    H: Host + 'static,
    H::Surface: 'static,
    N: Measure + 'static,
{
    host.defer(
        delay_ms,
        Box::new(move |host: &H| {
            // Errors were already reported to the sink and the surface removed.
            if let Ok(Step::Continue { delay_ms }) = session.step() {
                defer_step(host, session, delay_ms);
            }
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurfaceError;
    use crate::geometry::StrokeStyle;
    use crate::host::Surface;
    use alloc::collections::VecDeque;
    use alloc::rc::Rc;
    use core::cell::{Cell, RefCell};
    use kurbo::{Rect, Size};

    type Task<H> = Box<dyn FnOnce(&H)>;

    /// Surface that only counts frames and removals.
    struct CountingSurface {
        frames: Rc<Cell<u32>>,
        removals: Rc<Cell<u32>>,
        mounted: bool,
    }

    impl Surface for CountingSurface {
        fn size(&self) -> Size {
            Size::new(100.0, 100.0)
        }

        fn clear(&mut self) -> Result<(), SurfaceError> {
            self.frames.set(self.frames.get() + 1);
            Ok(())
        }

        fn set_opacity(&mut self, _alpha: f64) -> Result<(), SurfaceError> {
            Ok(())
        }

        fn stroke_rect(&mut self, _rect: Rect, _style: &StrokeStyle) -> Result<(), SurfaceError> {
            Ok(())
        }

        fn remove(&mut self) {
            if self.mounted {
                self.mounted = false;
                self.removals.set(self.removals.get() + 1);
            }
        }

        fn is_mounted(&self) -> bool {
            self.mounted
        }
    }

    #[derive(Default)]
    struct QueueHost {
        queue: Rc<RefCell<VecDeque<(f64, Task<Self>)>>>,
        frames: Rc<Cell<u32>>,
        removals: Rc<Cell<u32>>,
        mounts: Rc<Cell<u32>>,
    }

    impl QueueHost {
        /// Runs queued tasks in order, returning how many ran.
        fn drain(&self) -> u32 {
            let mut ran = 0;
            loop {
                let next = self.queue.borrow_mut().pop_front();
                let Some((_, task)) = next else { break };
                task(self);
                ran += 1;
            }
            ran
        }

        /// Runs the oldest queued task, if any.
        fn drain_one(&self) {
            let next = self.queue.borrow_mut().pop_front();
            if let Some((_, task)) = next {
                task(self);
            }
        }
    }

    impl Host for QueueHost {
        type Surface = CountingSurface;

        fn mount(&self) -> Result<CountingSurface, HighlightError> {
            self.mounts.set(self.mounts.get() + 1);
            Ok(CountingSurface {
                frames: Rc::clone(&self.frames),
                removals: Rc::clone(&self.removals),
                mounted: true,
            })
        }

        fn defer(&self, delay_ms: f64, task: Task<Self>) {
            self.queue.borrow_mut().push_back((delay_ms, task));
        }
    }

    #[test]
    fn first_frame_is_synchronous_and_rest_are_deferred() {
        let host = QueueHost::default();
        highlight(&host, alloc::vec![Rect::ZERO], HighlightOptions::new()).unwrap();

        assert_eq!(host.frames.get(), 1, "frame 0 runs before returning");
        assert_eq!(host.queue.borrow().len(), 1, "one continuation pending");
        assert_eq!(host.removals.get(), 0);

        assert_eq!(host.drain(), 90);
        assert_eq!(host.frames.get(), 91);
        assert_eq!(host.removals.get(), 1);
    }

    #[test]
    fn zero_duration_schedules_nothing() {
        let host = QueueHost::default();
        let opts = HighlightOptions::new().with_duration_ms(0);
        highlight(&host, alloc::vec![Rect::ZERO], opts).unwrap();

        assert!(host.queue.borrow().is_empty());
        assert_eq!(host.frames.get(), 1);
        assert_eq!(host.removals.get(), 1);
    }

    #[test]
    fn concurrent_sessions_coexist() {
        let host = QueueHost::default();
        let opts = HighlightOptions::new().with_duration_ms(50);
        highlight::<_, Rect>(&host, Vec::new(), opts).unwrap();
        highlight::<_, Rect>(&host, Vec::new(), opts).unwrap();

        assert_eq!(host.mounts.get(), 2);
        assert_eq!(host.drain(), 6, "three deferred frames per session");
        assert_eq!(host.removals.get(), 2);
    }

    #[test]
    fn discarding_pending_tasks_tears_sessions_down() {
        let host = QueueHost::default();
        highlight(&host, alloc::vec![Rect::ZERO], HighlightOptions::new()).unwrap();
        host.drain_one();
        assert_eq!(host.removals.get(), 0);

        host.queue.borrow_mut().clear();
        assert_eq!(host.removals.get(), 1, "dropped task removes its surface");
    }

    #[test]
    fn mount_failure_is_returned() {
        struct NoDocument;

        impl Host for NoDocument {
            type Surface = CountingSurface;

            fn mount(&self) -> Result<CountingSurface, HighlightError> {
                Err(HighlightError::Mount("no document".into()))
            }

            fn defer(&self, _delay_ms: f64, _task: Task<Self>) {
                unreachable!("nothing is scheduled without a surface");
            }
        }

        let err = highlight::<_, Rect>(&NoDocument, Vec::new(), HighlightOptions::new());
        assert_eq!(err, Err(HighlightError::Mount("no document".into())));
    }
}
