// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless host for driving highlight sessions without a browser.
//!
//! - [`VirtualHost`]: a [`Host`] over a virtual millisecond clock. Deferred
//!   tasks run only when the clock is advanced.
//! - [`RecordingSurface`]: a [`Surface`] that records every drawing call into
//!   a shared [`SurfaceLog`], with optional failure injection.
//! - [`ScriptedNode`]: a [`Measure`] whose rectangle can be moved, detached,
//!   or invalidated while a session runs.
//!
//! [`Surface`]: limelight_core::host::Surface
//! [`Measure`]: limelight_core::host::Measure

#![no_std]

extern crate alloc;

mod node;
mod surface;

pub use node::{NodeState, ScriptedNode};
pub use surface::{DrawCommand, FailAt, Frame, RecordingSurface, SurfaceLog, SurfaceProbe};

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::Size;
use limelight_core::error::HighlightError;
use limelight_core::host::Host;

/// Screen size used by [`VirtualHost::new`].
pub const DEFAULT_SCREEN: Size = Size::new(1280.0, 800.0);

struct Pending {
    due_ms: f64,
    seq: u64,
    task: Box<dyn FnOnce(&VirtualHost)>,
}

struct HostInner {
    screen: Size,
    now_ms: Cell<f64>,
    seq: Cell<u64>,
    queue: RefCell<Vec<Pending>>,
    surfaces: RefCell<Vec<SurfaceProbe>>,
    mount_error: RefCell<Option<HighlightError>>,
    next_fail: Cell<Option<FailAt>>,
}

/// A [`Host`] driven by a virtual clock.
///
/// Clones share the same clock, queue, and surface list. Dropping the last
/// clone drops every pending task, which tears down the sessions they own.
#[derive(Clone)]
pub struct VirtualHost {
    inner: Rc<HostInner>,
}

impl fmt::Debug for VirtualHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualHost")
            .field("now_ms", &self.inner.now_ms.get())
            .field("pending", &self.pending())
            .field("surfaces", &self.inner.surfaces.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Default for VirtualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualHost {
    /// Creates a host with a [`DEFAULT_SCREEN`]-sized screen at time 0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_screen(DEFAULT_SCREEN)
    }

    /// Creates a host whose surfaces are `screen` sized.
    #[must_use]
    pub fn with_screen(screen: Size) -> Self {
        Self {
            inner: Rc::new(HostInner {
                screen,
                now_ms: Cell::new(0.0),
                seq: Cell::new(0),
                queue: RefCell::new(Vec::new()),
                surfaces: RefCell::new(Vec::new()),
                mount_error: RefCell::new(None),
                next_fail: Cell::new(None),
            }),
        }
    }

    /// Makes the next [`mount`](Host::mount) fail with `error`.
    pub fn fail_next_mount(&self, error: HighlightError) {
        *self.inner.mount_error.borrow_mut() = Some(error);
    }

    /// Makes the next mounted surface fail at `fail`.
    pub fn fail_next_surface(&self, fail: FailAt) {
        self.inner.next_fail.set(Some(fail));
    }

    /// Returns the current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.inner.now_ms.get()
    }

    /// Returns the number of deferred tasks not yet run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    /// Returns probes for every surface mounted so far, in mount order.
    #[must_use]
    pub fn surfaces(&self) -> Vec<SurfaceProbe> {
        self.inner.surfaces.borrow().clone()
    }

    /// Returns the number of surfaces currently mounted.
    #[must_use]
    pub fn mounted_surfaces(&self) -> usize {
        self.inner
            .surfaces
            .borrow()
            .iter()
            .filter(|s| s.is_mounted())
            .count()
    }

    /// Runs the earliest due task, moving the clock forward to its due time.
    ///
    /// Ties run in scheduling order. Returns `false` if nothing was queued.
    pub fn run_next(&self) -> bool {
        let next = {
            let mut queue = self.inner.queue.borrow_mut();
            let earliest = queue
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
                .map(|(i, _)| i);
            earliest.map(|i| queue.remove(i))
        };
        let Some(pending) = next else {
            return false;
        };
        if pending.due_ms > self.now_ms() {
            self.inner.now_ms.set(pending.due_ms);
        }
        (pending.task)(self);
        true
    }

    /// Advances the clock by `ms`, running every task that falls due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, ms: f64) -> usize {
        let target = self.now_ms() + ms;
        let mut ran = 0;
        while self.next_due().is_some_and(|due| due <= target) {
            self.run_next();
            ran += 1;
        }
        self.inner.now_ms.set(target);
        ran
    }

    /// Runs tasks until the queue is empty. Returns the number run.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }

    fn next_due(&self) -> Option<f64> {
        self.inner
            .queue
            .borrow()
            .iter()
            .map(|p| p.due_ms)
            .min_by(f64::total_cmp)
    }
}

impl Host for VirtualHost {
    type Surface = RecordingSurface;

    fn mount(&self) -> Result<RecordingSurface, HighlightError> {
        if let Some(err) = self.inner.mount_error.borrow_mut().take() {
            return Err(err);
        }
        let mut surface = RecordingSurface::new(self.inner.screen, self.now_ms());
        if let Some(fail) = self.inner.next_fail.take() {
            surface.fail_at(fail);
        }
        self.inner.surfaces.borrow_mut().push(surface.probe());
        Ok(surface)
    }

    fn defer(&self, delay_ms: f64, task: Box<dyn FnOnce(&Self)>) {
        let seq = self.inner.seq.get();
        self.inner.seq.set(seq + 1);
        self.inner.queue.borrow_mut().push(Pending {
            due_ms: self.now_ms() + delay_ms.max(0.0),
            seq,
            task,
        });
    }
}

/// Host error helper for tests that need a mount failure.
#[must_use]
pub fn mount_error(message: &str) -> HighlightError {
    HighlightError::Mount(message.to_string())
}
