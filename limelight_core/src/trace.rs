// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for highlight sessions.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! session calls as it runs. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use kurbo::Size;

use crate::error::HighlightError;
use crate::options::HighlightOptions;

// ---------------------------------------------------------------------------
// Identifiers and enums
// ---------------------------------------------------------------------------

/// Identifies one highlight session within the process.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Returns a fresh, process-unique id.
    #[must_use]
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionOutcome {
    /// The final frame was drawn and the surface removed.
    Completed,
    /// A drawing call failed; the surface was removed early.
    Failed,
    /// The session was dropped before its final frame.
    Dropped,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once, after the surface is mounted and before the first frame.
#[derive(Clone, Copy, Debug)]
pub struct SessionStartEvent {
    /// Session being started.
    pub session: SessionId,
    /// Number of target nodes.
    pub node_count: usize,
    /// Options in effect.
    pub options: HighlightOptions,
    /// Size of the mounted surface.
    pub surface_size: Size,
}

/// Emitted after every drawn frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameEvent {
    /// Session the frame belongs to.
    pub session: SessionId,
    /// Frame counter, starting at 0.
    pub frame_index: u64,
    /// Elapsed session time in milliseconds.
    pub elapsed_ms: f64,
    /// Global opacity used for the frame.
    pub opacity: f64,
    /// Nodes drawn.
    pub drawn: u32,
    /// Nodes skipped because their rectangle was unavailable.
    pub skipped: u32,
}

/// Emitted for each node skipped in a frame.
#[derive(Clone, Copy, Debug)]
pub struct NodeSkippedEvent {
    /// Session the frame belongs to.
    pub session: SessionId,
    /// Frame counter.
    pub frame_index: u64,
    /// Position of the node in the target set.
    pub node_index: usize,
}

/// Emitted once when the surface has been removed.
#[derive(Clone, Copy, Debug)]
pub struct SessionEndEvent {
    /// Session that ended.
    pub session: SessionId,
    /// Frames drawn or attempted, including frame 0.
    pub frames: u64,
    /// Elapsed session time of the last such frame in milliseconds.
    pub elapsed_ms: f64,
    /// Why the session ended.
    pub outcome: SessionOutcome,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from highlight sessions.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a session starts.
    fn on_session_start(&mut self, e: &SessionStartEvent) {
        _ = e;
    }

    /// Called after each frame is drawn.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a node is skipped for a frame.
    fn on_node_skipped(&mut self, e: &NodeSkippedEvent) {
        _ = e;
    }

    /// Called when a frame fails to draw.
    fn on_error(&mut self, session: SessionId, error: &HighlightError) {
        _ = (session, error);
    }

    /// Called when a session ends.
    fn on_session_end(&mut self, e: &SessionEndEvent) {
        _ = e;
    }
}

impl<T: TraceSink + ?Sized> TraceSink for alloc::boxed::Box<T> {
    fn on_session_start(&mut self, e: &SessionStartEvent) {
        (**self).on_session_start(e);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        (**self).on_frame(e);
    }

    fn on_node_skipped(&mut self, e: &NodeSkippedEvent) {
        (**self).on_node_skipped(e);
    }

    fn on_error(&mut self, session: SessionId, error: &HighlightError) {
        (**self).on_error(session, error);
    }

    fn on_session_end(&mut self, e: &SessionEndEvent) {
        (**self).on_session_end(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`SessionStartEvent`].
    #[inline]
    pub fn session_start(&mut self, e: &SessionStartEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_session_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`NodeSkippedEvent`].
    #[inline]
    pub fn node_skipped(&mut self, e: &NodeSkippedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_node_skipped(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Reports a drawing failure.
    #[inline]
    pub fn error(&mut self, session: SessionId, error: &HighlightError) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_error(session, error);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (session, error);
        }
    }

    /// Emits a [`SessionEndEvent`].
    #[inline]
    pub fn session_end(&mut self, e: &SessionEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_session_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
