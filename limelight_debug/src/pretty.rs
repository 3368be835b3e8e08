// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use limelight_core::error::HighlightError;
use limelight_core::trace::{
    FrameEvent, NodeSkippedEvent, SessionEndEvent, SessionId, SessionStartEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_session_start(&mut self, e: &SessionStartEvent) {
        let _ = writeln!(
            self.writer,
            "[start] session={} nodes={} border={}px duration={}ms surface={}x{}",
            e.session.0,
            e.node_count,
            e.options.border_width,
            e.options.duration_ms,
            e.surface_size.width,
            e.surface_size.height,
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] session={} frame={} elapsed={:.2}ms opacity={:.3} drawn={} skipped={}",
            e.session.0, e.frame_index, e.elapsed_ms, e.opacity, e.drawn, e.skipped,
        );
    }

    fn on_node_skipped(&mut self, e: &NodeSkippedEvent) {
        let _ = writeln!(
            self.writer,
            "[skip] session={} frame={} node={}",
            e.session.0, e.frame_index, e.node_index,
        );
    }

    fn on_error(&mut self, session: SessionId, error: &HighlightError) {
        let _ = writeln!(self.writer, "[error] session={} {error}", session.0);
    }

    fn on_session_end(&mut self, e: &SessionEndEvent) {
        let _ = writeln!(
            self.writer,
            "[end] session={} outcome={:?} frames={} elapsed={:.2}ms",
            e.session.0, e.outcome, e.frames, e.elapsed_ms,
        );
    }
}
