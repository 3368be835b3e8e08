// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace output.

use alloc::format;
use alloc::string::String;

use limelight_core::error::HighlightError;
use limelight_core::trace::{
    FrameEvent, NodeSkippedEvent, SessionEndEvent, SessionId, SessionStartEvent, TraceSink,
};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that writes one `console.log` line per event.
///
/// Errors go to `console.error`. Per-frame lines are only written when
/// `frames` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    /// Also log every frame, not just session boundaries and errors.
    pub frames: bool,
}

impl ConsoleSink {
    /// Logs session boundaries, skipped nodes, and errors.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: false }
    }

    /// Logs every frame as well.
    #[must_use]
    pub const fn verbose() -> Self {
        Self { frames: true }
    }
}

pub(crate) fn start_line(e: &SessionStartEvent) -> String {
    format!(
        "[limelight] session={} start nodes={} border={}px duration={}ms surface={}x{}",
        e.session.0,
        e.node_count,
        e.options.border_width,
        e.options.duration_ms,
        e.surface_size.width,
        e.surface_size.height,
    )
}

pub(crate) fn frame_line(e: &FrameEvent) -> String {
    format!(
        "[limelight] session={} frame={} elapsed={:.1}ms opacity={:.3} drawn={} skipped={}",
        e.session.0, e.frame_index, e.elapsed_ms, e.opacity, e.drawn, e.skipped,
    )
}

pub(crate) fn end_line(e: &SessionEndEvent) -> String {
    format!(
        "[limelight] session={} end outcome={:?} frames={} elapsed={:.1}ms",
        e.session.0, e.outcome, e.frames, e.elapsed_ms,
    )
}

fn log(line: &str) {
    web_sys::console::log_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_session_start(&mut self, e: &SessionStartEvent) {
        log(&start_line(e));
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if self.frames {
            log(&frame_line(e));
        }
    }

    fn on_node_skipped(&mut self, e: &NodeSkippedEvent) {
        log(&format!(
            "[limelight] session={} frame={} skipped node={}",
            e.session.0, e.frame_index, e.node_index,
        ));
    }

    fn on_error(&mut self, session: SessionId, error: &HighlightError) {
        web_sys::console::error_1(&JsValue::from_str(&format!(
            "[limelight] session={} error: {error}",
            session.0
        )));
    }

    fn on_session_end(&mut self, e: &SessionEndEvent) {
        log(&end_line(e));
    }
}
