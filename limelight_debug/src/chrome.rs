// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each session becomes its own track (`tid` is the session id). Frames are
//! complete (`"X"`) events one tick long; everything else is an instant.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::collections::HashMap;
use std::io::{self, Write};

use limelight_core::timing::{TICK_MS, elapsed_ms};
use limelight_core::trace::SessionId;
use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are microseconds since the start of each event's session.
/// Errors carry no timestamp of their own and are placed at the last frame
/// seen for their session.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut last_frame_ms: HashMap<SessionId, f64> = HashMap::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::SessionStart(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "SessionStart",
                    "cat": "Session",
                    "ts": 0.0,
                    "pid": 0,
                    "tid": e.session.0,
                    "s": "t",
                    "args": {
                        "node_count": e.node_count,
                        "border_width": e.options.border_width,
                        "duration_ms": e.options.duration_ms,
                        "surface_width": e.surface_size.width,
                        "surface_height": e.surface_size.height,
                    }
                }));
            }
            RecordedEvent::Frame(e) => {
                last_frame_ms.insert(e.session, e.elapsed_ms);
                events.push(json!({
                    "ph": "X",
                    "name": "Frame",
                    "cat": "Frame",
                    "ts": ms_to_us(e.elapsed_ms),
                    "dur": ms_to_us(TICK_MS),
                    "pid": 0,
                    "tid": e.session.0,
                    "args": {
                        "frame_index": e.frame_index,
                        "opacity": e.opacity,
                        "drawn": e.drawn,
                        "skipped": e.skipped,
                    }
                }));
            }
            RecordedEvent::NodeSkipped(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "NodeSkipped",
                    "cat": "Frame",
                    "ts": ms_to_us(elapsed_ms(e.frame_index)),
                    "pid": 0,
                    "tid": e.session.0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "node_index": e.node_index,
                    }
                }));
            }
            RecordedEvent::Error { session, message } => {
                let at = last_frame_ms.get(&session).copied().unwrap_or(0.0);
                events.push(json!({
                    "ph": "i",
                    "name": "Error",
                    "cat": "Session",
                    "ts": ms_to_us(at),
                    "pid": 0,
                    "tid": session.0,
                    "s": "t",
                    "args": { "message": message }
                }));
            }
            RecordedEvent::SessionEnd(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "SessionEnd",
                    "cat": "Session",
                    "ts": ms_to_us(e.elapsed_ms),
                    "pid": 0,
                    "tid": e.session.0,
                    "s": "t",
                    "args": {
                        "frames": e.frames,
                        "outcome": format!("{:?}", e.outcome),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(&mut *writer, &events).map_err(io::Error::other)?;
    writer.flush()
}

fn ms_to_us(ms: f64) -> f64 {
    ms * 1000.0
}
