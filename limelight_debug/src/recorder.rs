// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a shared
//! byte buffer as little-endian records. [`decode`] reads them back as an
//! iterator of [`RecordedEvent`].
//!
//! A session owns its sink, so clones of a [`RecorderSink`] share one
//! buffer: hand a clone to the session and read the bytes from the original.
//! Errors are stored as their display text.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use limelight_core::error::HighlightError;
use limelight_core::options::HighlightOptions;
use limelight_core::trace::{
    FrameEvent, NodeSkippedEvent, SessionEndEvent, SessionId, SessionOutcome, SessionStartEvent,
    TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_SESSION_START: u8 = 1;
const TAG_FRAME: u8 = 2;
const TAG_NODE_SKIPPED: u8 = 3;
const TAG_ERROR: u8 = 4;
const TAG_SESSION_END: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the bytes recorded so far by this recorder and its
    /// clones.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.buf.borrow().clone()
    }

    /// Returns the number of recorded bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.borrow_mut().push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.borrow_mut().extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.borrow_mut().extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_len(&mut self, v: usize) {
        self.write_u32(saturate_u32(v));
    }

    fn write_str(&mut self, s: &str) {
        let len = saturate_u32(s.len());
        self.write_u32(len);
        let bytes = s.as_bytes();
        let end = usize::try_from(len).map_or(bytes.len(), |n| n.min(bytes.len()));
        self.buf.borrow_mut().extend_from_slice(&bytes[..end]);
    }

    fn write_outcome(&mut self, outcome: SessionOutcome) {
        self.write_u8(match outcome {
            SessionOutcome::Completed => 0,
            SessionOutcome::Failed => 1,
            SessionOutcome::Dropped => 2,
        });
    }
}

fn saturate_u32(v: usize) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

impl TraceSink for RecorderSink {
    fn on_session_start(&mut self, e: &SessionStartEvent) {
        self.write_u8(TAG_SESSION_START);
        self.write_u64(e.session.0);
        self.write_len(e.node_count);
        self.write_u32(e.options.border_width);
        self.write_u32(e.options.duration_ms);
        self.write_f64(e.surface_size.width);
        self.write_f64(e.surface_size.height);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_u64(e.session.0);
        self.write_u64(e.frame_index);
        self.write_f64(e.elapsed_ms);
        self.write_f64(e.opacity);
        self.write_u32(e.drawn);
        self.write_u32(e.skipped);
    }

    fn on_node_skipped(&mut self, e: &NodeSkippedEvent) {
        self.write_u8(TAG_NODE_SKIPPED);
        self.write_u64(e.session.0);
        self.write_u64(e.frame_index);
        self.write_len(e.node_index);
    }

    fn on_error(&mut self, session: SessionId, error: &HighlightError) {
        self.write_u8(TAG_ERROR);
        self.write_u64(session.0);
        self.write_str(&error.to_string());
    }

    fn on_session_end(&mut self, e: &SessionEndEvent) {
        self.write_u8(TAG_SESSION_END);
        self.write_u64(e.session.0);
        self.write_u64(e.frames);
        self.write_f64(e.elapsed_ms);
        self.write_outcome(e.outcome);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`SessionStartEvent`].
    SessionStart(SessionStartEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
    /// A [`NodeSkippedEvent`].
    NodeSkipped(NodeSkippedEvent),
    /// An error reported to the sink.
    Error {
        /// Session that failed.
        session: SessionId,
        /// The error's display text.
        message: String,
    },
    /// A [`SessionEndEvent`].
    SessionEnd(SessionEndEvent),
}

impl RecordedEvent {
    /// Returns the session the event belongs to.
    #[must_use]
    pub fn session(&self) -> SessionId {
        match self {
            Self::SessionStart(e) => e.session,
            Self::Frame(e) => e.session,
            Self::NodeSkipped(e) => e.session,
            Self::Error { session, .. } => *session,
            Self::SessionEnd(e) => e.session,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take(&mut self, n: usize) -> Option<&[u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }

    fn read_u32(&mut self) -> Option<u32> {
        let bytes = self.take(4)?;
        Some(u32::from_le_bytes(bytes.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        let bytes = self.take(8)?;
        Some(u64::from_le_bytes(bytes.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_len(&mut self) -> Option<usize> {
        self.read_u32().and_then(|v| usize::try_from(v).ok())
    }

    fn read_string(&mut self) -> Option<String> {
        let len = self.read_len()?;
        let bytes = self.take(len)?;
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    fn read_outcome(&mut self) -> Option<SessionOutcome> {
        match self.read_u8()? {
            0 => Some(SessionOutcome::Completed),
            1 => Some(SessionOutcome::Failed),
            2 => Some(SessionOutcome::Dropped),
            _ => None,
        }
    }

    fn decode_session_start(&mut self) -> Option<RecordedEvent> {
        let session = SessionId(self.read_u64()?);
        let node_count = self.read_len()?;
        let options = HighlightOptions::new()
            .with_border_width(self.read_u32()?)
            .with_duration_ms(self.read_u32()?);
        let surface_size = Size::new(self.read_f64()?, self.read_f64()?);
        Some(RecordedEvent::SessionStart(SessionStartEvent {
            session,
            node_count,
            options,
            surface_size,
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            session: SessionId(self.read_u64()?),
            frame_index: self.read_u64()?,
            elapsed_ms: self.read_f64()?,
            opacity: self.read_f64()?,
            drawn: self.read_u32()?,
            skipped: self.read_u32()?,
        }))
    }

    fn decode_node_skipped(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::NodeSkipped(NodeSkippedEvent {
            session: SessionId(self.read_u64()?),
            frame_index: self.read_u64()?,
            node_index: self.read_len()?,
        }))
    }

    fn decode_error(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Error {
            session: SessionId(self.read_u64()?),
            message: self.read_string()?,
        })
    }

    fn decode_session_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SessionEnd(SessionEndEvent {
            session: SessionId(self.read_u64()?),
            frames: self.read_u64()?,
            elapsed_ms: self.read_f64()?,
            outcome: self.read_outcome()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_SESSION_START => self.decode_session_start(),
            TAG_FRAME => self.decode_frame(),
            TAG_NODE_SKIPPED => self.decode_node_skipped(),
            TAG_ERROR => self.decode_error(),
            TAG_SESSION_END => self.decode_session_end(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
