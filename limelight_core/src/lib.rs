// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types and frame loop for fading node-highlight overlays.
//!
//! `limelight_core` draws a palette-coloured outline around each of a set of
//! visual-tree nodes on a transparent overlay surface, fades it out over a
//! fixed duration on a 60 Hz tick, and then removes the surface. It is
//! `no_std` compatible (with `alloc`); everything platform-specific sits
//! behind the traits in [`host`].
//!
//! # Architecture
//!
//! ```text
//!   highlight(host, nodes, options)
//!       │
//!       ▼
//!   Host::mount() ──► HighlightSession ──► step() ──► Step::Continue
//!                          ▲                              │
//!                          └──── Host::defer(TICK_MS) ◄───┘
//!                                                         │
//!                                     Step::Finished ◄────┘ (surface removed)
//! ```
//!
//! **[`session`]** — The explicit session state object. Each
//! [`step`](session::HighlightSession::step) draws one frame and reports
//! whether another is due.
//!
//! **[`highlight`](mod@highlight)** — The driver that mounts a surface, runs
//! the first frame synchronously and hands the session to the host's
//! deferred-callback scheduler for the rest.
//!
//! **[`host`]** — The [`Host`](host::Host), [`Surface`](host::Surface) and
//! [`Measure`](host::Measure) traits that backends implement.
//!
//! **[`geometry`]** — The three-pass border rectangles and their stroke
//! styles.
//!
//! **[`timing`]** — Tick length, frame counting and the linear fade.
//!
//! **[`palette`]** — The fixed cool-to-hot border colours.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! session instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Concurrent sessions
//!
//! Sessions are independent. Calling [`highlight()`] while another session
//! is still fading mounts a second surface with its own loop; nothing
//! cancels or coordinates with the first one.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod error;
pub mod geometry;
pub mod highlight;
pub mod host;
pub mod options;
pub mod palette;
pub mod session;
pub mod timing;
pub mod trace;

pub use highlight::{highlight, highlight_traced};
