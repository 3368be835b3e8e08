// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for limelight.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`WebHost`]: mounts [`CanvasOverlay`] surfaces and paces frames with
//!   `setTimeout`
//! - [`ElementNode`]: `getBoundingClientRect()` measurement for DOM elements
//! - [`ConsoleSink`]: session tracing to the browser console
//!
//! [`highlight`] is the Rust entry point; JavaScript callers use the
//! exported `highlight(nodes, { borderWidth, duration }?, verbose?)`.

#![no_std]

extern crate alloc;

mod console;
mod node;
mod overlay;
mod timeout;

pub use console::ConsoleSink;
pub use node::ElementNode;
pub use overlay::CanvasOverlay;

use alloc::boxed::Box;
use alloc::vec::Vec;

use js_sys::Reflect;
use limelight_core::error::HighlightError;
use limelight_core::host::Host;
use limelight_core::options::HighlightOptions;
use limelight_core::trace::TraceSink;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// The browser [`Host`]: `<canvas>` overlays and `setTimeout` pacing.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebHost;

impl Host for WebHost {
    type Surface = CanvasOverlay;

    fn mount(&self) -> Result<CanvasOverlay, HighlightError> {
        CanvasOverlay::mount()
    }

    fn defer(&self, delay_ms: f64, task: Box<dyn FnOnce(&Self)>) {
        let host = *self;
        timeout::defer(delay_ms, move || task(&host));
    }
}

/// Highlights `elements` in the current document.
///
/// # Errors
///
/// Returns an error if the overlay cannot be mounted or the first frame
/// fails to draw.
pub fn highlight(elements: Vec<Element>, options: HighlightOptions) -> Result<(), HighlightError> {
    let nodes = elements.into_iter().map(ElementNode::new).collect();
    limelight_core::highlight(&WebHost, nodes, options)
}

/// Like [`highlight`], reporting session events to `sink`.
///
/// # Errors
///
/// See [`highlight`].
pub fn highlight_traced(
    elements: Vec<Element>,
    options: HighlightOptions,
    sink: Box<dyn TraceSink>,
) -> Result<(), HighlightError> {
    let nodes = elements.into_iter().map(ElementNode::new).collect();
    limelight_core::highlight_traced(&WebHost, nodes, options, sink)
}

/// Reads a `{ borderWidth, duration }` options object.
///
/// Anything that is not an object, including `undefined`, yields the
/// defaults.
fn options_from_js(value: &JsValue) -> HighlightOptions {
    if !value.is_object() {
        return HighlightOptions::new();
    }
    js_options(js_number(value, "borderWidth"), js_number(value, "duration"))
}

fn js_number(object: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(object, &JsValue::from_str(key)).ok()?.as_f64()
}

/// Builds options from the numeric fields of a JavaScript options object.
///
/// Missing fields keep their defaults, as do values that are negative,
/// non-finite or too large. Fractional values are truncated.
fn js_options(border_width: Option<f64>, duration: Option<f64>) -> HighlightOptions {
    let mut options = HighlightOptions::new();
    if let Some(bw) = border_width.and_then(whole_u32) {
        options = options.with_border_width(bw);
    }
    if let Some(ms) = duration.and_then(whole_u32) {
        options = options.with_duration_ms(ms);
    }
    options
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "range is checked first; dropping the fraction is intended"
)]
fn whole_u32(value: f64) -> Option<u32> {
    if (0.0..=f64::from(u32::MAX)).contains(&value) {
        Some(value as u32)
    } else {
        None
    }
}

/// JavaScript entry point: `highlight(nodes, { borderWidth, duration }?, verbose?)`.
///
/// `nodes` may contain non-element values; those are skipped every frame.
/// `options` may be omitted, and so may either of its fields. When
/// `verbose` is set, every frame is logged to the console.
///
/// # Errors
///
/// Throws a string describing the failure if the overlay cannot be mounted
/// or the first frame fails to draw.
#[wasm_bindgen(js_name = highlight)]
pub fn highlight_js(
    nodes: Box<[JsValue]>,
    options: JsValue,
    verbose: Option<bool>,
) -> Result<(), JsValue> {
    let nodes: Vec<ElementNode> = nodes.into_vec().into_iter().map(ElementNode::from_js).collect();
    let sink = if verbose.unwrap_or(false) {
        ConsoleSink::verbose()
    } else {
        ConsoleSink::new()
    };
    limelight_core::highlight_traced(
        &WebHost,
        nodes,
        options_from_js(&options),
        Box::new(sink),
    )
    .map_err(|e| JsValue::from_str(&alloc::format!("{e}")))
}
