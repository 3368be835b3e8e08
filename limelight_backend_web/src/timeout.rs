// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout` deferral.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global binding instead of `web_sys::Window::set_timeout_*`, which
// would need the Window fetched (and unwrapped) on every frame and only
// accepts whole milliseconds.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: f64) -> i32;
}

/// Runs `task` once after `delay_ms` milliseconds.
///
/// The JS closure frees itself after it fires.
pub(crate) fn defer<F: FnOnce() + 'static>(delay_ms: f64, task: F) {
    let callback = Closure::once_into_js(task);
    set_timeout(&callback, delay_ms);
}
