// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `<canvas>` overlay surface.
//!
//! [`CanvasOverlay`] is a full-viewport canvas inserted as the first child of
//! `document.documentElement`. It is fixed-positioned, ignores pointer
//! events, and sits at [`OVERLAY_Z_INDEX`] so it covers page content.
//!
//! [`OVERLAY_Z_INDEX`]: limelight_core::host::OVERLAY_Z_INDEX

use alloc::format;
use alloc::string::String;

use js_sys::Array;
use kurbo::{Rect, Size};
use limelight_core::error::{HighlightError, SurfaceError, SurfaceOp};
use limelight_core::geometry::{Dash, StrokeStyle};
use limelight_core::host::{OVERLAY_Z_INDEX, Surface};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Inline style applied to the overlay canvas.
pub(crate) fn overlay_css() -> String {
    format!(
        "bottom: 0; left: 0; pointer-events: none; position: fixed; right: 0; top: 0; z-index: {OVERLAY_Z_INDEX};"
    )
}

pub(crate) fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// A mounted overlay canvas and its 2D context.
#[derive(Debug)]
pub struct CanvasOverlay {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    mounted: bool,
}

impl CanvasOverlay {
    /// Creates the canvas and inserts it into the current document.
    pub fn mount() -> Result<Self, HighlightError> {
        let window = web_sys::window().ok_or_else(|| mount_error("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| mount_error("no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| mount_error("no document element"))?;
        let screen = window.screen().map_err(|e| mount_js_error("screen", &e))?;
        let width = screen
            .avail_width()
            .map_err(|e| mount_js_error("availWidth", &e))?;
        let height = screen
            .avail_height()
            .map_err(|e| mount_js_error("availHeight", &e))?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| mount_js_error("createElement", &e))?
            .unchecked_into();
        canvas.set_width(u32::try_from(width).unwrap_or(0));
        canvas.set_height(u32::try_from(height).unwrap_or(0));
        canvas.style().set_css_text(&overlay_css());

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| mount_js_error("getContext", &e))?
            .ok_or_else(|| mount_error("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| mount_error("context is not 2d"))?;

        root.insert_before(&canvas, root.first_child().as_ref())
            .map_err(|e| mount_js_error("insertBefore", &e))?;

        Ok(Self {
            canvas,
            ctx,
            mounted: true,
        })
    }

    /// Returns the canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

fn mount_error(msg: &str) -> HighlightError {
    HighlightError::Mount(String::from(msg))
}

fn mount_js_error(step: &str, e: &JsValue) -> HighlightError {
    HighlightError::Mount(format!("{step}: {}", js_message(e)))
}

impl Surface for CanvasOverlay {
    fn size(&self) -> Size {
        Size::new(
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn set_opacity(&mut self, alpha: f64) -> Result<(), SurfaceError> {
        self.ctx.set_global_alpha(alpha);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle) -> Result<(), SurfaceError> {
        let segments = match style.dash {
            Dash::Solid => Array::new(),
        };
        self.ctx
            .set_line_dash(&segments)
            .map_err(|e| SurfaceError::new(SurfaceOp::StrokeRect, js_message(&e)))?;
        self.ctx.set_line_width(style.width);
        self.ctx.set_stroke_style_str(&format!("{}", style.color));
        self.ctx
            .stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
        Ok(())
    }

    fn remove(&mut self) {
        if self.mounted {
            self.mounted = false;
            self.canvas.remove();
        }
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}
