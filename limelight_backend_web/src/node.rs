// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element measurement.

use kurbo::Rect;
use limelight_core::error::InvalidNode;
use limelight_core::geometry::measurement;
use limelight_core::host::Measure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::Element;

/// A highlight target backed by a DOM element.
///
/// Values that are not elements (e.g. a text node or `null` passed from
/// JavaScript) are kept in place so palette slots stay aligned, but are
/// skipped on every frame.
#[derive(Clone, Debug)]
pub struct ElementNode {
    element: Option<Element>,
}

impl ElementNode {
    /// Wraps an element.
    #[must_use]
    pub fn new(element: Element) -> Self {
        Self {
            element: Some(element),
        }
    }

    /// Wraps an arbitrary JavaScript value.
    #[must_use]
    pub fn from_js(value: JsValue) -> Self {
        Self {
            element: value.dyn_into::<Element>().ok(),
        }
    }

    /// Returns the element, if the value was one.
    #[must_use]
    pub fn element(&self) -> Option<&Element> {
        self.element.as_ref()
    }
}

impl From<Element> for ElementNode {
    fn from(element: Element) -> Self {
        Self::new(element)
    }
}

impl Measure for ElementNode {
    fn measure(&self) -> Result<Rect, InvalidNode> {
        let element = self.element.as_ref().ok_or(InvalidNode)?;
        if !element.is_connected() {
            return Ok(Rect::ZERO);
        }
        let r = element.get_bounding_client_rect();
        Ok(measurement(r.x(), r.y(), r.width(), r.height()))
    }
}
