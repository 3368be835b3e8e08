// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Border geometry.
//!
//! Each highlighted node gets three strokes, drawn in this order:
//!
//! ```text
//!   outline  1px, OUTLINE_COLOR   1px outside the measured box
//!   inset    1px, OUTLINE_COLOR   near edges pulled in by border_width
//!   main     border_width, color  inset by floor(border_width / 2)
//! ```
//!
//! Rectangles are built with [`Rect::new`] from `left/top/width/height`
//! arithmetic and never normalized, so a node narrower than the border
//! produces a negative-width stroke exactly as a 2D canvas would receive it.

use kurbo::Rect;

use crate::error::SurfaceError;
use crate::host::Surface;
use crate::palette::{Color, OUTLINE_COLOR};

/// Line dash pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dash {
    /// Solid line, no dash pattern.
    #[default]
    Solid,
}

/// Full style for one stroke call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Line width in pixels.
    pub width: f64,
    /// Stroke colour.
    pub color: Color,
    /// Dash pattern.
    pub dash: Dash,
}

impl StrokeStyle {
    /// A solid stroke.
    #[must_use]
    pub const fn solid(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            dash: Dash::Solid,
        }
    }

    /// The 1px neutral hairline used for the outline and inset passes.
    pub const HAIRLINE: Self = Self::solid(1.0, OUTLINE_COLOR);
}

/// Builds a measurement rectangle from viewport `left/top/width/height`.
#[inline]
#[must_use]
pub fn measurement(left: f64, top: f64, width: f64, height: f64) -> Rect {
    Rect::new(left, top, left + width, top + height)
}

/// The three stroke rectangles for one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderPasses {
    /// 1px outline, one pixel outside the measurement on every side.
    pub outline: Rect,
    /// 1px inset, top-left corner moved inward by the border width.
    pub inset: Rect,
    /// Main border, centred half a border width inside the measurement.
    pub main: Rect,
    /// Style of the main border.
    pub main_style: StrokeStyle,
}

impl BorderPasses {
    /// Computes the passes for `measurement` with the given border width and
    /// main-border colour.
    #[must_use]
    pub fn compute(measurement: Rect, border_width: u32, color: Color) -> Self {
        let bw = f64::from(border_width);
        let half = f64::from(border_width / 2);
        let left = measurement.x0;
        let top = measurement.y0;
        let width = measurement.width();
        let height = measurement.height();

        Self {
            outline: self::measurement(left - 1.0, top - 1.0, width + 2.0, height + 2.0),
            inset: self::measurement(left + bw, top + bw, width - bw, height - bw),
            main: self::measurement(left + half, top + half, width - bw, height - bw),
            main_style: StrokeStyle::solid(bw, color),
        }
    }

    /// Returns the strokes in draw order.
    #[must_use]
    pub fn strokes(&self) -> [(Rect, StrokeStyle); 3] {
        [
            (self.outline, StrokeStyle::HAIRLINE),
            (self.inset, StrokeStyle::HAIRLINE),
            (self.main, self.main_style),
        ]
    }
}

/// Strokes the three border passes for one node onto `surface`.
pub fn draw_border<S: Surface + ?Sized>(
    surface: &mut S,
    measurement: Rect,
    border_width: u32,
    color: Color,
) -> Result<(), SurfaceError> {
    for (rect, style) in BorderPasses::compute(measurement, border_width, color).strokes() {
        surface.stroke_rect(rect, &style)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    fn sample() -> Rect {
        measurement(10.0, 20.0, 100.0, 50.0)
    }

    #[test]
    fn outline_is_one_pixel_larger_on_every_side() {
        let m = sample();
        let p = BorderPasses::compute(m, 4, PALETTE[0]);
        assert_eq!(p.outline.x0, m.x0 - 1.0);
        assert_eq!(p.outline.y0, m.y0 - 1.0);
        assert_eq!(p.outline.x1, m.x1 + 1.0);
        assert_eq!(p.outline.y1, m.y1 + 1.0);
    }

    #[test]
    fn inset_moves_near_edges_by_border_width() {
        let p = BorderPasses::compute(sample(), 4, PALETTE[0]);
        assert_eq!(p.inset, Rect::new(14.0, 24.0, 110.0, 70.0));
        assert_eq!(p.inset.width(), 100.0 - 4.0);
        assert_eq!(p.inset.height(), 50.0 - 4.0);
    }

    #[test]
    fn main_border_is_inset_by_half_width_rounded_down() {
        let p = BorderPasses::compute(sample(), 4, PALETTE[2]);
        assert_eq!(p.main, Rect::new(12.0, 22.0, 108.0, 68.0));
        assert_eq!(p.main_style, StrokeStyle::solid(4.0, PALETTE[2]));

        // Odd widths round the inset down.
        let p = BorderPasses::compute(sample(), 5, PALETTE[2]);
        assert_eq!(p.main.x0, 12.0);
        assert_eq!(p.main.y0, 22.0);
        assert_eq!(p.main.width(), 95.0);
        assert_eq!(p.main_style.width, 5.0);
    }

    #[test]
    fn narrow_nodes_are_not_normalized() {
        let p = BorderPasses::compute(measurement(0.0, 0.0, 2.0, 2.0), 4, PALETTE[0]);
        assert_eq!(p.main.width(), -2.0);
        assert_eq!(p.inset.x0, 4.0);
        assert_eq!(p.inset.width(), -2.0);
    }

    #[test]
    fn zero_rect_still_produces_three_passes() {
        let p = BorderPasses::compute(Rect::ZERO, 4, PALETTE[0]);
        let strokes = p.strokes();
        assert_eq!(strokes.len(), 3);
        assert_eq!(strokes[0].0, Rect::new(-1.0, -1.0, 1.0, 1.0));
    }

    #[test]
    fn stroke_order_and_styles() {
        let p = BorderPasses::compute(sample(), 3, PALETTE[6]);
        let [outline, inset, main] = p.strokes();
        assert_eq!(outline.1, StrokeStyle::HAIRLINE);
        assert_eq!(inset.1, StrokeStyle::HAIRLINE);
        assert_eq!(main.1.color, PALETTE[6]);
        assert_eq!(main.1.dash, Dash::Solid);
        assert_eq!(main.1.width, 3.0);
    }
}
