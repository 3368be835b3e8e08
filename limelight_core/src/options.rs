// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-session configuration.

/// Default border thickness in pixels.
pub const DEFAULT_BORDER_WIDTH: u32 = 4;

/// Default fade lifetime in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 1500;

/// Configuration for one highlight session.
///
/// ```
/// use limelight_core::options::HighlightOptions;
///
/// let opts = HighlightOptions::new().with_duration_ms(100).with_border_width(2);
/// assert_eq!(opts.border_width, 2);
/// assert_eq!(opts.duration_ms, 100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HighlightOptions {
    /// Thickness of the main border in pixels.
    ///
    /// Also the inward offset of the inset pass and twice the (rounded down)
    /// inset of the main border.
    pub border_width: u32,
    /// Total fade lifetime in milliseconds. The surface is removed after the
    /// first frame whose elapsed time reaches this value.
    pub duration_ms: u32,
}

impl HighlightOptions {
    /// Returns the default options: 4px border, 1500 ms.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            border_width: DEFAULT_BORDER_WIDTH,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    /// Sets the border thickness in pixels.
    #[must_use]
    pub const fn with_border_width(mut self, border_width: u32) -> Self {
        self.border_width = border_width;
        self
    }

    /// Sets the fade lifetime in milliseconds.
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let opts = HighlightOptions::default();
        assert_eq!(opts.border_width, 4);
        assert_eq!(opts.duration_ms, 1500);
        assert_eq!(opts, HighlightOptions::new());
    }

    #[test]
    fn builders_only_touch_their_field() {
        let opts = HighlightOptions::new().with_border_width(9);
        assert_eq!(opts.duration_ms, DEFAULT_DURATION_MS);
        let opts = HighlightOptions::new().with_duration_ms(0);
        assert_eq!(opts.border_width, DEFAULT_BORDER_WIDTH);
        assert_eq!(opts.duration_ms, 0);
    }
}
