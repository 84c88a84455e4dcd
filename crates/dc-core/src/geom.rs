//! Pixel geometry for canvas items.

use serde::{Deserialize, Serialize};

/// Minimum item size on either axis, in pixels.
pub const MIN_ITEM_SIZE: f32 = 10.0;

/// A position on the canvas, in pixels from its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into `0..=max`. A negative `max` (item larger than
    /// the canvas) floors to 0.
    #[must_use]
    pub fn clamped(self, max_x: f32, max_y: f32) -> Self {
        Self {
            x: clamp(self.x, 0.0, max_x.max(0.0)),
            y: clamp(self.y, 0.0, max_y.max(0.0)),
        }
    }
}

/// An item's box size in pixels. Construction and every edit enforce the
/// 10×10 floor, so a `Size` read from an item is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(MIN_ITEM_SIZE),
            height: height.max(MIN_ITEM_SIZE),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(MIN_ITEM_SIZE);
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height.max(MIN_ITEM_SIZE);
    }
}

/// Clamp `v` into `min..=max`.
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    v.max(min).min(max)
}

/// Format a pixel quantity the way the canvas displays it: rounded, `px`-suffixed.
pub fn px(value: f32) -> String {
    format!("{}px", value.round() as i64)
}

/// Coerce a user-entered numeric field. Unparseable, non-finite, and zero
/// inputs all take the fallback, matching the `value || default` behavior of a
/// form field.
pub fn coerce_or(raw: &str, fallback: f32) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => fallback,
    }
}
