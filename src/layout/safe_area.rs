use crate::foundation::core::Canvas;
use crate::foundation::error::{SlideglowError, SlideglowResult};

/// Absolute pixel margins reserved for platform UI chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SafeMargins {
    /// Top bar.
    pub top: u32,
    /// Caption and action buttons.
    pub bottom: u32,
    /// Left edge.
    pub left: u32,
    /// Right-hand button column.
    pub right: u32,
}

impl Default for SafeMargins {
    /// Margins tuned for a 1080x1920 vertical canvas.
    fn default() -> Self {
        Self {
            top: 200,
            bottom: 420,
            left: 80,
            right: 200,
        }
    }
}

/// Region of the canvas not covered by platform UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SafeArea {
    /// Left edge (inclusive).
    pub left: u32,
    /// Top edge (inclusive).
    pub top: u32,
    /// Right edge (exclusive).
    pub right: u32,
    /// Bottom edge (exclusive).
    pub bottom: u32,
}

impl SafeArea {
    /// Apply `margins` to `canvas`.
    ///
    /// Errors when the margins leave no positive-area rectangle.
    pub fn compute(canvas: Canvas, margins: SafeMargins) -> SlideglowResult<Self> {
        let horizontal = margins.left.checked_add(margins.right);
        let vertical = margins.top.checked_add(margins.bottom);
        match (horizontal, vertical) {
            (Some(h), Some(v)) if h < canvas.width && v < canvas.height => Ok(Self {
                left: margins.left,
                top: margins.top,
                right: canvas.width - margins.right,
                bottom: canvas.height - margins.bottom,
            }),
            _ => Err(SlideglowError::validation(format!(
                "safe margins {margins:?} leave no area on a {}x{} canvas",
                canvas.width, canvas.height
            ))),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Safe area of `(width, height)` with the default margins.
pub fn safe_area(width: u32, height: u32) -> SlideglowResult<SafeArea> {
    SafeArea::compute(Canvas { width, height }, SafeMargins::default())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/safe_area.rs"]
mod tests;
