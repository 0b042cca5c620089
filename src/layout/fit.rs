//! Greedy word wrap plus a shrink-to-fit font size search.
//!
//! The search is deterministic: the same text, measure, and parameters always produce the same
//! [`TextBlock`].

use crate::foundation::error::{SlideglowError, SlideglowResult};

/// Pixel metrics the fit search needs from a font.
pub trait TextMeasure {
    /// Advance width of `text` shaped as a single line.
    fn line_width(&mut self, text: &str, size_px: f32) -> f32;

    /// Height of one line of text.
    fn line_height(&mut self, size_px: f32) -> f32;
}

/// Parameters of one fit search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    /// First candidate size in pixels.
    pub start_size: u32,
    /// Floor; the block is accepted at this size even when it overflows.
    pub min_size: u32,
    /// Decrement between candidate sizes.
    pub step: u32,
    /// Maximum line width in pixels.
    pub max_width: f32,
    /// Maximum block height in pixels.
    pub max_height: f32,
    /// Gap between consecutive lines, used for both the height estimate and the render advance.
    pub line_spacing: f32,
}

impl FitParams {
    /// Reject parameters the search cannot make progress with.
    pub fn validate(&self) -> SlideglowResult<()> {
        if self.min_size == 0 {
            return Err(SlideglowError::validation("min font size must be > 0"));
        }
        if self.step == 0 {
            return Err(SlideglowError::validation("font size step must be > 0"));
        }
        if !self.max_width.is_finite() || self.max_width <= 0.0 {
            return Err(SlideglowError::validation("fit max_width must be finite and > 0"));
        }
        if !self.max_height.is_finite() || self.max_height <= 0.0 {
            return Err(SlideglowError::validation("fit max_height must be finite and > 0"));
        }
        if !self.line_spacing.is_finite() || self.line_spacing < 0.0 {
            return Err(SlideglowError::validation("line spacing must be finite and >= 0"));
        }
        Ok(())
    }
}

/// Wrapped lines at a resolved font size.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Lines in reading order; never empty.
    pub lines: Vec<String>,
    /// Chosen font size in pixels.
    pub font_size: u32,
    /// Height of one line at `font_size`.
    pub line_height: f32,
    /// Gap between lines.
    pub line_spacing: f32,
    /// `lines * (line_height + line_spacing)`.
    pub total_height: f32,
    /// The block did not fit even at the floor size.
    pub overflow: bool,
}

impl TextBlock {
    /// Vertical distance between the tops of consecutive lines.
    pub fn line_advance(&self) -> f32 {
        self.line_height + self.line_spacing
    }

    /// Extent actually covered by glyph boxes; never exceeds `total_height`.
    pub fn rendered_height(&self) -> f32 {
        let n = self.lines.len() as f32;
        n * self.line_height + (n - 1.0).max(0.0) * self.line_spacing
    }
}

/// Character-count based starting size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSizeHint {
    /// Texts up to this many characters keep `base_size`.
    pub base_chars: usize,
    /// Size for short texts.
    pub base_size: u32,
    /// Lower bound of the hint.
    pub min_size: u32,
}

impl Default for FontSizeHint {
    fn default() -> Self {
        Self {
            base_chars: 80,
            base_size: 80,
            min_size: 60,
        }
    }
}

/// `max(base_size * (base_chars / char_count), min_size)` for texts longer than `base_chars`,
/// otherwise `base_size`.
pub fn initial_font_size(char_count: usize, hint: FontSizeHint) -> u32 {
    let size = if char_count > hint.base_chars {
        let ratio = hint.base_chars as f64 / char_count as f64;
        (f64::from(hint.base_size) * ratio) as u32
    } else {
        hint.base_size
    };
    size.max(hint.min_size)
}

/// Greedy word wrap at `size_px`.
///
/// Words are split on whitespace and joined with single spaces. A word wider than `max_width`
/// is placed alone on its own line and never split.
pub fn wrap_words(
    text: &str,
    measure: &mut dyn TextMeasure,
    size_px: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure.line_width(&candidate, size_px) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Find the largest candidate size whose wrapped block fits `max_height`.
///
/// Returns `None` for empty or whitespace-only text. Never fails otherwise: when even
/// `min_size` overflows, the floor-size block is returned with `overflow` set.
pub fn fit_text(text: &str, measure: &mut dyn TextMeasure, params: &FitParams) -> Option<TextBlock> {
    if text.trim().is_empty() {
        return None;
    }

    let min_size = params.min_size.max(1);
    let step = params.step.max(1);
    let mut size = params.start_size.max(min_size);

    loop {
        let size_px = size as f32;
        let lines = wrap_words(text, measure, size_px, params.max_width);
        let line_height = measure.line_height(size_px);
        let total_height = lines.len() as f32 * (line_height + params.line_spacing);
        let fits = total_height <= params.max_height;

        tracing::debug!(
            size,
            lines = lines.len(),
            total_height,
            max_height = params.max_height,
            fits,
            "fit candidate"
        );

        if fits || size <= min_size {
            if !fits {
                tracing::warn!(
                    size,
                    total_height,
                    max_height = params.max_height,
                    "text too tall even at minimum font size, rendering anyway"
                );
            }
            return Some(TextBlock {
                lines,
                font_size: size,
                line_height,
                line_spacing: params.line_spacing,
                total_height,
                overflow: !fits,
            });
        }

        size = size.saturating_sub(step).max(min_size);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
