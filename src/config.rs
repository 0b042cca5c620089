//! Strongly typed carousel configuration.
//!
//! Every field has a documented default, so `{}` is a complete config.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assets::color::parse_hex_color;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{SlideglowError, SlideglowResult};
use crate::layout::fit::{FitParams, FontSizeHint};
use crate::layout::safe_area::{SafeArea, SafeMargins};
use crate::render::glow::GlowStyle;

/// Halo settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlowConfig {
    /// `#RRGGBB` halo color (default `#FF4EDB`).
    pub color: String,
    /// Stamp radius in pixels (default 10).
    pub radius: u32,
    /// Blur standard deviation in pixels (default 8).
    pub blur_radius: f32,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            color: "#FF4EDB".to_owned(),
            radius: 10,
            blur_radius: 8.0,
        }
    }
}

/// Settings shared by every slide of a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Output width in pixels (default 1080).
    pub output_width: u32,
    /// Output height in pixels (default 1920).
    pub output_height: u32,
    /// Base size of the character-count hint (default 120).
    pub font_size: u32,
    /// Fit floor (default 60).
    pub min_font_size: u32,
    /// Fit decrement (default 2).
    pub font_size_step: u32,
    /// Texts longer than this start below `font_size` (default 80).
    pub base_chars: usize,
    /// Gap between lines in pixels (default 20).
    pub line_spacing: f32,
    /// JPEG quality, 1..=100 (default 95).
    pub jpeg_quality: u8,
    /// Text color for slides without one (default `#FFFFFF`).
    pub default_text_color: String,
    /// Platform UI margins.
    pub safe_margins: SafeMargins,
    /// Halo settings.
    pub glow: GlowConfig,
    /// Move text clear of detected regions when a detector is attached (default true).
    pub avoid_regions: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            output_width: 1080,
            output_height: 1920,
            font_size: 120,
            min_font_size: 60,
            font_size_step: 2,
            base_chars: 80,
            line_spacing: 20.0,
            jpeg_quality: 95,
            default_text_color: "#FFFFFF".to_owned(),
            safe_margins: SafeMargins::default(),
            glow: GlowConfig::default(),
            avoid_regions: true,
        }
    }
}

impl CarouselConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> SlideglowResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| SlideglowError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_path(path: &Path) -> SlideglowResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            SlideglowError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every precondition slide processing relies on.
    pub fn validate(&self) -> SlideglowResult<()> {
        let area = self.safe_area()?;
        if self.font_size == 0 {
            return Err(SlideglowError::validation("font_size must be > 0"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(SlideglowError::validation("jpeg_quality must be in 1..=100"));
        }
        if !self.glow.blur_radius.is_finite() || self.glow.blur_radius < 0.0 {
            return Err(SlideglowError::validation(
                "glow.blur_radius must be finite and >= 0",
            ));
        }
        parse_hex_color(&self.glow.color)
            .map_err(|e| SlideglowError::validation(format!("glow.color: {e}")))?;
        self.fit_params(self.font_size, &area).validate()
    }

    /// Output canvas.
    pub fn canvas(&self) -> SlideglowResult<Canvas> {
        Canvas::new(self.output_width, self.output_height)
    }

    /// Safe area of the output canvas.
    pub fn safe_area(&self) -> SlideglowResult<SafeArea> {
        SafeArea::compute(self.canvas()?, self.safe_margins)
    }

    /// Character-count hint seeded from `font_size`.
    pub fn font_size_hint(&self) -> FontSizeHint {
        FontSizeHint {
            base_chars: self.base_chars,
            base_size: self.font_size,
            min_size: self.min_font_size,
        }
    }

    /// Fit parameters bounded by `safe`.
    pub fn fit_params(&self, start_size: u32, safe: &SafeArea) -> FitParams {
        FitParams {
            start_size,
            min_size: self.min_font_size,
            step: self.font_size_step,
            max_width: safe.width() as f32,
            max_height: safe.height() as f32,
            line_spacing: self.line_spacing,
        }
    }

    /// Glow style around `fill`.
    pub fn glow_style(&self, fill: Rgba8) -> SlideglowResult<GlowStyle> {
        Ok(GlowStyle {
            fill,
            glow: parse_hex_color(&self.glow.color)?,
            glow_radius: self.glow.radius,
            blur_radius: self.glow.blur_radius,
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
