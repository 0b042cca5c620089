//! Carousel compositor: one background image plus one glowing text block per slide.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage, RgbaImage};

use crate::assets::color::resolve_color;
use crate::assets::decode::{fit_to_canvas, load_image};
use crate::assets::font::{FontSource, TextLayoutEngine};
use crate::config::CarouselConfig;
use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{SlideglowError, SlideglowResult};
use crate::layout::fit::{fit_text, initial_font_size};
use crate::layout::region::{AvoidBox, RegionDetector, centered_top, place_block};
use crate::layout::safe_area::SafeArea;
use crate::render::glow::{GlowStyle, GlowTextRenderer};
use crate::render::surface::Surface;

/// Renders and writes the slides of one carousel.
///
/// Holds the validated config and a reusable rasterizer. Not shared between threads; give
/// each worker its own instance.
pub struct Compositor {
    config: CarouselConfig,
    canvas: Canvas,
    safe: SafeArea,
    style: GlowStyle,
    renderer: GlowTextRenderer,
    detector: Option<Box<dyn RegionDetector>>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("canvas", &self.canvas)
            .field("safe", &self.safe)
            .field("detector", &self.detector.is_some())
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Validate `config` and build a compositor for it.
    pub fn new(config: CarouselConfig) -> SlideglowResult<Self> {
        config.validate()?;
        let canvas = config.canvas()?;
        let safe = config.safe_area()?;
        let style = config.glow_style(Rgba8::WHITE)?;
        Ok(Self {
            config,
            canvas,
            safe,
            style,
            renderer: GlowTextRenderer::new(),
            detector: None,
        })
    }

    /// Consult `detector` for avoid boxes on every slide (when `avoid_regions` is on).
    pub fn with_region_detector(mut self, detector: Box<dyn RegionDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// The validated configuration.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Safe area text is fitted into.
    pub fn safe_area(&self) -> SafeArea {
        self.safe
    }

    /// Render every slot and write `slide{n}.jpg` (1-based) into `out_dir`.
    ///
    /// The font is loaded once and is a fatal precondition. Missing or unreadable images skip
    /// their slot. Returns the written paths in slot order.
    #[tracing::instrument(skip_all, fields(slides = images.len(), font = %font.display()))]
    pub fn composite(
        &mut self,
        images: &[Option<PathBuf>],
        font: &Path,
        colors: &[String],
        texts: &[String],
        out_dir: &Path,
    ) -> SlideglowResult<Vec<PathBuf>> {
        let font = FontSource::from_path(font)?;
        self.composite_with_font(images, &font, colors, texts, out_dir)
    }

    /// [`Compositor::composite`] with an already loaded font.
    #[tracing::instrument(skip_all, fields(slides = images.len(), family = font.family_name()))]
    pub fn composite_with_font(
        &mut self,
        images: &[Option<PathBuf>],
        font: &FontSource,
        colors: &[String],
        texts: &[String],
        out_dir: &Path,
    ) -> SlideglowResult<Vec<PathBuf>> {
        let mut engine = TextLayoutEngine::new(font)?;
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

        let mut written = Vec::with_capacity(images.len());
        for (i, slot) in images.iter().enumerate() {
            let Some(path) = slot else {
                tracing::warn!(slide = i + 1, "no image for slide, skipping");
                continue;
            };
            let image = match load_image(path) {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!(slide = i + 1, error = %e, "unreadable image, skipping slide");
                    continue;
                }
            };

            let text = texts.get(i).map(String::as_str).unwrap_or("");
            let color = colors
                .get(i)
                .cloned()
                .unwrap_or_else(|| self.config.default_text_color.clone());
            let base = fit_to_canvas(&image, self.canvas);
            let avoid = self.detect_regions(&base);
            let rgb = self.render_fitted(base, text, &color, &mut engine, &avoid);

            let out = out_dir.join(format!("slide{}.jpg", i + 1));
            write_jpeg(&rgb, &out, self.config.jpeg_quality)?;
            tracing::info!(slide = i + 1, path = %out.display(), "wrote slide");
            written.push(out);
        }

        tracing::info!(written = written.len(), "carousel finished");
        Ok(written)
    }

    /// Render one slide to an opaque image of the configured canvas size.
    ///
    /// Empty text yields the fitted background unchanged. Rendering failures are logged and
    /// also yield the background without text.
    pub fn render_slide(
        &mut self,
        image: &DynamicImage,
        text: &str,
        color: &str,
        engine: &mut TextLayoutEngine,
        avoid: &[AvoidBox],
    ) -> RgbImage {
        let base = fit_to_canvas(image, self.canvas);
        self.render_fitted(base, text, color, engine, avoid)
    }

    fn render_fitted(
        &mut self,
        base: RgbaImage,
        text: &str,
        color: &str,
        engine: &mut TextLayoutEngine,
        avoid: &[AvoidBox],
    ) -> RgbImage {
        if text.trim().is_empty() {
            return DynamicImage::ImageRgba8(base).into_rgb8();
        }
        match self.draw_text(&base, text, color, engine, avoid) {
            Ok(Some(surface)) => surface.to_rgb_image(),
            Ok(None) => DynamicImage::ImageRgba8(base).into_rgb8(),
            Err(e) => {
                tracing::warn!(error = %e, "text render failed, writing slide without text");
                DynamicImage::ImageRgba8(base).into_rgb8()
            }
        }
    }

    fn draw_text(
        &mut self,
        base: &RgbaImage,
        text: &str,
        color: &str,
        engine: &mut TextLayoutEngine,
        avoid: &[AvoidBox],
    ) -> SlideglowResult<Option<Surface>> {
        let start = initial_font_size(text.chars().count(), self.config.font_size_hint());
        let params = self.config.fit_params(start, &self.safe);
        let Some(block) = fit_text(text, engine, &params) else {
            return Ok(None);
        };

        let top = if self.config.avoid_regions && !avoid.is_empty() {
            place_block(&self.safe, block.total_height, avoid)
        } else {
            centered_top(&self.safe, block.total_height)
        };
        let style = GlowStyle {
            fill: resolve_color(color),
            ..self.style
        };
        tracing::debug!(
            font_size = block.font_size,
            lines = block.lines.len(),
            top,
            "placing text block"
        );

        let mut surface = Surface::from_rgba_image(base)?;
        self.renderer
            .render_block(&mut surface, &block, &self.safe, top, engine, &style)?;
        Ok(Some(surface))
    }

    fn detect_regions(&self, base: &RgbaImage) -> Vec<AvoidBox> {
        let Some(detector) = self.detector.as_ref().filter(|_| self.config.avoid_regions) else {
            return Vec::new();
        };
        detector.detect(base).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "region detection failed, ignoring avoid boxes");
            Vec::new()
        })
    }
}

/// Encode `img` as baseline JPEG at `quality`.
pub fn write_jpeg(img: &RgbImage, path: &Path, quality: u8) -> SlideglowResult<()> {
    let file =
        File::create(path).with_context(|| format!("create slide '{}'", path.display()))?;
    let mut out = BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(img)
        .map_err(|e| SlideglowError::render(format!("encode '{}': {e}", path.display())))?;
    out.flush()
        .with_context(|| format!("flush slide '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/compositor.rs"]
mod tests;
