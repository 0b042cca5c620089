//! Text with a blurred halo under a crisp foreground pass.

use crate::assets::font::TextLayoutEngine;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{SlideglowError, SlideglowResult};
use crate::layout::fit::{TextBlock, TextMeasure};
use crate::layout::safe_area::SafeArea;
use crate::render::blur::blur_rgba8_premul_sparse;
use crate::render::composite::over_in_place;
use crate::render::surface::Surface;

/// Halo and foreground colors of one render call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStyle {
    /// Foreground glyph color.
    pub fill: Rgba8,
    /// Halo color before blurring.
    pub glow: Rgba8,
    /// Half-width of the square of offsets the halo is stamped at.
    pub glow_radius: u32,
    /// Standard deviation of the halo blur.
    pub blur_radius: f32,
}

struct ShapedRun {
    font_size: f32,
    glyphs: Vec<(u32, f32, f32)>,
}

/// Rasterizes glow text onto [`Surface`]s.
///
/// Keeps one `vello_cpu` render context alive between calls; create one renderer per worker.
#[derive(Default)]
pub struct GlowTextRenderer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl GlowTextRenderer {
    /// Renderer with no context allocated yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self, width: u16, height: u16) -> &mut vello_cpu::RenderContext {
        let reusable =
            matches!(&self.ctx, Some(ctx) if ctx.width() == width && ctx.height() == height);
        if !reusable {
            self.ctx = Some(vello_cpu::RenderContext::new(width, height));
        }
        let ctx = self
            .ctx
            .get_or_insert_with(|| vello_cpu::RenderContext::new(width, height));
        ctx.reset();
        ctx
    }

    /// Draw one line with its top-left corner at `position`.
    ///
    /// The halo is the line stamped in `style.glow` at every integer offset within
    /// `style.glow_radius`, Gaussian-blurred as a whole layer, then composited onto `surface`
    /// before the crisp pass in `style.fill`.
    pub fn render_glow_line(
        &mut self,
        surface: &mut Surface,
        position: (f32, f32),
        text: &str,
        engine: &mut TextLayoutEngine,
        size_px: f32,
        style: &GlowStyle,
    ) -> SlideglowResult<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let canvas = surface.canvas();
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SlideglowError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SlideglowError::render("surface height exceeds u16"))?;

        let runs = shape_runs(engine, text, size_px);
        let font = engine.font_data();
        let (x, y) = (f64::from(position.0), f64::from(position.1));

        let r = style.glow_radius as i32;
        let mut layer = vello_cpu::Pixmap::new(width, height);
        {
            let ctx = self.context(width, height);
            ctx.set_paint(paint_color(style.glow));
            for dx in -r..=r {
                for dy in -r..=r {
                    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                        x + f64::from(dx),
                        y + f64::from(dy),
                    )));
                    fill_runs(ctx, font, &runs);
                }
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut layer);
        }
        let halo = blur_rgba8_premul_sparse(
            layer.data_as_u8_slice(),
            canvas.width,
            canvas.height,
            style.blur_radius,
        )?;
        over_in_place(surface.data_mut(), &halo)?;

        layer.data_as_u8_slice_mut().fill(0);
        {
            let ctx = self.context(width, height);
            ctx.set_paint(paint_color(style.fill));
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
            fill_runs(ctx, font, &runs);
            ctx.flush();
            ctx.render_to_pixmap(&mut layer);
        }
        over_in_place(surface.data_mut(), layer.data_as_u8_slice())?;
        Ok(())
    }

    /// Draw every line of `block` starting at `top`, each centered within the safe area's width.
    pub fn render_block(
        &mut self,
        surface: &mut Surface,
        block: &TextBlock,
        safe: &SafeArea,
        top: f32,
        engine: &mut TextLayoutEngine,
        style: &GlowStyle,
    ) -> SlideglowResult<()> {
        let size_px = block.font_size as f32;
        let mut y = top.floor();
        for line in &block.lines {
            let line_width = engine.line_width(line, size_px);
            let x = safe.left as f32 + ((safe.width() as f32 - line_width) / 2.0).floor();
            self.render_glow_line(surface, (x, y), line, engine, size_px, style)?;
            y += block.line_advance();
        }
        Ok(())
    }
}

fn shape_runs(engine: &mut TextLayoutEngine, text: &str, size_px: f32) -> Vec<ShapedRun> {
    let layout = engine.layout_line(text, size_px);
    let mut runs = Vec::new();
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            runs.push(ShapedRun {
                font_size: run.run().font_size(),
                glyphs: run.positioned_glyphs().map(|g| (g.id, g.x, g.y)).collect(),
            });
        }
    }
    runs
}

fn fill_runs(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    runs: &[ShapedRun],
) {
    for run in runs {
        let glyphs = run
            .glyphs
            .iter()
            .map(|&(id, x, y)| vello_cpu::Glyph { id, x, y });
        ctx.glyph_run(font)
            .font_size(run.font_size)
            .fill_glyphs(glyphs);
    }
}

fn paint_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/glow.rs"]
mod tests;
