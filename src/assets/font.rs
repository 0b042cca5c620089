use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{SlideglowError, SlideglowResult};
use crate::layout::fit::TextMeasure;

/// Probe string whose shaped height defines a font's line height.
const LINE_HEIGHT_PROBE: &str = "Ay";

/// Raw TrueType/OpenType bytes, validated once per batch.
#[derive(Clone, Debug)]
pub struct FontSource {
    bytes: Arc<Vec<u8>>,
    family_name: String,
}

impl FontSource {
    /// Read and validate a font file.
    pub fn from_path(path: &Path) -> SlideglowResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes).map_err(|e| match e {
            SlideglowError::Font(msg) => {
                SlideglowError::font(format!("{msg} ('{}')", path.display()))
            }
            other => other,
        })
    }

    /// Validate in-memory font bytes by registering them with a scratch font collection.
    pub fn from_bytes(bytes: Vec<u8>) -> SlideglowResult<Self> {
        if bytes.is_empty() {
            return Err(SlideglowError::font("font file is empty"));
        }
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &bytes)?;
        Ok(Self {
            bytes: Arc::new(bytes),
            family_name,
        })
    }

    /// Family name reported by the font's name table.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> SlideglowResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| SlideglowError::font("no font families registered from font bytes"))?;

    let name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| SlideglowError::font("registered font family has no name"))?
        .to_string();
    Ok(name)
}

/// Shapes single lines of text with one registered font.
///
/// Holds the Parley contexts so repeated measurements during a fit search reuse their
/// allocations. Not `Sync`; create one per worker.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    font_data: vello_cpu::peniko::FontData,
    line_heights: HashMap<u32, f32>,
}

impl TextLayoutEngine {
    /// Register `font` with fresh Parley contexts.
    pub fn new(font: &FontSource) -> SlideglowResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, font.bytes())?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font_data,
            line_heights: HashMap::new(),
        })
    }

    /// Family name of the registered font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font_data
    }

    /// Shape `text` as one unbroken line at `size_px`.
    pub fn layout_line(&mut self, text: &str, size_px: f32) -> parley::Layout<()> {
        let size_px = if size_px.is_finite() {
            size_px.max(1.0)
        } else {
            1.0
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for TextLayoutEngine {
    fn line_width(&mut self, text: &str, size_px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout_line(text, size_px).width()
    }

    fn line_height(&mut self, size_px: f32) -> f32 {
        let key = size_px.to_bits();
        if let Some(h) = self.line_heights.get(&key) {
            return *h;
        }
        let h = self.layout_line(LINE_HEIGHT_PROBE, size_px).height();
        self.line_heights.insert(key, h);
        h
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
