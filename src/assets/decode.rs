use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::foundation::core::Canvas;
use crate::foundation::error::SlideglowResult;

/// Decode an image file, sniffing the format from its content.
pub fn load_image(path: &Path) -> SlideglowResult<DynamicImage> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("sniff image format '{}'", path.display()))?;
    let img = reader
        .decode()
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img)
}

/// Scale to cover the canvas, then crop the overflow equally from both sides.
pub fn fit_to_canvas(img: &DynamicImage, canvas: Canvas) -> RgbaImage {
    if img.width() == canvas.width && img.height() == canvas.height {
        return img.to_rgba8();
    }
    img.resize_to_fill(canvas.width, canvas.height, FilterType::Lanczos3)
        .to_rgba8()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
