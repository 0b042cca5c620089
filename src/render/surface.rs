use image::{RgbImage, RgbaImage};

use crate::foundation::core::Canvas;
use crate::foundation::error::SlideglowResult;

/// A slide's pixel buffer: premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl Surface {
    /// Premultiply a straight-alpha image into a new surface.
    pub fn from_rgba_image(img: &RgbaImage) -> SlideglowResult<Self> {
        let canvas = Canvas::new(img.width(), img.height())?;
        let mut data = img.as_raw().clone();
        premultiply_rgba8_in_place(&mut data);
        Ok(Self { canvas, data })
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Mutable premultiplied pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Un-premultiply and drop the alpha channel.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut rgb = Vec::with_capacity(self.data.len() / 4 * 3);
        for px in self.data.chunks_exact(4) {
            let [r, g, b, _] = unpremultiply([px[0], px[1], px[2], px[3]]);
            rgb.extend_from_slice(&[r, g, b]);
        }
        RgbImage::from_raw(self.canvas.width, self.canvas.height, rgb)
            .unwrap_or_else(|| RgbImage::new(self.canvas.width, self.canvas.height))
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u32::from(px[3]);
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| ((u32::from(c) * 255 + a / 2) / a).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2]), px[3]]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
