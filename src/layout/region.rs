//! Regions the text block should stay clear of, and where to put it instead.

use image::RgbaImage;
use kurbo::Rect;

use crate::foundation::error::SlideglowResult;
use crate::layout::safe_area::SafeArea;

/// Rectangle of canvas pixels that text should not cover (for example a detected phone).
pub type AvoidBox = Rect;

/// Supplies avoid boxes for a slide image that has already been fitted to the canvas.
pub trait RegionDetector: Send + Sync {
    /// Boxes in canvas pixel coordinates.
    fn detect(&self, image: &RgbaImage) -> SlideglowResult<Vec<AvoidBox>>;
}

/// Edge-inclusive overlap test: rectangles that merely touch count as overlapping.
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1 || a.y1 < b.y0 || a.y0 > b.y1)
}

/// Vertically centered top edge of a block of `block_height` inside `safe`.
pub fn centered_top(safe: &SafeArea, block_height: f32) -> f32 {
    let centered = ((safe.top + safe.bottom) as f32 - block_height) / 2.0;
    centered.floor().max(safe.top as f32)
}

/// Top edge for a full-width text block that stays clear of `avoid`.
///
/// Starts from [`centered_top`]. When the centered band overlaps a box, the block moves to the
/// closest position directly above or below one of the boxes that stays inside `safe` and clears
/// every box. Ties go to the higher position. Falls back to the centered position when nothing
/// fits.
pub fn place_block(safe: &SafeArea, block_height: f32, avoid: &[AvoidBox]) -> f32 {
    let centered = centered_top(safe, block_height);
    let band = |top: f32| {
        Rect::new(
            f64::from(safe.left),
            f64::from(top),
            f64::from(safe.right),
            f64::from(top + block_height),
        )
    };
    let clear = |top: f32| avoid.iter().all(|b| !boxes_overlap(&band(top), b));

    if avoid.is_empty() || clear(centered) {
        return centered;
    }
    if block_height >= safe.height() as f32 {
        tracing::debug!("text block fills the safe area; avoid boxes ignored");
        return centered;
    }

    let min_top = safe.top as f32;
    let max_top = safe.bottom as f32 - block_height;
    let mut best: Option<f32> = None;
    for b in avoid {
        let above = (b.y0 as f32 - block_height).floor() - 1.0;
        let below = (b.y1 as f32).ceil() + 1.0;
        for top in [above, below] {
            if top < min_top || top > max_top || !clear(top) {
                continue;
            }
            let better = match best {
                None => true,
                Some(cur) => {
                    let (d, cur_d) = ((top - centered).abs(), (cur - centered).abs());
                    d < cur_d || (d == cur_d && top < cur)
                }
            };
            if better {
                best = Some(top);
            }
        }
    }

    match best {
        Some(top) => {
            tracing::debug!(centered, top, "moved text block clear of avoid boxes");
            top
        }
        None => {
            tracing::warn!(
                boxes = avoid.len(),
                "no clear position for text block, keeping it centered"
            );
            centered
        }
    }
}

/// Find the calmest `box_size` window of `image`, skipping windows that overlap `avoid`.
///
/// Windows are visited on a `stride` grid; the score is the luminance standard deviation plus the
/// distance of the mean luminance from mid-grey, lower is better, and the first minimum wins.
/// Returns `None` when the image is not larger than the window or every window is excluded.
pub fn find_best_text_region(
    image: &RgbaImage,
    avoid: &[AvoidBox],
    box_size: (u32, u32),
    stride: u32,
) -> Option<Rect> {
    let (width, height) = image.dimensions();
    let (bw, bh) = box_size;
    if bw == 0 || bh == 0 || bw >= width || bh >= height {
        return None;
    }
    let stride = stride.max(1) as usize;

    let luma: Vec<f64> = image
        .pixels()
        .map(|p| {
            let [r, g, b, _] = p.0;
            (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) as f64 / 1000.0
        })
        .collect();

    let mut best: Option<(f64, Rect)> = None;
    for y in (0..height - bh).step_by(stride) {
        for x in (0..width - bw).step_by(stride) {
            let candidate = Rect::new(
                f64::from(x),
                f64::from(y),
                f64::from(x + bw),
                f64::from(y + bh),
            );
            if avoid.iter().any(|b| boxes_overlap(&candidate, b)) {
                continue;
            }

            let (mut sum, mut sum_sq) = (0.0f64, 0.0f64);
            for row in y..y + bh {
                let start = (row * width + x) as usize;
                for &l in &luma[start..start + bw as usize] {
                    sum += l;
                    sum_sq += l * l;
                }
            }
            let n = f64::from(bw) * f64::from(bh);
            let mean = sum / n;
            let stddev = (sum_sq / n - mean * mean).max(0.0).sqrt();
            let score = stddev + (mean - 128.0).abs();

            if best.is_none_or(|(s, _)| score < s) {
                best = Some((score, candidate));
            }
        }
    }
    best.map(|(_, r)| r)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/region.rs"]
mod tests;
