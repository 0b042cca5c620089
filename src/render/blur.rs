use crate::foundation::error::{SlideglowError, SlideglowResult};

/// Kernel radius covering three standard deviations.
pub fn kernel_radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Separable Gaussian blur of a premultiplied RGBA8 buffer.
///
/// Fixed-point (Q16) weights keep the output bit-exact across runs and platforms. Edges clamp.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    sigma: f32,
) -> SlideglowResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SlideglowError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(SlideglowError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    let radius = kernel_radius_for_sigma(sigma);
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// [`blur_rgba8_premul`] restricted to the bounding box of non-transparent pixels grown by the
/// kernel radius. Output is identical to blurring the whole buffer.
pub fn blur_rgba8_premul_sparse(
    src: &[u8],
    width: u32,
    height: u32,
    sigma: f32,
) -> SlideglowResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SlideglowError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(SlideglowError::render(
            "blur_rgba8_premul_sparse expects src matching width*height*4",
        ));
    }
    let Some((x0, y0, x1, y1)) = opaque_bounds(src, width, height) else {
        return Ok(src.to_vec());
    };

    // One extra pixel keeps the crop border transparent so edge clamping reads zeros.
    let pad = kernel_radius_for_sigma(sigma) + 1;
    let bx0 = x0.saturating_sub(pad);
    let by0 = y0.saturating_sub(pad);
    let bx1 = (x1 + pad).min(width - 1);
    let by1 = (y1 + pad).min(height - 1);
    let (bw, bh) = (bx1 - bx0 + 1, by1 - by0 + 1);

    let row_bytes = (bw as usize) * 4;
    let mut crop = Vec::with_capacity(row_bytes * bh as usize);
    for y in by0..=by1 {
        let start = ((y * width + bx0) as usize) * 4;
        crop.extend_from_slice(&src[start..start + row_bytes]);
    }

    let blurred = blur_rgba8_premul(&crop, bw, bh, sigma)?;
    let mut out = vec![0u8; expected_len];
    for (row, y) in (by0..=by1).enumerate() {
        let start = ((y * width + bx0) as usize) * 4;
        out[start..start + row_bytes]
            .copy_from_slice(&blurred[row * row_bytes..(row + 1) * row_bytes]);
    }
    Ok(out)
}

/// Inclusive `(x0, y0, x1, y1)` of pixels with non-zero alpha.
fn opaque_bounds(src: &[u8], width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..height {
        let row = &src[(y * width) as usize * 4..((y + 1) * width) as usize * 4];
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            let x = x as u32;
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((a, b, c, _)) => (a.min(x), b, c.max(x), y),
            });
        }
    }
    bounds
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> SlideglowResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(SlideglowError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(SlideglowError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push the rounding remainder into the center tap so weights sum to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
