use super::*;

#[test]
fn blur_sigma_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 0.8).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8);
}

#[test]
fn blur_rejects_mismatched_buffer() {
    assert!(blur_rgba8_premul(&[0u8; 7], 1, 2, 1.0).is_err());
}

#[test]
fn kernel_radius_covers_three_sigma() {
    assert_eq!(kernel_radius_for_sigma(8.0), 24);
    assert_eq!(kernel_radius_for_sigma(0.5), 2);
    assert_eq!(kernel_radius_for_sigma(0.0), 0);
    assert_eq!(kernel_radius_for_sigma(f32::NAN), 0);
}

#[test]
fn sparse_blur_matches_full_blur() {
    let (w, h) = (40u32, 30u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    for (x, y) in [(12u32, 9u32), (13, 9), (20, 14), (21, 15), (22, 15)] {
        let i = ((y * w + x) * 4) as usize;
        src[i..i + 4].copy_from_slice(&[255, 78, 219, 255]);
    }

    let full = blur_rgba8_premul(&src, w, h, 2.0).unwrap();
    let sparse = blur_rgba8_premul_sparse(&src, w, h, 2.0).unwrap();
    assert_eq!(full, sparse);
}

#[test]
fn sparse_blur_matches_full_blur_at_canvas_edges() {
    let (w, h) = (16u32, 12u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    for (x, y) in [(0u32, 0u32), (15, 11), (1, 10)] {
        let i = ((y * w + x) * 4) as usize;
        src[i..i + 4].copy_from_slice(&[200, 200, 200, 200]);
    }

    let full = blur_rgba8_premul(&src, w, h, 1.5).unwrap();
    let sparse = blur_rgba8_premul_sparse(&src, w, h, 1.5).unwrap();
    assert_eq!(full, sparse);
}

#[test]
fn sparse_blur_of_empty_layer_is_empty() {
    let src = vec![0u8; 8 * 8 * 4];
    assert_eq!(blur_rgba8_premul_sparse(&src, 8, 8, 3.0).unwrap(), src);
}
