use std::path::Path;

use image::{Rgba, RgbaImage};

use super::*;
use crate::assets::font::FontSource;

fn engine() -> TextLayoutEngine {
    let font = FontSource::from_path(Path::new("tests/data/fonts/DejaVuSans.ttf")).unwrap();
    TextLayoutEngine::new(&font).unwrap()
}

fn pink_halo() -> GlowStyle {
    GlowStyle {
        fill: Rgba8::WHITE,
        glow: Rgba8::opaque(0xff, 0x4e, 0xdb),
        glow_radius: 10,
        blur_radius: 8.0,
    }
}

fn black(width: u32, height: u32) -> Surface {
    Surface::from_rgba_image(&RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))).unwrap()
}

#[test]
fn glow_line_has_crisp_fill_and_colored_halo() {
    let mut engine = engine();
    let mut renderer = GlowTextRenderer::new();
    let mut surface = black(240, 120);
    let style = pink_halo();

    renderer
        .render_glow_line(&mut surface, (40.0, 20.0), "Hi", &mut engine, 48.0, &style)
        .unwrap();

    let img = surface.to_rgb_image();
    let white = img
        .pixels()
        .filter(|p| p[0] >= 230 && p[1] >= 230 && p[2] >= 230)
        .count();
    assert!(white > 20, "expected crisp white glyph pixels, got {white}");

    let magenta = img
        .pixels()
        .filter(|p| i32::from(p[0]) > i32::from(p[1]) + 40 && i32::from(p[2]) > i32::from(p[1]) + 40)
        .count();
    assert!(magenta > 50, "expected halo pixels, got {magenta}");

    assert_eq!(img.get_pixel(239, 119).0, [0, 0, 0]);
}

#[test]
fn glow_rendering_is_deterministic() {
    let mut engine = engine();
    let mut renderer = GlowTextRenderer::new();
    let style = pink_halo();

    let mut a = black(200, 100);
    renderer
        .render_glow_line(&mut a, (10.0, 10.0), "Glow 42", &mut engine, 32.0, &style)
        .unwrap();

    let mut b = black(200, 100);
    GlowTextRenderer::new()
        .render_glow_line(&mut b, (10.0, 10.0), "Glow 42", &mut engine, 32.0, &style)
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn blank_line_leaves_surface_untouched() {
    let mut engine = engine();
    let mut renderer = GlowTextRenderer::new();
    let mut surface = black(64, 64);
    let before = surface.clone();

    renderer
        .render_glow_line(&mut surface, (0.0, 0.0), "   ", &mut engine, 32.0, &pink_halo())
        .unwrap();
    assert_eq!(surface, before);
}

#[test]
fn block_lines_are_centered_in_the_safe_area() {
    let mut engine = engine();
    let mut renderer = GlowTextRenderer::new();
    let mut surface = black(300, 300);
    let safe = SafeArea {
        left: 20,
        top: 20,
        right: 280,
        bottom: 280,
    };
    let line_height = engine.line_height(40.0);
    let block = TextBlock {
        lines: vec!["Ab".to_owned(), "Cd".to_owned()],
        font_size: 40,
        line_height,
        line_spacing: 20.0,
        total_height: 2.0 * (line_height + 20.0),
        overflow: false,
    };
    let style = GlowStyle {
        glow_radius: 2,
        blur_radius: 1.0,
        ..pink_halo()
    };

    renderer
        .render_block(&mut surface, &block, &safe, 40.0, &mut engine, &style)
        .unwrap();

    let img = surface.to_rgb_image();
    let lit = |y0: u32, y1: u32| {
        let mut count = 0u32;
        let mut sum_x = 0u64;
        for y in y0..y1 {
            for x in 0..img.width() {
                if img.get_pixel(x, y).0 != [0, 0, 0] {
                    count += 1;
                    sum_x += u64::from(x);
                }
            }
        }
        (count, if count == 0 { 0 } else { sum_x / u64::from(count) })
    };

    let second_top = 40.0 + block.line_advance();
    let (first, first_cx) = lit(30, second_top as u32 - 5);
    let (second, second_cx) = lit(second_top as u32, 300);
    assert!(first > 0 && second > 0);
    assert!((first_cx as i64 - 150).abs() <= 20);
    assert!((second_cx as i64 - 150).abs() <= 20);

    // Nothing above the block beyond the halo reach.
    let (above, _) = lit(0, 30);
    assert_eq!(above, 0);
}
