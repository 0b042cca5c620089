use image::Rgba;

use super::*;

#[test]
fn opaque_pixels_survive_premultiply_and_flatten() {
    let mut img = RgbaImage::new(3, 2);
    for (i, px) in img.pixels_mut().enumerate() {
        let v = (i * 40) as u8;
        *px = Rgba([v, 255 - v, v / 2, 255]);
    }
    let surface = Surface::from_rgba_image(&img).unwrap();
    assert_eq!(surface.data.as_slice(), img.as_raw().as_slice());

    let rgb = surface.to_rgb_image();
    assert_eq!(rgb.dimensions(), (3, 2));
    for (src, out) in img.pixels().zip(rgb.pixels()) {
        assert_eq!(&src.0[..3], &out.0[..]);
    }
}

#[test]
fn translucent_pixels_are_premultiplied() {
    let img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 128]));
    let surface = Surface::from_rgba_image(&img).unwrap();
    assert_eq!(
        surface.data.as_slice(),
        &[
            ((200u16 * 128 + 127) / 255) as u8,
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            128
        ]
    );

    let flat = surface.to_rgb_image();
    let px = flat.get_pixel(0, 0);
    assert!((i32::from(px[0]) - 200).abs() <= 2);
    assert!((i32::from(px[1]) - 100).abs() <= 2);
}

#[test]
fn transparent_pixels_flatten_to_black() {
    let img = RgbaImage::from_pixel(2, 2, Rgba([90, 180, 30, 0]));
    let surface = Surface::from_rgba_image(&img).unwrap();
    assert!(surface.to_rgb_image().pixels().all(|p| p.0 == [0, 0, 0]));
}
