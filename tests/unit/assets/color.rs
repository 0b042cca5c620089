use super::*;

#[test]
fn parses_with_and_without_hash() {
    assert_eq!(resolve_color("#FF4EDB"), Rgba8::opaque(0xff, 0x4e, 0xdb));
    assert_eq!(resolve_color("ffffff"), Rgba8::WHITE);
    assert_eq!(resolve_color("  #00ff00 "), Rgba8::opaque(0, 255, 0));
}

#[test]
fn non_hex_code_falls_back() {
    assert_eq!(resolve_color("zzzzzz"), FALLBACK_TEXT_COLOR);
    let c = resolve_color("zzzzzz");
    assert_eq!((c.r, c.g, c.b, c.a), (46, 204, 113, 255));
}

#[test]
fn empty_and_wrong_length_fall_back() {
    assert_eq!(resolve_color(""), FALLBACK_TEXT_COLOR);
    assert_eq!(resolve_color("#fff"), FALLBACK_TEXT_COLOR);
    assert_eq!(resolve_color("#ff00ff80"), FALLBACK_TEXT_COLOR);
}

#[test]
fn multibyte_input_is_rejected_not_sliced() {
    assert!(parse_hex_color("ééé").is_err());
    assert_eq!(resolve_color("ééé"), FALLBACK_TEXT_COLOR);
}
