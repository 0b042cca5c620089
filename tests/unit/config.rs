use super::*;

#[test]
fn empty_json_yields_documented_defaults() {
    let cfg = CarouselConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, CarouselConfig::default());
    assert_eq!(cfg.output_width, 1080);
    assert_eq!(cfg.output_height, 1920);
    assert_eq!(cfg.font_size, 120);
    assert_eq!(cfg.jpeg_quality, 95);
    assert_eq!(cfg.safe_margins, SafeMargins::default());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg = CarouselConfig::from_json_str(
        r##"{"output_width": 720, "output_height": 1280, "glow": {"radius": 4}}"##,
    )
    .unwrap();
    assert_eq!(cfg.output_width, 720);
    assert_eq!(cfg.glow.radius, 4);
    assert_eq!(cfg.glow.color, "#FF4EDB");
    assert_eq!(cfg.font_size, 120);
}

#[test]
fn unknown_fields_are_serde_errors() {
    let err = CarouselConfig::from_json_str(r#"{"output_widht": 720}"#).unwrap_err();
    assert!(matches!(err, SlideglowError::Serde(_)));
}

#[test]
fn invalid_dimensions_are_rejected() {
    for json in [
        r#"{"output_width": 0}"#,
        r#"{"output_height": 0}"#,
        r#"{"output_width": 200}"#,
        r#"{"output_height": 600}"#,
        r#"{"output_width": 100000}"#,
    ] {
        let err = CarouselConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, SlideglowError::Validation(_)), "{json}");
    }
}

#[test]
fn invalid_style_values_are_rejected() {
    for json in [
        r#"{"font_size": 0}"#,
        r#"{"min_font_size": 0}"#,
        r#"{"font_size_step": 0}"#,
        r#"{"jpeg_quality": 0}"#,
        r#"{"line_spacing": -5}"#,
        r#"{"glow": {"color": "pink"}}"#,
        r#"{"glow": {"blur_radius": -1}}"#,
    ] {
        assert!(CarouselConfig::from_json_str(json).is_err(), "{json}");
    }
}

#[test]
fn derived_parameters_follow_the_safe_area() {
    let cfg = CarouselConfig::default();
    let area = cfg.safe_area().unwrap();
    let p = cfg.fit_params(100, &area);
    assert_eq!(p.max_width, 800.0);
    assert_eq!(p.max_height, 1300.0);
    assert_eq!(p.min_size, 60);
    assert_eq!(p.line_spacing, 20.0);

    let hint = cfg.font_size_hint();
    assert_eq!(hint.base_size, 120);
    assert_eq!(hint.base_chars, 80);

    let style = cfg.glow_style(Rgba8::WHITE).unwrap();
    assert_eq!(style.glow, Rgba8::opaque(0xff, 0x4e, 0xdb));
    assert_eq!(style.glow_radius, 10);
}

#[test]
fn missing_config_file_is_error() {
    assert!(CarouselConfig::from_json_path(Path::new("tests/data/no_such_config.json")).is_err());
}
