use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlideglowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SlideglowError::font("x").to_string().contains("font error:"));
    assert!(
        SlideglowError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        SlideglowError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlideglowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
