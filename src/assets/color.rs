use crate::foundation::core::Rgba8;
use crate::foundation::error::{SlideglowError, SlideglowResult};

/// Color used when a slide's color code cannot be parsed.
pub const FALLBACK_TEXT_COLOR: Rgba8 = Rgba8::opaque(46, 204, 113);

/// Resolve a `#RRGGBB` code into an opaque color.
///
/// Never fails: empty or malformed input resolves to [`FALLBACK_TEXT_COLOR`].
pub fn resolve_color(code: &str) -> Rgba8 {
    match parse_hex_color(code) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(code, error = %e, "invalid color code, using fallback");
            FALLBACK_TEXT_COLOR
        }
    }
}

/// Strict form of [`resolve_color`].
pub fn parse_hex_color(code: &str) -> SlideglowResult<Rgba8> {
    let s = code.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> SlideglowResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| SlideglowError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err(SlideglowError::validation(
            "hex color must be #RRGGBB (case-insensitive)",
        ));
    }

    let r = hex_byte(&s[0..2])?;
    let g = hex_byte(&s[2..4])?;
    let b = hex_byte(&s[4..6])?;
    Ok(Rgba8::opaque(r, g, b))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
