/// Hex color codes.
pub mod color;
/// Image loading and canvas fitting.
pub mod decode;
/// Font loading and text shaping.
pub mod font;
