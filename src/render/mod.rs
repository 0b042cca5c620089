/// Fixed-point Gaussian blur.
pub mod blur;
/// Premultiplied source-over.
pub mod composite;
/// Glow text rendering.
pub mod glow;
/// Slide pixel buffers.
pub mod surface;
