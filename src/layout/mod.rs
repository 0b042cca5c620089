/// Font size search and word wrap.
pub mod fit;
/// Avoid boxes and block placement.
pub mod region;
/// Margins reserved for platform UI.
pub mod safe_area;
