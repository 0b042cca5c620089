//! Slideglow renders vertical carousel slides: a background photo cropped to the output canvas,
//! with one block of glowing text fitted into the area that platform UI chrome leaves visible.
//!
//! The core is single-threaded and deterministic:
//!
//! - Validate a [`CarouselConfig`]
//! - Create a [`Compositor`]
//! - Render slides directly ([`Compositor::render_slide`]) or write a whole carousel
//!   ([`Compositor::composite`])
//!
//! [`pipeline`] adds the batch layer around it: row sources, blob stores, text variations and a
//! parallel [`BatchRunner`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Image, font and color loading.
pub mod assets;
/// Carousel compositor.
pub mod compositor;
/// Typed configuration.
pub mod config;
/// Safe area, text fitting and placement.
pub mod layout;
/// Batch processing around the compositor.
pub mod pipeline;
/// Pixel operations and the glow text renderer.
pub mod render;

pub use crate::foundation::core::{Canvas, Rgba8};
pub use crate::foundation::error::{SlideglowError, SlideglowResult};

pub use crate::assets::color::{FALLBACK_TEXT_COLOR, parse_hex_color, resolve_color};
pub use crate::assets::decode::{fit_to_canvas, load_image};
pub use crate::assets::font::{FontSource, TextLayoutEngine};
pub use crate::compositor::{Compositor, write_jpeg};
pub use crate::config::{CarouselConfig, GlowConfig};
pub use crate::layout::fit::{
    FitParams, FontSizeHint, TextBlock, TextMeasure, fit_text, initial_font_size, wrap_words,
};
pub use crate::layout::region::{
    AvoidBox, RegionDetector, boxes_overlap, centered_top, find_best_text_region, place_block,
};
pub use crate::layout::safe_area::{SafeArea, SafeMargins, safe_area};
pub use crate::pipeline::{
    BatchRunner, BlobRef, BlobStore, JsonRowSource, LocalBlobStore, RowSource,
    TextVariationGenerator, build_carousel_sets, collect_unique_variations,
};
pub use crate::render::glow::{GlowStyle, GlowTextRenderer};
pub use crate::render::surface::Surface;
