//! Batch plumbing around the compositor: where texts and images come from, where slides go.

/// Parallel row processing.
pub mod batch;
/// Row sources and blob stores.
pub mod sources;
/// Text variation collection.
pub mod variations;

pub use batch::{BatchRunner, CarouselReport, RowReport};
pub use sources::{
    BlobRef, BlobStore, JsonRowSource, LocalBlobStore, RowSource, UPLOAD_EXTENSIONS, parse_rows,
};
pub use variations::{TextVariationGenerator, build_carousel_sets, collect_unique_variations};
