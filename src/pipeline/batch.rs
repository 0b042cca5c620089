use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::assets::font::FontSource;
use crate::compositor::Compositor;
use crate::config::CarouselConfig;
use crate::foundation::error::{SlideglowError, SlideglowResult};
use crate::pipeline::sources::{BlobRef, BlobStore, RowSource, uploadable_files};
use crate::pipeline::variations::{TextVariationGenerator, build_carousel_sets};

/// Outcome of one carousel set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselReport {
    /// 0 for the original texts, `v` for the `v`-th rewrite.
    pub set: usize,
    /// Destination folder id.
    pub folder: String,
    /// Locally written slides.
    pub slides: Vec<PathBuf>,
    /// Ids of the uploaded slides.
    pub uploaded: Vec<String>,
}

/// Outcome of one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowReport {
    /// 0-based row index after header and blank rows are dropped.
    pub row: usize,
    /// Sets that were rendered and uploaded, in set order.
    pub carousels: Vec<CarouselReport>,
    /// Sets whose render or upload failed; the rest of the row still ran.
    pub failed_sets: Vec<usize>,
}

/// Renders rows of slide texts into carousels and uploads them.
///
/// Slide `j` of every carousel draws its background from `source_folders[j]`; carousel set
/// `i` is uploaded into a new folder under `dest_folders[i % len]`.
pub struct BatchRunner<'a> {
    config: CarouselConfig,
    store: &'a dyn BlobStore,
    source_folders: Vec<String>,
    dest_folders: Vec<String>,
    work_dir: PathBuf,
    generator: Option<&'a dyn TextVariationGenerator>,
    variations: usize,
    attempts_per_variant: usize,
    threads: Option<usize>,
}

impl<'a> BatchRunner<'a> {
    /// Validate `config` and require at least one destination folder.
    pub fn new(
        config: CarouselConfig,
        store: &'a dyn BlobStore,
        source_folders: Vec<String>,
        dest_folders: Vec<String>,
        work_dir: impl Into<PathBuf>,
    ) -> SlideglowResult<Self> {
        config.validate()?;
        if dest_folders.is_empty() {
            return Err(SlideglowError::validation(
                "batch needs at least one destination folder",
            ));
        }
        Ok(Self {
            config,
            store,
            source_folders,
            dest_folders,
            work_dir: work_dir.into(),
            generator: None,
            variations: 0,
            attempts_per_variant: 3,
            threads: None,
        })
    }

    /// Render `variations` rewritten sets per row in addition to the originals.
    pub fn with_generator(
        mut self,
        generator: &'a dyn TextVariationGenerator,
        variations: usize,
        attempts_per_variant: usize,
    ) -> Self {
        self.generator = Some(generator);
        self.variations = variations;
        self.attempts_per_variant = attempts_per_variant;
        self
    }

    /// Cap the render thread pool. `None` uses rayon's default.
    pub fn with_threads(mut self, threads: Option<usize>) -> SlideglowResult<Self> {
        if threads == Some(0) {
            return Err(SlideglowError::validation("threads must be >= 1 when set"));
        }
        self.threads = threads;
        Ok(self)
    }

    /// Process every row of `rows`.
    #[tracing::instrument(skip_all)]
    pub fn run(&self, rows: &dyn RowSource, font: &FontSource) -> SlideglowResult<Vec<RowReport>> {
        let rows = rows.rows()?;
        tracing::info!(rows = rows.len(), "starting batch");
        let mut reports = Vec::with_capacity(rows.len());
        for (r, texts) in rows.iter().enumerate() {
            reports.push(self.run_row(r, texts, font)?);
        }
        Ok(reports)
    }

    /// Render every carousel set of one row in parallel, then upload each set.
    #[tracing::instrument(skip(self, texts, font), fields(slides = texts.len()))]
    pub fn run_row(
        &self,
        row: usize,
        texts: &[String],
        font: &FontSource,
    ) -> SlideglowResult<RowReport> {
        let sets = match self.generator {
            Some(generator) if self.variations > 0 => {
                build_carousel_sets(generator, texts, self.variations, self.attempts_per_variant)
            }
            _ => vec![texts.to_vec()],
        };

        let row_dir = self.work_dir.join(format!("row{}", row + 1));
        let listings: Vec<Vec<BlobRef>> = self
            .source_folders
            .iter()
            .map(|folder| self.list_folder(folder))
            .collect();

        let mut jobs = Vec::with_capacity(sets.len());
        for (i, set) in sets.iter().enumerate() {
            let set_dir = row_dir.join(format!("carousel{}", i + 1));
            let images = self.fetch_images(&listings, i, &set_dir.join("raw"));
            jobs.push((i, set, images, set_dir.join("slides")));
        }

        let pool = build_thread_pool(self.threads)?;
        let rendered = pool.install(|| {
            jobs.par_iter()
                .map_init(
                    || Compositor::new(self.config.clone()),
                    |compositor, (i, set, images, out_dir)| {
                        let slides = match compositor.as_mut() {
                            Ok(c) => c.composite_with_font(images, font, &[], set, out_dir),
                            Err(e) => Err(SlideglowError::validation(e.to_string())),
                        };
                        (*i, out_dir.clone(), slides)
                    },
                )
                .collect::<Vec<_>>()
        });

        let mut carousels = Vec::with_capacity(rendered.len());
        let mut failed_sets = Vec::new();
        for (i, out_dir, slides) in rendered {
            match slides.and_then(|slides| self.publish_set(row, i, slides, &out_dir)) {
                Ok(report) => carousels.push(report),
                Err(e) => {
                    tracing::warn!(row = row + 1, set = i, error = %e, "carousel set failed");
                    failed_sets.push(i);
                }
            }
        }
        Ok(RowReport {
            row,
            carousels,
            failed_sets,
        })
    }

    /// Create the destination folder of set `set` and upload its slides.
    fn publish_set(
        &self,
        row: usize,
        set: usize,
        slides: Vec<PathBuf>,
        out_dir: &Path,
    ) -> SlideglowResult<CarouselReport> {
        let parent = &self.dest_folders[set % self.dest_folders.len()];
        let folder = self
            .store
            .create_folder(&format!("row{}-carousel{}", row + 1, set + 1), parent)?;
        let uploaded = self.upload_dir(&folder, out_dir)?;
        tracing::info!(
            row = row + 1,
            set,
            folder = %folder,
            uploaded = uploaded.len(),
            "carousel uploaded"
        );
        Ok(CarouselReport {
            set,
            folder,
            slides,
            uploaded,
        })
    }

    fn list_folder(&self, folder: &str) -> Vec<BlobRef> {
        if folder.trim().is_empty() {
            tracing::warn!("empty source folder id");
            return Vec::new();
        }
        match self.store.list_images(folder.trim()) {
            Ok(images) => images,
            Err(e) => {
                tracing::warn!(folder, error = %e, "cannot list source folder");
                Vec::new()
            }
        }
    }

    /// One local image per source folder for carousel `set`; `None` where nothing is usable.
    fn fetch_images(
        &self,
        listings: &[Vec<BlobRef>],
        set: usize,
        raw_dir: &Path,
    ) -> Vec<Option<PathBuf>> {
        listings
            .iter()
            .enumerate()
            .map(|(j, images)| {
                let blob = pick_image(images, set)?;
                match self
                    .store
                    .download(blob, raw_dir, &format!("raw_slide_{}", j + 1))
                {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::warn!(slide = j + 1, blob = %blob.id, error = %e, "download failed");
                        None
                    }
                }
            })
            .collect()
    }

    fn upload_dir(&self, folder: &str, dir: &Path) -> SlideglowResult<Vec<String>> {
        let mut uploaded = Vec::new();
        for file in uploadable_files(dir)? {
            match self.store.upload(folder, &file) {
                Ok(id) => uploaded.push(id),
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "upload failed");
                }
            }
        }
        Ok(uploaded)
    }
}

/// Deterministic image choice: entry `set % len` of the name-sorted listing.
pub(crate) fn pick_image(images: &[BlobRef], set: usize) -> Option<&BlobRef> {
    if images.is_empty() {
        return None;
    }
    images.get(set % images.len())
}

fn build_thread_pool(threads: Option<usize>) -> SlideglowResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlideglowError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/batch.rs"]
mod tests;
