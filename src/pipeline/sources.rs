use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{SlideglowError, SlideglowResult};

/// File extensions accepted by [`BlobStore::list_images`].
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff"];

/// File extensions uploaded from a rendered carousel directory.
pub const UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Rows of slide texts, header excluded. Each row is one carousel, each cell one slide.
pub trait RowSource {
    /// All non-blank data rows, cells trimmed.
    fn rows(&self) -> SlideglowResult<Vec<Vec<String>>>;
}

/// Rows from a JSON file holding an array of string arrays, the first one being a header.
#[derive(Clone, Debug)]
pub struct JsonRowSource {
    path: PathBuf,
}

impl JsonRowSource {
    /// Source reading `path` on every [`RowSource::rows`] call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for JsonRowSource {
    fn rows(&self) -> SlideglowResult<Vec<Vec<String>>> {
        let f = File::open(&self.path)
            .with_context(|| format!("open rows '{}'", self.path.display()))?;
        let raw: Vec<Vec<String>> = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            SlideglowError::serde(format!("parse rows '{}': {e}", self.path.display()))
        })?;
        Ok(clean_rows(raw))
    }
}

/// Parse rows from a JSON string; see [`JsonRowSource`].
pub fn parse_rows(json: &str) -> SlideglowResult<Vec<Vec<String>>> {
    let raw: Vec<Vec<String>> =
        serde_json::from_str(json).map_err(|e| SlideglowError::serde(e.to_string()))?;
    Ok(clean_rows(raw))
}

fn clean_rows(raw: Vec<Vec<String>>) -> Vec<Vec<String>> {
    raw.into_iter()
        .skip(1)
        .map(|row| row.into_iter().map(|cell| cell.trim().to_owned()).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect()
}

/// A stored file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobRef {
    /// Store-specific identifier.
    pub id: String,
    /// Display name, used for ordering.
    pub name: String,
}

/// Remote folders of source images and rendered carousels.
pub trait BlobStore: Send + Sync {
    /// Image files directly inside `folder`.
    fn list_images(&self, folder: &str) -> SlideglowResult<Vec<BlobRef>>;
    /// Copy `blob` to `dest_dir/<stem>.<ext>` and return the local path.
    fn download(&self, blob: &BlobRef, dest_dir: &Path, stem: &str) -> SlideglowResult<PathBuf>;
    /// Create folder `name` under `parent` and return its id.
    fn create_folder(&self, name: &str, parent: &str) -> SlideglowResult<String>;
    /// Store the local `file` in `folder` and return the new blob id.
    fn upload(&self, folder: &str, file: &Path) -> SlideglowResult<String>;
}

/// [`BlobStore`] over a local directory tree. Folder and blob ids are `/`-separated paths
/// relative to `root`.
#[derive(Clone, Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Store rooted at `root`; the directory is not created.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, id: &str) -> SlideglowResult<PathBuf> {
        let rel = Path::new(id);
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(SlideglowError::validation(format!(
                "store id '{id}' must be a relative path without '..'"
            )));
        }
        Ok(self.root.join(rel))
    }
}

fn join_id(parent: &str, name: &str) -> String {
    let parent = parent.trim_matches('/');
    if parent.is_empty() {
        name.to_owned()
    } else {
        format!("{parent}/{name}")
    }
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| allowed.iter().any(|a| a.eq_ignore_ascii_case(e)))
}

impl BlobStore for LocalBlobStore {
    fn list_images(&self, folder: &str) -> SlideglowResult<Vec<BlobRef>> {
        let dir = self.resolve(folder)?;
        let entries =
            std::fs::read_dir(&dir).with_context(|| format!("list folder '{}'", dir.display()))?;
        let mut out = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("list folder '{}'", dir.display()))?;
            let path = entry.path();
            if !path.is_file() || !has_extension(&path, IMAGE_EXTENSIONS) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            out.push(BlobRef {
                id: join_id(folder, &name),
                name,
            });
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    fn download(&self, blob: &BlobRef, dest_dir: &Path, stem: &str) -> SlideglowResult<PathBuf> {
        let src = self.resolve(&blob.id)?;
        let ext = src.extension().and_then(|e| e.to_str()).unwrap_or("bin");
        std::fs::create_dir_all(dest_dir)
            .with_context(|| format!("create '{}'", dest_dir.display()))?;
        let dest = dest_dir.join(format!("{stem}.{}", ext.to_ascii_lowercase()));
        std::fs::copy(&src, &dest)
            .with_context(|| format!("copy '{}' to '{}'", src.display(), dest.display()))?;
        Ok(dest)
    }

    fn create_folder(&self, name: &str, parent: &str) -> SlideglowResult<String> {
        let id = join_id(parent, name);
        let dir = self.resolve(&id)?;
        std::fs::create_dir_all(&dir).with_context(|| format!("create '{}'", dir.display()))?;
        tracing::info!(folder = %id, "created folder");
        Ok(id)
    }

    fn upload(&self, folder: &str, file: &Path) -> SlideglowResult<String> {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SlideglowError::validation(format!("upload '{}' has no file name", file.display()))
            })?;
        let id = join_id(folder, name);
        let dest = self.resolve(&id)?;
        std::fs::copy(file, &dest)
            .with_context(|| format!("copy '{}' to '{}'", file.display(), dest.display()))?;
        Ok(id)
    }
}

/// Files in `dir` with an upload extension, sorted by name.
pub(crate) fn uploadable_files(dir: &Path) -> SlideglowResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("list '{}'", dir.display()))?;
    let mut out = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("list '{}'", dir.display()))?
            .path();
        if path.is_file() && has_extension(&path, UPLOAD_EXTENSIONS) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/sources.rs"]
mod tests;
