/// Stagers: write a composed document to a location a window can load.
///
/// Staging is not isolated: every call writes the same well-known slot, so
/// concurrent composes race and the last write wins. [`FileStager::unique_per_call`]
/// opts into one file per call instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;
use crate::error::Result;
use crate::{engine_debug, engine_err};
use super::document::ComposedDocument;

const STAGING_DIR: &str = "glaxier";
const STAGING_FILE: &str = "staging.html";
const MEMORY_STAGING_SRC: &str = "memory://staging.html";

/// Reference to a staged document, resolvable by a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDocument {
    src: String,
    path: Option<PathBuf>,
}

impl StagedDocument {
    pub fn new(src: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self { src: src.into(), path }
    }

    /// Source reference handed to the window opener
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Backing file, for file-based stagers
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

pub trait Stager: Send + Sync {
    /// Write `document` and return where it can be loaded from
    fn stage(&self, document: &ComposedDocument) -> Result<StagedDocument>;

    /// The well-known staging reference
    fn staging_file(&self) -> String;
}

/// Stages documents as HTML files
#[derive(Debug, Clone)]
pub struct FileStager {
    dir: PathBuf,
    unique_per_call: bool,
}

impl FileStager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            unique_per_call: false,
        }
    }

    /// Stage under `<temp>/glaxier/`
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join(STAGING_DIR))
    }

    /// Write every document to its own file instead of the shared slot
    pub fn unique_per_call(mut self) -> Self {
        self.unique_per_call = true;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the shared slot
    pub fn staging_path(&self) -> PathBuf {
        self.dir.join(STAGING_FILE)
    }

    fn src_for(path: &Path) -> String {
        format!("file://{}", path.display())
    }
}

impl Stager for FileStager {
    fn stage(&self, document: &ComposedDocument) -> Result<StagedDocument> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            engine_err!("glaxier::FileStager", StagingFailed:
                "cannot create {}: {}", self.dir.display(), e)
        })?;

        let path = if self.unique_per_call {
            self.dir.join(format!("staging-{}.html", Uuid::new_v4()))
        } else {
            self.staging_path()
        };

        fs::write(&path, document.markup()).map_err(|e| {
            engine_err!("glaxier::FileStager", StagingFailed:
                "cannot write {}: {}", path.display(), e)
        })?;

        engine_debug!("glaxier::FileStager", "Staged {} scene(s) to {}",
            document.scenes().len(), path.display());
        Ok(StagedDocument::new(Self::src_for(&path), Some(path)))
    }

    fn staging_file(&self) -> String {
        Self::src_for(&self.staging_path())
    }
}

/// Single shared in-memory slot. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStager {
    slot: Arc<Mutex<Option<String>>>,
    writes: Arc<AtomicU64>,
}

impl MemoryStager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last staged document
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Number of documents staged so far
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Acquire)
    }
}

impl Stager for MemoryStager {
    fn stage(&self, document: &ComposedDocument) -> Result<StagedDocument> {
        let mut slot = self.slot.lock().map_err(|_| {
            engine_err!("glaxier::MemoryStager", BackendError: "staging slot lock poisoned")
        })?;
        *slot = Some(document.markup().to_string());
        self.writes.fetch_add(1, Ordering::AcqRel);
        Ok(StagedDocument::new(MEMORY_STAGING_SRC, None))
    }

    fn staging_file(&self) -> String {
        MEMORY_STAGING_SRC.to_string()
    }
}

#[cfg(test)]
#[path = "stager_tests.rs"]
mod tests;
