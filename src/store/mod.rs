//! Local storage of named drawings.
//!
//! Each drawing is an opaque stroke file `<uuid>.drawing` next to a single
//! `drawings_metadata.json` that lists every drawing in save order. The
//! metadata file is rewritten in full after every change.
//!
//! Public operations never return errors: failures are logged and the
//! operation is abandoned, leaving the in-memory list as it was.

mod record;

pub use record::{DRAWING_EXTENSION, SavedDrawing};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, Utc};
use image::RgbaImage;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::raster;

pub const METADATA_FILE_NAME: &str = "drawings_metadata.json";
pub const EXPORT_SUBDIR: &str = "exports";

/// Saved drawings on disk and their in-memory index
#[derive(Debug)]
pub struct DrawingStore {
    root: PathBuf,
    drawings: Vec<SavedDrawing>,
    thumbnail_scale: f32,
    export_scale: f32,
}

impl DrawingStore {
    /// Open the store rooted at `root` with the default scales
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::from_config(&AppConfig::with_storage_dir(root))
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut store = Self {
            root: config.storage_dir.clone(),
            drawings: Vec::new(),
            thumbnail_scale: config.thumbnail_scale,
            export_scale: config.export_scale,
        };

        let metadata_path = store.metadata_path();
        if !metadata_path.exists() {
            log::info!("No drawing metadata at {}, starting empty", metadata_path.display());
            return store;
        }

        match read_metadata(&metadata_path) {
            Ok(drawings) => store.drawings = drawings,
            Err(err) => {
                log::error!("Error loading drawing metadata: {}", err);
                return store;
            }
        }

        store.attach_thumbnails();
        log::info!("Loaded {} drawings from {}", store.drawings.len(), store.root.display());
        store
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE_NAME)
    }

    pub fn drawing_path(&self, record: &SavedDrawing) -> PathBuf {
        self.root.join(record.file_name())
    }

    /// Drawings in save order
    pub fn drawings(&self) -> &[SavedDrawing] {
        &self.drawings
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedDrawing> {
        self.drawings.iter().find(|drawing| drawing.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }

    /// Save `document` under `name`. Returns the new record, or `None` when
    /// the stroke data could not be written.
    pub fn save(&mut self, document: &Document, name: &str) -> Option<SavedDrawing> {
        match self.try_save(document, name) {
            Ok(record) => Some(record),
            Err(err) => {
                log::error!("Error saving drawing '{}': {}", name, err);
                None
            }
        }
    }

    fn try_save(&mut self, document: &Document, name: &str) -> Result<SavedDrawing> {
        let record = SavedDrawing::new(name, Utc::now());
        let bytes = document.to_bytes()?;

        fs::create_dir_all(&self.root).map_err(|e| Error::io("create", &self.root, e))?;
        let path = self.drawing_path(&record);
        fs::write(&path, bytes).map_err(|e| Error::io("write", &path, e))?;

        let mut record = record;
        record.thumbnail = Some(raster::thumbnail(document, self.thumbnail_scale));
        self.drawings.push(record.clone());
        log::info!("Saved drawing '{}' to {}", name, path.display());

        // The stroke file stays behind if this fails; the record is kept in memory
        if let Err(err) = self.write_metadata() {
            log::error!("Error saving drawing metadata: {}", err);
        }

        Ok(record)
    }

    /// Read and decode the stroke data of `record`
    pub fn load(&self, record: &SavedDrawing) -> Option<Document> {
        match self.try_load(record) {
            Ok(document) => {
                log::info!("Loaded drawing '{}'", record.name);
                Some(document)
            }
            Err(err) => {
                log::error!("Error loading drawing '{}': {}", record.name, err);
                None
            }
        }
    }

    fn try_load(&self, record: &SavedDrawing) -> Result<Document> {
        let path = self.drawing_path(record);
        let bytes = fs::read(&path).map_err(|e| Error::io("read", &path, e))?;
        Document::from_bytes(&bytes)
    }

    /// Remove the stroke file and the record, then rewrite the metadata
    pub fn delete(&mut self, record: &SavedDrawing) {
        if let Err(err) = self.try_delete(record) {
            log::error!("Error deleting drawing '{}': {}", record.name, err);
        }
    }

    fn try_delete(&mut self, record: &SavedDrawing) -> Result<()> {
        let path = self.drawing_path(record);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::warn!("Drawing file {} was already gone", path.display());
            }
            Err(err) => return Err(Error::io("remove", &path, err)),
        }

        self.drawings.retain(|drawing| drawing.id() != record.id());
        log::info!("Deleted drawing '{}'", record.name);
        self.write_metadata()
    }

    /// Rename a drawing. Blank names are ignored.
    pub fn rename(&mut self, id: Uuid, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            log::warn!("Ignoring blank name for drawing {}", id);
            return;
        }
        let Some(record) = self.drawings.iter_mut().find(|drawing| drawing.id() == id) else {
            log::warn!("Cannot rename unknown drawing {}", id);
            return;
        };
        record.name = name.to_owned();

        if let Err(err) = self.write_metadata() {
            log::error!("Error saving drawing metadata: {}", err);
        }
    }

    /// Render the whole drawing at the export scale
    pub fn export_raster(&self, document: &Document) -> RgbaImage {
        raster::render_bounds(document, self.export_scale)
    }

    /// Write the export raster as a PNG in the exports folder
    pub fn export_png(&self, document: &Document, name: &str) -> Option<PathBuf> {
        match self.try_export_png(document, name) {
            Ok(path) => {
                log::info!("Exported drawing to {}", path.display());
                Some(path)
            }
            Err(err) => {
                log::error!("Error exporting drawing: {}", err);
                None
            }
        }
    }

    fn try_export_png(&self, document: &Document, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(EXPORT_SUBDIR);
        fs::create_dir_all(&dir).map_err(|e| Error::io("create", &dir, e))?;

        let stem = format!("{}_{}", file_stem(name), Local::now().format("%Y%m%d_%H%M%S"));
        let path = dir.join(format!("{}.png", stem));
        self.export_raster(document).save(&path)?;
        Ok(path)
    }

    fn write_metadata(&self) -> Result<()> {
        let json = serde_json::to_vec_pretty(&self.drawings).map_err(Error::Metadata)?;
        fs::create_dir_all(&self.root).map_err(|e| Error::io("create", &self.root, e))?;
        let path = self.metadata_path();
        fs::write(&path, json).map_err(|e| Error::io("write", &path, e))
    }

    // Thumbnails are not persisted; rebuild them from the stroke files
    fn attach_thumbnails(&mut self) {
        let thumbnails: Vec<_> = self
            .drawings
            .iter()
            .map(|record| match self.try_load(record) {
                Ok(document) => Some(raster::thumbnail(&document, self.thumbnail_scale)),
                Err(err) => {
                    log::warn!("No thumbnail for drawing '{}': {}", record.name, err);
                    None
                }
            })
            .collect();

        for (record, thumbnail) in self.drawings.iter_mut().zip(thumbnails) {
            record.thumbnail = thumbnail;
        }
    }
}

fn read_metadata(path: &Path) -> Result<Vec<SavedDrawing>> {
    let bytes = fs::read(path).map_err(|e| Error::io("read", path, e))?;
    let mut drawings: Vec<SavedDrawing> = serde_json::from_slice(&bytes).map_err(Error::Metadata)?;

    drawings.retain(|drawing| {
        let valid = drawing.has_valid_file_name();
        if !valid {
            log::warn!(
                "Skipping drawing '{}': file name {:?} does not match id {}",
                drawing.name,
                drawing.file_name(),
                drawing.id()
            );
        }
        valid
    });
    Ok(drawings)
}

/// File-system friendly version of a drawing name
fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() { "drawing".to_owned() } else { stem }
}
