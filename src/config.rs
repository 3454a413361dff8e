use std::path::PathBuf;

const APP_DIR_NAME: &str = "SketchPad";

/// Startup configuration for the application
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory holding drawings, their metadata and exports
    pub storage_dir: PathBuf,
    /// Scale of gallery thumbnails relative to the drawing bounds
    pub thumbnail_scale: f32,
    /// Scale of exported images relative to the drawing bounds
    pub export_scale: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            thumbnail_scale: 0.2,
            export_scale: 2.0,
        }
    }
}

impl AppConfig {
    /// Same defaults, storing everything under `storage_dir`
    pub fn with_storage_dir(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Self::default()
        }
    }
}

/// The user's documents folder, falling back to the data folder and then
/// the working directory on platforms that have neither
fn default_storage_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
