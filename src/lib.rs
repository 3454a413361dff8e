#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod gallery;
mod geometry;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod store;
pub mod stroke;
pub mod texture_manager;
pub mod tool;
pub mod transform;

pub use app::SketchApp;
pub use canvas::CanvasHost;
pub use config::AppConfig;
pub use document::Document;
pub use error::{Error, Result};
pub use gallery::{Gallery, GalleryAction};
pub use raster::Thumbnail;
pub use renderer::Renderer;
pub use store::{DrawingStore, SavedDrawing};
pub use stroke::{Ink, Stroke, StrokeKind};
pub use tool::{CanvasTool, ToolKind, ToolState};
pub use transform::CanvasTransform;
