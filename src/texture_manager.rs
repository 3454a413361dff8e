use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};
use uuid::Uuid;

use crate::raster::Thumbnail;

/// GPU textures of gallery thumbnails, uploaded once per drawing
#[derive(Default)]
pub struct TextureManager {
    texture_cache: HashMap<Uuid, TextureHandle>,
}

impl TextureManager {
    /// Texture for a drawing's thumbnail; `None` for placeholders
    pub fn get_or_create(&mut self, ctx: &Context, id: Uuid, thumbnail: &Thumbnail) -> Option<&TextureHandle> {
        let image = thumbnail.image()?;
        let handle = self.texture_cache.entry(id).or_insert_with(|| {
            let size = [image.width() as usize, image.height() as usize];
            let color_image = ColorImage::from_rgba_unmultiplied(size, image.as_raw());
            ctx.load_texture(format!("thumbnail_{}", id), color_image, TextureOptions::LINEAR)
        });
        Some(handle)
    }

    /// Drop the texture of a deleted drawing
    pub fn invalidate(&mut self, id: Uuid) {
        self.texture_cache.remove(&id);
    }

    /// Drop textures of drawings that no longer exist
    pub fn retain(&mut self, live: impl Fn(Uuid) -> bool) {
        self.texture_cache.retain(|id, _| live(*id));
    }

    pub fn len(&self) -> usize {
        self.texture_cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texture_cache.is_empty()
    }
}
