//! Software rasterizer for thumbnails and exports.
//!
//! Each stroke is turned into an antialiased coverage mask over its own pixel
//! bounds first, then composited once, so translucent inks do not darken
//! where their segments overlap. Eraser strokes clear the pixels they cover.

use egui::{Pos2, Rect};
use image::RgbaImage;

use crate::document::Document;
use crate::geometry;
use crate::stroke::{Stroke, StrokeKind};

/// Preview of a saved drawing
#[derive(Debug, Clone, PartialEq)]
pub enum Thumbnail {
    /// The drawing had nothing to show
    Placeholder,
    Image(RgbaImage),
}

impl Thumbnail {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Thumbnail::Placeholder)
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        match self {
            Thumbnail::Image(image) => Some(image),
            Thumbnail::Placeholder => None,
        }
    }
}

/// Longest side of any rendered image, in pixels
pub const MAX_RASTER_SIDE: u32 = 8192;
/// Longest side of a thumbnail, in pixels
pub const MAX_THUMBNAIL_SIDE: u32 = 1024;

/// Downscaled preview of the drawing's bounds, or a placeholder when they are empty
pub fn thumbnail(document: &Document, scale: f32) -> Thumbnail {
    let bounds = document.bounds();
    if !bounds.is_positive() || !bounds.size().is_finite() {
        return Thumbnail::Placeholder;
    }
    Thumbnail::Image(render_fitted(document, bounds, scale, MAX_THUMBNAIL_SIDE))
}

/// Render the full stroke bounds of `document` at `scale`. Empty drawings
/// produce a single transparent pixel.
pub fn render_bounds(document: &Document, scale: f32) -> RgbaImage {
    let bounds = document.bounds();
    if !bounds.is_positive() {
        return RgbaImage::new(1, 1);
    }
    render_region(document, bounds, scale)
}

/// Render the canvas region `region` at `scale` onto a transparent image.
/// The scale is lowered if the result would exceed `MAX_RASTER_SIDE`.
pub fn render_region(document: &Document, region: Rect, scale: f32) -> RgbaImage {
    render_fitted(document, region, scale, MAX_RASTER_SIDE)
}

fn render_fitted(document: &Document, region: Rect, scale: f32, max_side: u32) -> RgbaImage {
    if !region.size().is_finite() {
        log::warn!("Cannot render unbounded region {:?}", region);
        return RgbaImage::new(1, 1);
    }
    let scale = fit_scale(region, scale, max_side);
    let width = pixel_extent(region.width(), scale).min(max_side);
    let height = pixel_extent(region.height(), scale).min(max_side);
    let mut image = RgbaImage::new(width, height);

    for stroke in document.strokes() {
        if let Some(mask) = CoverageMask::rasterize(stroke, region.min, scale, width, height) {
            composite(&mut image, stroke, &mask);
        }
    }

    image
}

// Largest scale not above `scale` that keeps both sides within `max_side`
fn fit_scale(region: Rect, scale: f32, max_side: u32) -> f32 {
    let longest = region.width().max(region.height());
    if longest * scale <= max_side as f32 {
        return scale;
    }
    let fitted = max_side as f32 / longest;
    log::debug!("Raster scale lowered from {} to {}", scale, fitted);
    fitted
}

fn pixel_extent(length: f32, scale: f32) -> u32 {
    let pixels = (length * scale).ceil();
    if pixels.is_finite() && pixels >= 1.0 {
        pixels as u32
    } else {
        1
    }
}

/// Per-pixel coverage of one stroke over a sub-rectangle of the image
struct CoverageMask {
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
    coverage: Vec<f32>,
}

impl CoverageMask {
    fn rasterize(stroke: &Stroke, origin: Pos2, scale: f32, image_width: u32, image_height: u32) -> Option<Self> {
        let points: Vec<Pos2> = stroke
            .points()
            .iter()
            .map(|p| Pos2::new((p.x - origin.x) * scale, (p.y - origin.y) * scale))
            .collect();
        if points.is_empty() {
            return None;
        }

        let radius = (stroke.width() * scale / 2.0).max(0.5);
        let bounds = geometry::calculate_bounds(&points, radius + 1.0);
        let x0 = bounds.min.x.floor().max(0.0) as u32;
        let y0 = bounds.min.y.floor().max(0.0) as u32;
        let x1 = (bounds.max.x.ceil().max(0.0) as u32).min(image_width);
        let y1 = (bounds.max.y.ceil().max(0.0) as u32).min(image_height);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let mut mask = Self {
            x0,
            y0,
            width: x1 - x0,
            height: y1 - y0,
            coverage: vec![0.0; (x1 - x0) as usize * (y1 - y0) as usize],
        };

        if points.len() == 1 {
            mask.stamp_segment(points[0], points[0], radius);
        } else {
            for segment in points.windows(2) {
                mask.stamp_segment(segment[0], segment[1], radius);
            }
        }

        Some(mask)
    }

    fn stamp_segment(&mut self, start: Pos2, end: Pos2, radius: f32) {
        let reach = radius + 1.0;
        let min_x = (start.x.min(end.x) - reach).floor().max(self.x0 as f32) as u32;
        let min_y = (start.y.min(end.y) - reach).floor().max(self.y0 as f32) as u32;
        let max_x = ((start.x.max(end.x) + reach).ceil().max(0.0) as u32).min(self.x0 + self.width);
        let max_y = ((start.y.max(end.y) + reach).ceil().max(0.0) as u32).min(self.y0 + self.height);

        for y in min_y..max_y {
            for x in min_x..max_x {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = geometry::distance_to_line_segment(center, start, end);
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let index = (y - self.y0) as usize * self.width as usize + (x - self.x0) as usize;
                    let cell = &mut self.coverage[index];
                    *cell = cell.max(coverage);
                }
            }
        }
    }
}

fn composite(image: &mut RgbaImage, stroke: &Stroke, mask: &CoverageMask) {
    let [r, g, b, a] = stroke.color().to_srgba_unmultiplied();
    let opacity = match stroke.kind() {
        StrokeKind::Ink(ink) => ink.opacity() * (a as f32 / 255.0),
        StrokeKind::Erase => 1.0,
    };

    for row in 0..mask.height {
        for col in 0..mask.width {
            let coverage = mask.coverage[row as usize * mask.width as usize + col as usize];
            if coverage <= 0.0 {
                continue;
            }
            let pixel = image.get_pixel_mut(mask.x0 + col, mask.y0 + row);
            match stroke.kind() {
                StrokeKind::Ink(_) => blend_over(&mut pixel.0, [r, g, b], coverage * opacity),
                StrokeKind::Erase => {
                    let alpha = pixel.0[3] as f32 * (1.0 - coverage);
                    pixel.0[3] = alpha.round() as u8;
                }
            }
        }
    }
}

// Source-over on straight (non-premultiplied) alpha
fn blend_over(dst: &mut [u8; 4], src: [u8; 3], src_alpha: f32) {
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return;
    }
    for channel in 0..3 {
        let s = src[channel] as f32;
        let d = dst[channel] as f32;
        let value = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        dst[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Ink;
    use egui::Color32;

    fn horizontal_line(kind: StrokeKind, color: Color32, width: f32) -> Stroke {
        Stroke::new(kind, color, width, vec![Pos2::new(0.0, 10.0), Pos2::new(40.0, 10.0)])
    }

    #[test]
    fn test_empty_document_gets_placeholder() {
        assert!(thumbnail(&Document::new(), 0.2).is_placeholder());
    }

    #[test]
    fn test_eraser_only_document_gets_placeholder() {
        let doc = Document::from_strokes(vec![horizontal_line(StrokeKind::Erase, Color32::TRANSPARENT, 8.0)]);
        assert!(thumbnail(&doc, 0.2).is_placeholder());
    }

    #[test]
    fn test_render_bounds_size_follows_scale() {
        // Bounds are 40 + 4 wide and 4 tall
        let doc = Document::from_strokes(vec![horizontal_line(StrokeKind::Ink(Ink::Pen), Color32::BLACK, 4.0)]);
        let image = render_bounds(&doc, 2.0);
        assert_eq!(image.dimensions(), (88, 8));

        let small = render_bounds(&doc, 0.2);
        assert_eq!(small.dimensions(), (9, 1));
    }

    #[test]
    fn test_pen_paints_opaque_pixels_along_the_line() {
        let doc = Document::from_strokes(vec![horizontal_line(StrokeKind::Ink(Ink::Pen), Color32::RED, 4.0)]);
        let image = render_bounds(&doc, 1.0);
        let center = image.get_pixel(20, 2);
        assert_eq!(center.0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_marker_is_translucent() {
        let doc = Document::from_strokes(vec![horizontal_line(StrokeKind::Ink(Ink::Marker), Color32::BLUE, 4.0)]);
        let image = render_bounds(&doc, 1.0);
        let alpha = image.get_pixel(20, 2).0[3];
        assert!(alpha > 100 && alpha < 160, "alpha was {}", alpha);
    }

    #[test]
    fn test_eraser_clears_ink() {
        let ink = horizontal_line(StrokeKind::Ink(Ink::Pen), Color32::BLACK, 4.0);
        let eraser = Stroke::new(
            StrokeKind::Erase,
            Color32::TRANSPARENT,
            10.0,
            vec![Pos2::new(20.0, 0.0), Pos2::new(20.0, 20.0)],
        );
        let doc = Document::from_strokes(vec![ink, eraser]);
        let image = render_bounds(&doc, 1.0);
        assert_eq!(image.get_pixel(20, 2).0[3], 0);
        assert_eq!(image.get_pixel(5, 2).0[3], 255);
    }

    #[test]
    fn test_far_away_points_are_scaled_down_to_fit() {
        let far = Stroke::new(
            StrokeKind::Ink(Ink::Pen),
            Color32::BLACK,
            4.0,
            vec![Pos2::new(0.0, 0.0), Pos2::new(1e30, 0.0)],
        );
        let doc = Document::from_strokes(vec![far]);

        let image = render_bounds(&doc, 2.0);
        assert_eq!(image.dimensions(), (MAX_RASTER_SIDE, 1));

        let preview = thumbnail(&doc, 0.2);
        assert_eq!(preview.image().map(|image| image.width()), Some(MAX_THUMBNAIL_SIDE));
    }

    #[test]
    fn test_large_drawings_keep_their_aspect_ratio() {
        let doc = Document::from_strokes(vec![
            Stroke::new(
                StrokeKind::Ink(Ink::Pen),
                Color32::BLACK,
                2.0,
                vec![Pos2::new(0.0, 0.0), Pos2::new(20_000.0, 0.0)],
            ),
            Stroke::new(StrokeKind::Ink(Ink::Pen), Color32::BLACK, 2.0, vec![Pos2::new(0.0, 9_998.0)]),
        ]);
        // Bounds are 20002 x 10000, so at 1x the width is capped
        let image = render_bounds(&doc, 1.0);
        assert_eq!(image.width(), MAX_RASTER_SIDE);
        assert!((image.height() as i64 - 4096).abs() <= 1, "height {}", image.height());
    }

    #[test]
    fn test_blend_over_transparent_takes_source() {
        let mut pixel = [0, 0, 0, 0];
        blend_over(&mut pixel, [10, 20, 30], 1.0);
        assert_eq!(pixel, [10, 20, 30, 255]);
    }
}
