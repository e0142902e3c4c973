//! Title rasterization with cosmic-text.

use cosmic_text::{Align, Attrs, Buffer, Color, FontSystem, Metrics, Shaping, SwashCache};
use image::{Rgba, RgbaImage};

use super::Rect;

/// Shapes and blends centered multi-line text into the figure canvas.
///
/// Loading system fonts is slow, so one rasterizer is kept per figure and
/// only created once the first non-empty title is drawn.
pub(crate) struct TitleRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl TitleRasterizer {
    pub(crate) fn new() -> Self {
        let font_system = FontSystem::new();
        if font_system.db().is_empty() {
            log::warn!("No system fonts found; titles will not be drawn");
        }
        Self {
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    /// Draw `text` centered horizontally in `region`, clipped to it.
    pub(crate) fn draw(
        &mut self,
        canvas: &mut RgbaImage,
        text: &str,
        font_px: f32,
        region: Rect,
        color: Rgba<u8>,
    ) {
        if region.width == 0 || region.height == 0 {
            return;
        }

        let metrics = Metrics::new(font_px, font_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(
            &mut self.font_system,
            Some(region.width as f32),
            Some(region.height as f32),
        );
        buffer.set_text(&mut self.font_system, text, &Attrs::new(), Shaping::Advanced);
        for line in buffer.lines.iter_mut() {
            line.set_align(Some(Align::Center));
        }
        buffer.shape_until_scroll(&mut self.font_system, false);

        let [r, g, b, a] = color.0;
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            Color::rgba(r, g, b, a),
            |x, y, w, h, glyph_color| {
                blend_rect(canvas, region, x, y, w, h, glyph_color);
            },
        );
    }
}

/// Alpha-blend a glyph coverage rectangle given relative to `region`.
fn blend_rect(canvas: &mut RgbaImage, region: Rect, x: i32, y: i32, w: u32, h: u32, color: Color) {
    let alpha = color.a() as u32;
    if alpha == 0 {
        return;
    }
    let source = [color.r() as u32, color.g() as u32, color.b() as u32];

    for dy in 0..h as i32 {
        for dx in 0..w as i32 {
            let px = region.x as i64 + (x + dx) as i64;
            let py = region.y as i64 + (y + dy) as i64;
            if px < 0 || py < 0 {
                continue;
            }
            let (px, py) = (px as u32, py as u32);
            if !region.contains(px, py) || px >= canvas.width() || py >= canvas.height() {
                continue;
            }

            let pixel = canvas.get_pixel_mut(px, py);
            for (channel, src) in pixel.0.iter_mut().zip(source) {
                *channel = ((src * alpha + *channel as u32 * (255 - alpha)) / 255) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_rect_clips_to_region() {
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        let region = Rect::new(2, 2, 3, 3);

        blend_rect(&mut canvas, region, -1, -1, 10, 10, Color::rgba(0, 0, 0, 255));

        assert_eq!(canvas.get_pixel(2, 2).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(4, 4).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(5, 5).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(1, 1).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_blend_rect_partial_coverage() {
        let mut canvas = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        blend_rect(&mut canvas, Rect::new(0, 0, 1, 1), 0, 0, 1, 1, Color::rgba(0, 0, 0, 51));
        assert_eq!(canvas.get_pixel(0, 0).0, [204, 204, 204, 255]);
    }
}
