//! The figure: an RGBA canvas tiled with false-colored panels.
//!
//! Composition happens on the CPU. The viewer presents the finished canvas
//! as a single texture.

mod render;
mod text;

pub use render::render_grid;
use text::TitleRasterizer;

use image::{Rgba, RgbaImage};

use crate::colormap::ColorScale;
use crate::layout::GridLayout;
use crate::title::Title;

/// Figure size, resolution and colors.
#[derive(Debug, Clone)]
pub struct FigureSettings {
    /// Width in inches.
    pub width_in: f32,
    /// Height in inches.
    pub height_in: f32,
    /// Pixels per inch; also converts title point sizes to pixels.
    pub dpi: f32,
    /// Outer margin in pixels.
    pub margin: u32,
    /// Gap between neighbouring cells in pixels.
    pub spacing: u32,
    pub background: Rgba<u8>,
    pub frame_color: Rgba<u8>,
    pub title_color: Rgba<u8>,
    /// Skip glyph rasterization; titles are still recorded on each panel.
    pub draw_titles: bool,
}

impl Default for FigureSettings {
    fn default() -> Self {
        Self {
            width_in: 10.0,
            height_in: 12.0,
            dpi: 100.0,
            margin: 40,
            spacing: 24,
            background: Rgba([255, 255, 255, 255]),
            frame_color: Rgba([40, 40, 40, 255]),
            title_color: Rgba([0, 0, 0, 255]),
            draw_titles: true,
        }
    }
}

impl FigureSettings {
    pub fn without_titles(mut self) -> Self {
        self.draw_titles = false;
        self
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round().max(1.0) as u32,
            (self.height_in * self.dpi).round().max(1.0) as u32,
        )
    }

    /// Point size to pixel size at this figure's resolution.
    pub fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }
}

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// What was drawn into one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Position of the image in the input order.
    pub index: usize,
    pub column: usize,
    pub row: usize,
    pub title: Title,
    pub scale: ColorScale,
    /// Shape of the array as loaded.
    pub shape: Vec<usize>,
    /// The whole grid cell.
    pub cell: Rect,
    /// Where the image pixels landed inside the cell.
    pub image_rect: Rect,
}

/// The rendering context the grid renderer draws into.
pub struct Figure {
    settings: FigureSettings,
    canvas: RgbaImage,
    layout: Option<GridLayout>,
    panels: Vec<Panel>,
    rasterizer: Option<TitleRasterizer>,
}

impl Figure {
    pub fn new(settings: FigureSettings) -> Self {
        let (width, height) = settings.pixel_size();
        let canvas = RgbaImage::from_pixel(width, height, settings.background);
        Self {
            settings,
            canvas,
            layout: None,
            panels: Vec::new(),
            rasterizer: None,
        }
    }

    pub fn settings(&self) -> &FigureSettings {
        &self.settings
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Grid of the last `render_grid` call.
    pub fn layout(&self) -> Option<GridLayout> {
        self.layout
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Titles of all panels, in input order.
    pub fn titles(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.title.text.as_str()).collect()
    }

    /// Pixel rectangle of the cell at `(column, row)`.
    pub fn cell_rect(&self, layout: GridLayout, column: usize, row: usize) -> Rect {
        let margin = self.settings.margin;
        let spacing = self.settings.spacing;
        let usable = |total: u32, count: usize| {
            let gaps = spacing.saturating_mul(count.saturating_sub(1) as u32);
            total.saturating_sub(2 * margin).saturating_sub(gaps) / count.max(1) as u32
        };

        let cell_w = usable(self.width(), layout.columns);
        let cell_h = usable(self.height(), layout.rows);
        Rect::new(
            margin + column as u32 * (cell_w + spacing),
            margin + row as u32 * (cell_h + spacing),
            cell_w,
            cell_h,
        )
    }
}
