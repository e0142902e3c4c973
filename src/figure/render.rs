//! Grid renderer: titles, color scales and pixels for every panel.

use image::{Rgba, RgbaImage};
use ndarray::ArrayView2;

use super::{Figure, Panel, Rect, TitleRasterizer};
use crate::colormap::{ColorScale, Colormap};
use crate::data::ArrayImage;
use crate::error::{Error, Result};
use crate::layout::GridLayout;
use crate::options::DisplayOptions;
use crate::title::build_title;

/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.2;
/// Space between the last title line and the image.
const TITLE_PAD: u32 = 4;

/// Draw `images` into `figure` as a near-square grid, in input order.
///
/// Any previous content of the figure is cleared first. Cells past the last
/// image stay empty.
pub fn render_grid(
    figure: &mut Figure,
    images: &[ArrayImage],
    options: &DisplayOptions,
) -> Result<()> {
    let count = images.len();
    let layout = GridLayout::for_count(count);
    log::debug!(
        "Grid for {} images: {} columns x {} rows",
        count,
        layout.columns,
        layout.rows
    );

    let background = figure.settings.background;
    for pixel in figure.canvas.pixels_mut() {
        *pixel = background;
    }
    figure.layout = Some(layout);
    figure.panels.clear();

    let colormap = Colormap::jet();
    let names = options.image_names.as_deref().unwrap_or(&[]);

    for (index, image) in images.iter().enumerate() {
        let mut title = build_title(index, image, count, options);
        if let Some(name) = names.get(index) {
            title.push_name(name);
        }

        let (column, row) = layout.cell(index).ok_or(Error::LayoutOverflow {
            index,
            columns: layout.columns,
            rows: layout.rows,
        })?;

        let plane = image.display_plane();
        let scale = ColorScale::choose(&plane);
        let (lo, hi) = scale.bounds();
        log::debug!(
            "Panel {}: {} scale [{}, {}]",
            index,
            if scale.is_auto() { "auto" } else { "fixed" },
            lo,
            hi
        );

        let cell = figure.cell_rect(layout, column, row);
        let font_px = figure.settings.points_to_pixels(title.font_size);
        let band = title_band_height(font_px, title.line_count());
        let image_rect = fit_image(cell, band, plane.dim());

        paint_plane(
            &mut figure.canvas,
            &plane,
            image_rect,
            scale,
            &colormap,
            background,
        );
        draw_frame(&mut figure.canvas, image_rect, figure.settings.frame_color);

        if figure.settings.draw_titles && !title.text.is_empty() {
            let title_rect = Rect::new(cell.x, image_rect.y.saturating_sub(band), cell.width, band);
            let rasterizer = figure.rasterizer.get_or_insert_with(TitleRasterizer::new);
            rasterizer.draw(
                &mut figure.canvas,
                &title.text,
                font_px,
                title_rect,
                figure.settings.title_color,
            );
        }

        figure.panels.push(Panel {
            index,
            column,
            row,
            title,
            scale,
            shape: image.shape().to_vec(),
            cell,
            image_rect,
        });
    }

    Ok(())
}

fn title_band_height(font_px: f32, lines: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    (font_px * LINE_SPACING).ceil() as u32 * lines as u32 + TITLE_PAD
}

/// Largest aspect-preserving rectangle for a `rows x cols` plane below the
/// title band, centered in what is left of the cell.
fn fit_image(cell: Rect, band: u32, (rows, cols): (usize, usize)) -> Rect {
    let band = band.min(cell.height);
    let avail_w = cell.width;
    let avail_h = cell.height - band;
    if rows == 0 || cols == 0 || avail_w == 0 || avail_h == 0 {
        return Rect::new(cell.x, cell.y + band, 0, 0);
    }

    let scale = (avail_w as f64 / cols as f64).min(avail_h as f64 / rows as f64);
    let width = ((cols as f64 * scale).floor() as u32).clamp(1, avail_w);
    let height = ((rows as f64 * scale).floor() as u32).clamp(1, avail_h);

    Rect::new(
        cell.x + (avail_w - width) / 2,
        cell.y + band + (avail_h - height) / 2,
        width,
        height,
    )
}

/// Nearest-neighbour resample of `plane` into `rect`. NaN stays background.
fn paint_plane(
    canvas: &mut RgbaImage,
    plane: &ArrayView2<'_, f64>,
    rect: Rect,
    scale: ColorScale,
    colormap: &Colormap,
    background: Rgba<u8>,
) {
    let (rows, cols) = plane.dim();
    if rect.width == 0 || rect.height == 0 || rows == 0 || cols == 0 {
        return;
    }

    for dy in 0..rect.height {
        let r = (dy as u64 * rows as u64 / rect.height as u64) as usize;
        for dx in 0..rect.width {
            let c = (dx as u64 * cols as u64 / rect.width as u64) as usize;
            let pixel = match scale.normalize(plane[[r, c]]) {
                Some(t) => {
                    let [red, green, blue] = colormap.color(t);
                    Rgba([red, green, blue, 255])
                }
                None => background,
            };
            canvas.put_pixel(rect.x + dx, rect.y + dy, pixel);
        }
    }
}

/// One-pixel outline just outside `rect`, clipped to the canvas.
fn draw_frame(canvas: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }

    let left = rect.x.checked_sub(1);
    let top = rect.y.checked_sub(1);
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;
    let x_start = left.unwrap_or(rect.x);
    let y_start = top.unwrap_or(rect.y);

    let mut plot = |x: u32, y: u32| {
        if x < canvas.width() && y < canvas.height() {
            canvas.put_pixel(x, y, color);
        }
    };

    for x in x_start..=right {
        if let Some(top) = top {
            plot(x, top);
        }
        plot(x, bottom);
    }
    for y in y_start..=bottom {
        if let Some(left) = left {
            plot(left, y);
        }
        plot(right, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DtypeKind;
    use crate::figure::FigureSettings;
    use ndarray::{Array2, Array3, array};

    fn figure() -> Figure {
        Figure::new(FigureSettings::default().without_titles())
    }

    fn float_image(values: Array2<f64>) -> ArrayImage {
        ArrayImage::from_plane(values, DtypeKind::Float64)
    }

    /// Canvas pixel at the center of source element `(r, c)` of a panel.
    fn sample(figure: &Figure, panel: &Panel, r: usize, c: usize) -> [u8; 4] {
        let rows = panel.shape[0] as u32;
        let cols = panel.shape[1] as u32;
        let rect = panel.image_rect;
        let x = rect.x + (2 * c as u32 + 1) * rect.width / (2 * cols);
        let y = rect.y + (2 * r as u32 + 1) * rect.height / (2 * rows);
        figure.canvas().get_pixel(x, y).0
    }

    fn jet(t: f64) -> [u8; 4] {
        let [r, g, b] = Colormap::jet().color(t);
        [r, g, b, 255]
    }

    #[test]
    fn test_titles_recorded_in_order() {
        let images = vec![float_image(array![[1.0]]), float_image(array![[2.0]])];
        let options = DisplayOptions::default().with_index(0);
        let mut figure = figure();

        render_grid(&mut figure, &images, &options).unwrap();

        assert_eq!(figure.titles(), vec!["idx: 0", "idx: 1"]);
        assert_eq!(figure.layout(), Some(GridLayout { columns: 2, rows: 1 }));
    }

    #[test]
    fn test_names_are_appended() {
        let images = vec![float_image(array![[1.0]]), float_image(array![[2.0]])];
        let options = DisplayOptions::default()
            .with_index(0)
            .with_image_names(vec!["first".to_string()]);
        let mut figure = figure();

        render_grid(&mut figure, &images, &options).unwrap();

        assert_eq!(figure.titles(), vec!["idx: 0\nfirst", "idx: 1"]);
    }

    #[test]
    fn test_auto_scale_pixels() {
        let images = vec![float_image(array![[0.0, 1.0], [2.0, 300.0]])];
        let mut figure = figure();
        render_grid(&mut figure, &images, &DisplayOptions::default()).unwrap();

        let panel = &figure.panels()[0];
        assert_eq!(panel.scale, ColorScale::Auto { min: 0.0, max: 300.0 });
        assert_eq!(sample(&figure, panel, 0, 0), jet(0.0));
        assert_eq!(sample(&figure, panel, 1, 1), jet(1.0));
    }

    #[test]
    fn test_fixed_scale_pixels() {
        let images = vec![float_image(array![[0.0, 255.0], [51.0, 128.0]])];
        let mut figure = figure();
        render_grid(&mut figure, &images, &DisplayOptions::default()).unwrap();

        let panel = &figure.panels()[0];
        assert_eq!(panel.scale, ColorScale::BYTE);
        assert_eq!(sample(&figure, panel, 0, 1), jet(1.0));
        assert_eq!(sample(&figure, panel, 1, 0), jet(0.2));
    }

    #[test]
    fn test_stack_shows_first_channel() {
        let mut stack = Array3::<f64>::zeros((2, 2, 3));
        stack[[0, 0, 0]] = 5.0;
        stack[[1, 1, 1]] = 1000.0;
        let images = vec![ArrayImage::from_stack(stack, DtypeKind::Float64)];
        let mut figure = figure();
        render_grid(&mut figure, &images, &DisplayOptions::default()).unwrap();

        let panel = &figure.panels()[0];
        // Channel 0 peaks at 5, so the 1000 in channel 1 does not affect the scale.
        assert_eq!(panel.scale, ColorScale::Auto { min: 0.0, max: 5.0 });
        assert_eq!(panel.shape, vec![2, 2, 3]);
        assert_eq!(sample(&figure, panel, 0, 0), jet(1.0));
    }

    #[test]
    fn test_nan_stays_background() {
        let images = vec![float_image(array![[f64::NAN, 1.0], [2.0, 3.0]])];
        let mut figure = figure();
        render_grid(&mut figure, &images, &DisplayOptions::default()).unwrap();

        let panel = &figure.panels()[0];
        assert_eq!(sample(&figure, panel, 0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_trailing_cells_stay_empty() {
        let images: Vec<_> = (0..3).map(|i| float_image(array![[i as f64, 1.0]])).collect();
        let mut figure = figure();
        render_grid(&mut figure, &images, &DisplayOptions::default()).unwrap();

        let layout = figure.layout().unwrap();
        assert_eq!(layout.capacity(), 4);
        let empty = figure.cell_rect(layout, 1, 1);
        let center = figure
            .canvas()
            .get_pixel(empty.x + empty.width / 2, empty.y + empty.height / 2);
        assert_eq!(center.0, [255, 255, 255, 255]);
        assert_eq!(figure.panels().len(), 3);
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let images = vec![float_image(Array2::zeros((2, 4)))];
        let mut figure = figure();
        render_grid(&mut figure, &images, &DisplayOptions::default()).unwrap();

        let rect = figure.panels()[0].image_rect;
        assert!(rect.width.abs_diff(2 * rect.height) <= 2, "{rect:?}");
    }

    #[test]
    fn test_title_band_reserved_above_image() {
        let images = vec![float_image(Array2::zeros((4, 4)))];
        let options = DisplayOptions::default().with_index(0).with_stats();
        let mut figure = figure();
        render_grid(&mut figure, &images, &options).unwrap();

        let panel = &figure.panels()[0];
        assert_eq!(panel.title.line_count(), 3);
        let band = title_band_height(figure.settings().points_to_pixels(12.0), 3);
        assert!(panel.image_rect.y >= panel.cell.y + band);
    }

    #[test]
    fn test_rerender_replaces_panels() {
        let mut figure = figure();
        let first = vec![float_image(array![[1.0]]); 4];
        render_grid(&mut figure, &first, &DisplayOptions::default()).unwrap();
        render_grid(&mut figure, &first[..1], &DisplayOptions::default()).unwrap();
        assert_eq!(figure.panels().len(), 1);
    }

    #[test]
    fn test_fit_image_empty_plane() {
        let rect = fit_image(Rect::new(0, 0, 100, 100), 10, (0, 5));
        assert_eq!(rect.width, 0);
        assert_eq!(rect.height, 0);
    }
}
