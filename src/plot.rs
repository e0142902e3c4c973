//! Load files, compose the figure and hand it to the viewer.

use std::path::{Path, PathBuf};

use crate::data::{ArrayImage, load_file};
use crate::error::Result;
use crate::figure::{Figure, FigureSettings, render_grid};
use crate::options::DisplayOptions;
use crate::viewer::{self, ViewerSettings};

/// Order paths the way they will be loaded.
pub fn ordered_paths(paths: &[PathBuf], options: &DisplayOptions) -> Vec<PathBuf> {
    let mut ordered = paths.to_vec();
    if options.sort_inputs {
        ordered.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    }
    ordered
}

/// Load every path in order. The first failure aborts the whole run.
pub fn load_images(paths: &[PathBuf]) -> Result<Vec<ArrayImage>> {
    paths.iter().map(|path| load_file(path)).collect()
}

/// Last path segment, used as a title when file names are requested.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Names that end up under each title.
///
/// Explicit names win. Otherwise file names are used when asked for, taken
/// from `paths` in load order.
pub fn resolve_names(paths: &[PathBuf], options: &DisplayOptions) -> Option<Vec<String>> {
    if let Some(names) = &options.image_names {
        if options.use_filename_as_title {
            log::warn!("Explicit image names given; ignoring file-name titles");
        }
        return Some(names.clone());
    }
    if options.use_filename_as_title {
        return Some(paths.iter().map(|p| file_name(p)).collect());
    }
    None
}

/// Load `paths` and draw them into a new figure without showing it.
pub fn compose(
    paths: &[PathBuf],
    options: &DisplayOptions,
    settings: FigureSettings,
) -> Result<Figure> {
    let paths = ordered_paths(paths, options);
    let images = load_images(&paths)?;

    let options = DisplayOptions {
        image_names: resolve_names(&paths, options),
        ..options.clone()
    };

    let mut figure = Figure::new(settings);
    render_grid(&mut figure, &images, &options)?;
    log::info!(
        "Composed {} images into a {}x{} figure",
        images.len(),
        figure.width(),
        figure.height()
    );
    Ok(figure)
}

/// Compose the figure and show it. Blocks until the window is closed.
pub fn plot(paths: &[PathBuf], options: &DisplayOptions, settings: &ViewerSettings) -> Result<()> {
    let figure = compose(paths, options, settings.figure.clone())?;
    viewer::show(&figure, settings)
}
