//! Error type shared by loading, composition and the viewer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a plot run.
#[derive(Error, Debug)]
pub enum Error {
    /// The file could not be read at all.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a NumPy array or uses a dtype we cannot decode.
    #[error("failed to decode {path:?} as a NumPy array: {message}")]
    Npy { path: PathBuf, message: String },

    /// Only 2D images and 3D channel stacks can be shown.
    #[error("{path:?} has shape {shape:?}; expected a 2D or 3D array")]
    UnsupportedRank { path: PathBuf, shape: Vec<usize> },

    /// A panel was placed outside the grid.
    #[error("panel {index} does not fit a {columns}x{rows} grid")]
    LayoutOverflow {
        index: usize,
        columns: usize,
        rows: usize,
    },

    /// The window or its event loop could not be created.
    #[error("viewer error: {0}")]
    Viewer(String),

    #[error(transparent)]
    Gpu(#[from] npyplot_gpu::GpuError),
}

impl From<winit::error::EventLoopError> for Error {
    fn from(e: winit::error::EventLoopError) -> Self {
        Error::Viewer(e.to_string())
    }
}

impl From<winit::error::OsError> for Error {
    fn from(e: winit::error::OsError) -> Self {
        Error::Viewer(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
