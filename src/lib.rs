//! npyplot - show NumPy `.npy` arrays as a grid of jet-colored images.
//!
//! The figure is composed on the CPU ([`plot::compose`]) and shown in a
//! wgpu-backed window ([`viewer::show`]). [`plot::plot`] does both.

pub mod cli;
pub mod colormap;
pub mod data;
pub mod error;
pub mod figure;
pub mod layout;
pub mod logging;
pub mod options;
pub mod plot;
pub mod title;
pub mod viewer;

pub use colormap::{ColorScale, Colormap};
pub use data::{ArrayImage, DtypeKind, Stats, load_file};
pub use error::{Error, Result};
pub use figure::{Figure, FigureSettings, Panel};
pub use layout::GridLayout;
pub use options::DisplayOptions;
pub use plot::{compose, plot};
pub use title::{Title, build_title};
pub use viewer::ViewerSettings;
