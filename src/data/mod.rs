//! Loaded arrays and the `.npy` decoder.
//!
//! - `ArrayImage`: a 2D image or 3D channel stack, stored as `f64`
//! - `Stats`: NumPy-style min/max/mean/median over all elements
//! - `NpyLoader`: decodes `.npy` bytes of any common numeric dtype

mod array_image;
mod npy_loader;

pub use array_image::{ArrayImage, DtypeKind, Stats};
pub(crate) use array_image::nan_range;
pub use npy_loader::{LoadError, NpyLoader, load_file};
