//! Loader for NumPy `.npy` files.
//!
//! Handles 2D and 3D arrays of any common numeric dtype. Values keep their
//! original magnitude; only the element type is widened to `f64`.

use std::io::Cursor;
use std::path::Path;

use ndarray::ArrayD;
use ndarray_npy::{ReadNpyExt, ReadableElement};
use thiserror::Error;

use crate::data::{ArrayImage, DtypeKind};
use crate::error::{Error, Result};

/// Why a byte buffer could not be turned into an `ArrayImage`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("missing \\x93NUMPY magic")]
    NotNpy,

    #[error("unsupported dtype or malformed header ({0})")]
    UnsupportedDtype(String),

    #[error("unsupported shape {0:?}")]
    UnsupportedRank(Vec<usize>),
}

/// Decoder for NumPy `.npy` bytes.
///
/// Supported data types: `f64`, `f32`, `u8`, `u16`, `u32`, `u64`, `i8`,
/// `i16`, `i32`, `i64`, in either C or Fortran order.
pub struct NpyLoader;

impl NpyLoader {
    /// NumPy magic bytes: \x93NUMPY
    const MAGIC: &'static [u8] = &[0x93, b'N', b'U', b'M', b'P', b'Y'];

    pub fn can_load(data: &[u8]) -> bool {
        data.starts_with(Self::MAGIC)
    }

    pub fn load(data: &[u8]) -> std::result::Result<ArrayImage, LoadError> {
        if !Self::can_load(data) {
            return Err(LoadError::NotNpy);
        }

        // f64 first: the dtype NumPy produces by default
        let first_error = match Self::decode::<f64>(data) {
            Ok(image) => return image,
            Err(e) => e,
        };

        let attempts = [
            Self::decode::<f32>,
            Self::decode::<u8>,
            Self::decode::<u16>,
            Self::decode::<u32>,
            Self::decode::<u64>,
            Self::decode::<i8>,
            Self::decode::<i16>,
            Self::decode::<i32>,
            Self::decode::<i64>,
        ];
        for attempt in attempts {
            if let Ok(image) = attempt(data) {
                return image;
            }
        }

        Err(LoadError::UnsupportedDtype(first_error.to_string()))
    }

    /// Outer error: wrong dtype for `T`. Inner error: decoded but unusable.
    fn decode<T>(
        data: &[u8],
    ) -> std::result::Result<std::result::Result<ArrayImage, LoadError>, ndarray_npy::ReadNpyError>
    where
        T: ReadableElement + NumericConvert + Copy,
    {
        let array = ArrayD::<T>::read_npy(Cursor::new(data))?;
        let shape = array.shape().to_vec();
        log::debug!("NpyLoader: {} array with shape {:?}", T::NAME, shape);

        let widened = array.mapv(|v| v.to_f64());
        Ok(ArrayImage::new(widened, T::KIND).ok_or(LoadError::UnsupportedRank(shape)))
    }
}

/// Read and decode one file, attaching the path to any failure.
pub fn load_file(path: &Path) -> Result<ArrayImage> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let image = NpyLoader::load(&bytes).map_err(|e| match e {
        LoadError::UnsupportedRank(shape) => Error::UnsupportedRank {
            path: path.to_path_buf(),
            shape,
        },
        other => Error::Npy {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    log::info!("Loaded {} with shape {:?}", path.display(), image.shape());
    Ok(image)
}

/// Widening conversion for every dtype the loader accepts.
trait NumericConvert {
    const KIND: DtypeKind;
    const NAME: &'static str;
    fn to_f64(self) -> f64;
}

impl NumericConvert for f64 {
    const KIND: DtypeKind = DtypeKind::Float64;
    const NAME: &'static str = "f64";
    fn to_f64(self) -> f64 {
        self
    }
}

impl NumericConvert for f32 {
    const KIND: DtypeKind = DtypeKind::Float32;
    const NAME: &'static str = "f32";
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

macro_rules! integer_convert {
    ($($t:ty),*) => {
        $(
            impl NumericConvert for $t {
                const KIND: DtypeKind = DtypeKind::Integer;
                const NAME: &'static str = stringify!($t);
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

integer_convert!(u8, u16, u32, u64, i8, i16, i32, i64);
