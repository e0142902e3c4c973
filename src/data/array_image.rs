use ndarray::{Array2, Array3, ArrayD, ArrayView2, Axis, Ix2, Ix3};

/// Element kind of the file an image was decoded from.
///
/// Titles print rounded statistics the way NumPy scalars of that kind print,
/// so integer arrays show `300` while float arrays show `300.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeKind {
    Integer,
    Float32,
    Float64,
}

#[derive(Debug, Clone, PartialEq)]
enum Storage {
    Plane(Array2<f64>),
    Stack(Array3<f64>),
}

/// A loaded array of rank 2 (`rows x cols`) or rank 3 (`rows x cols x channels`).
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayImage {
    storage: Storage,
    kind: DtypeKind,
}

impl ArrayImage {
    /// Wrap a dynamic-rank array. Returns `None` unless the rank is 2 or 3.
    pub fn new(data: ArrayD<f64>, kind: DtypeKind) -> Option<Self> {
        let storage = match data.ndim() {
            2 => Storage::Plane(data.into_dimensionality::<Ix2>().ok()?),
            3 => Storage::Stack(data.into_dimensionality::<Ix3>().ok()?),
            _ => return None,
        };
        Some(Self { storage, kind })
    }

    pub fn from_plane(plane: Array2<f64>, kind: DtypeKind) -> Self {
        Self {
            storage: Storage::Plane(plane),
            kind,
        }
    }

    pub fn from_stack(stack: Array3<f64>, kind: DtypeKind) -> Self {
        Self {
            storage: Storage::Stack(stack),
            kind,
        }
    }

    pub fn kind(&self) -> DtypeKind {
        self.kind
    }

    /// Shape of the array as loaded, channels included.
    pub fn shape(&self) -> &[usize] {
        match &self.storage {
            Storage::Plane(a) => a.shape(),
            Storage::Stack(a) => a.shape(),
        }
    }


    /// The 2D plane that gets displayed: the array itself, or channel 0 of a
    /// stack. Remaining channels are ignored.
    pub fn display_plane(&self) -> ArrayView2<'_, f64> {
        match &self.storage {
            Storage::Plane(a) => a.view(),
            Storage::Stack(a) => a.index_axis(Axis(2), 0),
        }
    }

    /// Statistics over every element, all channels included.
    pub fn stats(&self) -> Stats {
        match &self.storage {
            Storage::Plane(a) => Stats::from_values(a.iter().copied()),
            Storage::Stack(a) => Stats::from_values(a.iter().copied()),
        }
    }
}

/// Summary statistics with NumPy semantics: a single NaN makes every field NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().collect();

        if sorted.is_empty() || sorted.iter().any(|v| v.is_nan()) {
            return Self {
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
                median: f64::NAN,
            };
        }

        let n = sorted.len();
        let mean = pairwise_sum(&sorted) / n as f64;

        sorted.sort_by(f64::total_cmp);
        let mid = n / 2;
        let median = if n % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Self {
            min: sorted[0],
            max: sorted[n - 1],
            mean,
            median,
        }
    }
}

/// Unrolled block size below which `pairwise_sum` stops splitting.
const PAIRWISE_BLOCK: usize = 128;

/// Sum in input order with NumPy's blocked pairwise scheme, so averages match
/// `np.average` to the last printed digit.
fn pairwise_sum(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 8 {
        values.iter().fold(0.0, |acc, v| acc + v)
    } else if n <= PAIRWISE_BLOCK {
        let mut r = [0.0; 8];
        r.copy_from_slice(&values[..8]);
        let unrolled = n - n % 8;
        for chunk in values[8..unrolled].chunks_exact(8) {
            for (acc, v) in r.iter_mut().zip(chunk) {
                *acc += v;
            }
        }
        let mut sum = ((r[0] + r[1]) + (r[2] + r[3])) + ((r[4] + r[5]) + (r[6] + r[7]));
        for v in &values[unrolled..] {
            sum += v;
        }
        sum
    } else {
        let mut half = n / 2;
        half -= half % 8;
        pairwise_sum(&values[..half]) + pairwise_sum(&values[half..])
    }
}

/// Min and max ignoring NaN; `None` when no finite-or-infinite value exists.
pub(crate) fn nan_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
